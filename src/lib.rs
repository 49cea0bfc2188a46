pub mod ast;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod token;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use ast::Program;
pub use environment::{Env, Environment};
pub use error::ParseError;
pub use evaluator::{eval_program, Completion, Evaluator};
pub use object::Object;
pub use parser::Parser;

/// Lexes and parses `source`. The program is only trustworthy when the
/// returned diagnostics are empty.
///
/// ```
/// let (program, errors) = monkey_interp::parse("-a * b");
///
/// assert!(errors.is_empty());
/// assert_eq!(program.to_string(), "((-a) * b)");
/// ```
pub fn parse(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(lexer::Lexer::new(source));
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// One environment reused across many inputs, so bindings made by one input
/// are visible to the next.
///
/// ```
/// # use monkey_interp::{Session, Object};
/// let mut session = Session::new();
///
/// assert_eq!(session.run("let x = 2;"), Ok(None));
/// assert_eq!(session.run("x * 21"), Ok(Some(Object::Integer(42))));
/// ```
pub struct Session {
    env: Env,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            env: Environment::new(),
            interrupt: None,
        }
    }

    /// Evaluation started by `run` stops early once `flag` is raised.
    pub fn with_interrupt(flag: Arc<AtomicBool>) -> Session {
        Session {
            env: Environment::new(),
            interrupt: Some(flag),
        }
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Drops every binding.
    pub fn reset(&mut self) {
        self.env = Environment::new();
    }

    /// Parses and evaluates `source`. Nothing is evaluated if there are
    /// diagnostics. Yields `None` when the last statement that ran is a
    /// `let` (or there is no statement at all).
    pub fn run(&mut self, source: &str) -> Result<Option<Object>, Vec<ParseError>> {
        let (program, errors) = parse(source);
        if !errors.is_empty() {
            return Err(errors);
        }
        let mut evaluator = match &self.interrupt {
            Some(flag) => {
                // a Ctrl-C from before this input does not count.
                flag.store(false, Ordering::SeqCst);
                Evaluator::with_interrupt(Arc::clone(flag))
            },
            None => Evaluator::new(),
        };
        let result = match evaluator.run_program(&program, &self.env) {
            Completion::Stopped(value) => return Ok(Some(value)),
            Completion::Finished(value) => value,
        };

        match program.statements.last() {
            None | Some(ast::Statement::Let { .. }) => Ok(None),
            _ => Ok(Some(result)),
        }
    }
}
