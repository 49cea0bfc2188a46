//! Tree-walking evaluation.
//!
//! Errors and `return` travel through the ordinary return value: an
//! `Object::Error` or `Object::ReturnValue` stops the statement sequence it
//! appears in. Blocks pass a `ReturnValue` up untouched so that a `return`
//! nested in `if` blocks still reaches the function call (or the program)
//! that unwraps it.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use crate::environment::{Env, Environment};
use crate::object::{Function, Object, NULL};

/// Evaluates `program` in `env`, with no way to interrupt it.
///
/// ```
/// # use monkey_interp::{parse, environment::Environment, evaluator::eval_program, object::Object};
/// let (program, errors) = parse("let add = fn(x, y) { x + y; }; add(1 + 1, add(2, 4))");
/// assert!(errors.is_empty());
///
/// assert_eq!(eval_program(&program, &Environment::new()), Object::Integer(8));
/// ```
pub fn eval_program(program: &Program, env: &Env) -> Object {
    Evaluator::new().eval_program(program, env)
}

/// How the statements of a program ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Every statement ran; holds the value of the last one.
    Finished(Object),
    /// A `return` or an error ended the program early.
    Stopped(Object),
}

impl Completion {
    pub fn into_value(self) -> Object {
        match self {
            Completion::Finished(value) | Completion::Stopped(value) => value,
        }
    }
}

#[derive(Default)]
pub struct Evaluator {
    interrupt: Option<Arc<AtomicBool>>,
    depth: usize,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator::default()
    }

    /// Once `flag` is raised, evaluation stops at the next statement or call
    /// with an "interrupted" error. The flag is lowered again when seen.
    pub fn with_interrupt(flag: Arc<AtomicBool>) -> Evaluator {
        Evaluator {
            interrupt: Some(flag),
            depth: 0,
        }
    }

    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Object {
        self.run_program(program, env).into_value()
    }

    /// Like `eval_program`, but also tells whether every statement ran.
    pub fn run_program(&mut self, program: &Program, env: &Env) -> Completion {
        let mut result = NULL;
        for stmt in &program.statements {
            result = self.eval_statement(stmt, env);
            match result {
                Object::ReturnValue(value) => return Completion::Stopped(*value),
                Object::Error(_) => return Completion::Stopped(result),
                _ => {},
            }
        }
        Completion::Finished(result)
    }

    fn eval_block(&mut self, block: &BlockStatement, env: &Env) -> Object {
        let mut result = NULL;
        for stmt in &block.statements {
            result = self.eval_statement(stmt, env);
            if let Object::ReturnValue(_) | Object::Error(_) = result {
                return result;
            }
        }
        result
    }

    fn interrupted(&self) -> bool {
        match &self.interrupt {
            Some(flag) => flag.swap(false, Ordering::SeqCst),
            None => false,
        }
    }

    fn eval_statement(&mut self, stmt: &Statement, env: &Env) -> Object {
        if self.interrupted() {
            tracing::debug!(depth = self.depth, "evaluation interrupted");
            return Object::error("Evaluation interrupted");
        }
        match stmt {
            Statement::Expression(expr) => self.eval_expression(expr, env),
            Statement::Return(None) => Object::ReturnValue(Box::new(NULL)),
            Statement::Return(Some(expr)) => {
                let value = self.eval_expression(expr, env);
                if value.is_error() {
                    return value;
                }
                Object::ReturnValue(Box::new(value))
            },
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env);
                if value.is_error() {
                    return value;
                }
                env.borrow_mut().set(name.0.as_str(), value);
                NULL
            },
        }
    }

    fn eval_expression(&mut self, expr: &Expression, env: &Env) -> Object {
        match expr {
            Expression::IntegerLiteral(value) => Object::Integer(*value),
            Expression::Boolean(value) => Object::from_bool(*value),
            Expression::Identifier(ident) => eval_identifier(ident, env),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_prefix_expression(*operator, right)
            },
            Expression::Infix { left, operator, right } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                eval_infix_expression(*operator, left, right)
            },
            Expression::If { condition, consequence, alternative } => {
                let condition = self.eval_expression(condition, env);
                if condition.is_error() {
                    return condition;
                }
                if condition.is_truthy() {
                    self.eval_block(consequence, env)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)
                } else {
                    NULL
                }
            },
            Expression::FunctionLiteral { parameters, body } => {
                Object::Function(Rc::new(Function {
                    parameters: parameters.clone(),
                    body: body.clone(),
                    env: Rc::clone(env),
                }))
            },
            Expression::Call { function, arguments } => {
                let function = self.eval_expression(function, env);
                if function.is_error() {
                    return function;
                }
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    let value = self.eval_expression(argument, env);
                    if value.is_error() {
                        return value;
                    }
                    args.push(value);
                }
                self.apply_function(function, args)
            },
        }
    }

    fn apply_function(&mut self, function: Object, args: Vec<Object>) -> Object {
        let func = match function {
            Object::Function(func) => func,
            other => return Object::error(format!("Not a function: {}", other.object_type())),
        };
        if func.parameters.len() != args.len() {
            return Object::error(format!(
                "Wrong number of arguments: want={}, got={}",
                func.parameters.len(),
                args.len()
            ));
        }
        if self.interrupted() {
            tracing::debug!(depth = self.depth, "evaluation interrupted");
            return Object::error("Evaluation interrupted");
        }

        let call_env = Environment::new_enclosed(&func.env);
        for (param, arg) in func.parameters.iter().zip(args) {
            call_env.borrow_mut().set(param.0.as_str(), arg);
        }

        self.depth += 1;
        tracing::trace!(depth = self.depth, params = func.parameters.len(), "apply function");
        let result = self.eval_block(&func.body, &call_env);
        self.depth -= 1;

        match result {
            Object::ReturnValue(value) => *value,
            other => other,
        }
    }
}

fn eval_identifier(ident: &Identifier, env: &Env) -> Object {
    match env.borrow().get(&ident.0) {
        Some(value) => value,
        None => Object::error(format!("Identifier not found: {}", ident)),
    }
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> Object {
    match operator {
        PrefixOperator::Bang => Object::from_bool(!right.is_truthy()),
        PrefixOperator::Minus => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            other => Object::error(format!("Unknown operator: -{}", other.object_type())),
        },
    }
}

fn eval_infix_expression(operator: InfixOperator, left: Object, right: Object) -> Object {
    if let (Object::Integer(l), Object::Integer(r)) = (&left, &right) {
        return eval_integer_infix_expression(operator, *l, *r);
    }
    if left.object_type() != right.object_type() {
        return Object::error(format!(
            "Type missmatch: {} {} {}",
            left.object_type(),
            operator,
            right.object_type()
        ));
    }
    match operator {
        InfixOperator::Eq => Object::from_bool(left.is_identical(&right)),
        InfixOperator::NotEq => Object::from_bool(!left.is_identical(&right)),
        _ => Object::error(format!(
            "Unknown operator: {} {} {}",
            left.object_type(),
            operator,
            right.object_type()
        )),
    }
}

fn eval_integer_infix_expression(operator: InfixOperator, l: i64, r: i64) -> Object {
    match operator {
        InfixOperator::Plus => Object::Integer(l.wrapping_add(r)),
        InfixOperator::Minus => Object::Integer(l.wrapping_sub(r)),
        InfixOperator::Multiply => Object::Integer(l.wrapping_mul(r)),
        InfixOperator::Divide => {
            if r == 0 {
                return Object::error(format!("Division by zero: {} / 0", l));
            }
            Object::Integer(l.wrapping_div(r))
        },
        InfixOperator::Lt => Object::from_bool(l < r),
        InfixOperator::Gt => Object::from_bool(l > r),
        InfixOperator::Eq => Object::from_bool(l == r),
        InfixOperator::NotEq => Object::from_bool(l != r),
    }
}
