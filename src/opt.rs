use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use monkey_interp::Session;

use crate::repl;

/// A tree-walking interpreter for the Monkey language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Options {
    /// Evaluate the files (or stdin, when none are given), print each file's
    /// final value and exit without starting the prompt.
    #[arg(short, long)]
    pub no_interactive: bool,

    /// Neither read nor write the prompt history file.
    #[arg(long)]
    pub no_history: bool,

    /// Files evaluated, in order, into the session before the prompt starts.
    pub files: Vec<PathBuf>,
}

/// What `main` does once the startup files are loaded.
#[derive(Debug, PartialEq, Eq)]
pub enum Startup {
    Repl,
    Exit,
    // a file could not be read or parsed.
    Failed,
}

pub fn load_startup_files(options: &Options, session: &mut Session) -> Startup {
    if options.no_interactive {
        // never start interactive prompt when -n is used
        if options.files.is_empty() {
            return if load_file(None, session, true) { Startup::Exit } else { Startup::Failed };
        }
        for name in &options.files {
            if !load_file(Some(name.as_path()), session, true) {
                return Startup::Failed;
            }
        }
        return Startup::Exit;
    }

    for name in &options.files {
        if !load_file(Some(name.as_path()), session, false) {
            return Startup::Failed;
        }
    }
    Startup::Repl
}

/// Evaluates a whole file (stdin for `None`) in `session`. Returns false if
/// it could not be read or did not parse.
pub fn load_file(filename: Option<&Path>, session: &mut Session, print_result: bool) -> bool {
    let name = match filename {
        None => "stdin".to_string(),
        Some(path) => path.display().to_string(),
    };
    let source = match read_source(filename) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("failed to load file '{}': {}", &name, e);
            return false;
        },
    };
    tracing::debug!(file = %name, bytes = source.len(), "loading");

    match session.run(&source) {
        Ok(Some(result)) => {
            if print_result || result.is_error() {
                println!("{}", result);
            }
            true
        },
        Ok(None) => true,
        Err(errors) => {
            eprintln!("failed to load file '{}':", &name);
            repl::print_parse_errors(&errors);
            false
        },
    }
}

fn read_source(filename: Option<&Path>) -> io::Result<String> {
    match filename {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_and_files() {
        let options = Options::try_parse_from(&["monkey", "-n", "a.monkey", "b.monkey"]).unwrap();
        assert!(options.no_interactive);
        assert!(!options.no_history);
        assert_eq!(options.files, vec![PathBuf::from("a.monkey"), PathBuf::from("b.monkey")]);
    }

    #[test]
    fn defaults() {
        let options = Options::try_parse_from(&["monkey"]).unwrap();
        assert!(!options.no_interactive);
        assert!(options.files.is_empty());
    }

    #[test]
    fn unreadable_file_stops_loading() {
        let mut session = Session::new();
        let missing = Path::new("/nonexistent/definitely/missing.monkey");
        assert!(!load_file(Some(missing), &mut session, false));
    }

    #[test]
    fn scripted_run_reports_failures() {
        let mut session = Session::new();
        let options = Options::try_parse_from(&["monkey", "-n", "/nonexistent/missing.monkey"]).unwrap();
        assert_eq!(load_startup_files(&options, &mut session), Startup::Failed);

        let path = std::env::temp_dir().join(format!("monkey_opt_bad_{}.monkey", std::process::id()));
        std::fs::write(&path, "let x 5;").unwrap();
        let name = path.to_string_lossy().into_owned();
        let options = Options::try_parse_from(&["monkey", "-n", name.as_str()]).unwrap();
        assert_eq!(load_startup_files(&options, &mut session), Startup::Failed);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn scripted_run_exits_after_good_files() {
        let path = std::env::temp_dir().join(format!("monkey_opt_good_{}.monkey", std::process::id()));
        std::fs::write(&path, "let x = 5;").unwrap();
        let name = path.to_string_lossy().into_owned();

        let mut session = Session::new();
        let options = Options::try_parse_from(&["monkey", "-n", name.as_str()]).unwrap();
        assert_eq!(load_startup_files(&options, &mut session), Startup::Exit);
        let options = Options::try_parse_from(&["monkey", name.as_str()]).unwrap();
        assert_eq!(load_startup_files(&options, &mut session), Startup::Repl);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn loaded_bindings_reach_the_session() {
        let path = std::env::temp_dir().join(format!("monkey_opt_test_{}.monkey", std::process::id()));
        std::fs::write(&path, "let double = fn(x) { x * 2 };\nlet ten = double(5);\n").unwrap();

        let mut session = Session::new();
        assert!(load_file(Some(path.as_path()), &mut session, false));
        assert_eq!(session.run("ten"), Ok(Some(monkey_interp::Object::Integer(10))));

        std::fs::remove_file(&path).unwrap();
    }
}
