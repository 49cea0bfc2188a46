/// REPL commands: lines starting with ':'.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Load,
    Ast,
    Reset,
    Quit,
}

pub struct CommandClassifier<'a> {
    pub short_name: &'a str,
    pub long_name: &'a str,
    pub cmd: Command,
    pub arg_expected: bool,
    description: &'a str,
}

pub const COMMAND_CLASSIFIER : &[CommandClassifier] = &[
    CommandClassifier {
        short_name: "h",
        long_name: "help",
        cmd: Command::Help,
        arg_expected: false,
        description: "print this message.",
    },
    CommandClassifier {
        short_name: "l",
        long_name: "load",
        cmd: Command::Load,
        arg_expected: true,
        description: "evaluate a whole file in the current session.",
    },
    CommandClassifier {
        short_name: "a",
        long_name: "ast",
        cmd: Command::Ast,
        arg_expected: true,
        description: "print the parsed form of the argument, fully parenthesized, without evaluating it.",
    },
    CommandClassifier {
        short_name: "r",
        long_name: "reset",
        cmd: Command::Reset,
        arg_expected: false,
        description: "forget every binding made so far.",
    },
    CommandClassifier {
        short_name: "q",
        long_name: "quit",
        cmd: Command::Quit,
        arg_expected: false,
        description: "leave the interpreter.",
    },
];

/// What a ':' line turned out to be.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandLine<'a> {
    Run(Command, &'a str),
    MissingArgument(&'a str),
    Unknown(&'a str),
}

/// Splits a line into a command and its (trimmed) argument, if the line is a
/// command at all.
pub fn parse_command_line(line: &str) -> Option<CommandLine<'_>> {
    let rest = line.trim_start().strip_prefix(':')?;
    let rest = rest.trim();
    let (name, arg) = match rest.find(char::is_whitespace) {
        Some(pos) => (&rest[..pos], rest[pos..].trim()),
        None => (rest, ""),
    };
    let class = match get_command(name) {
        Some(class) => class,
        None => return Some(CommandLine::Unknown(name)),
    };
    if class.arg_expected && arg.is_empty() {
        return Some(CommandLine::MissingArgument(class.long_name));
    }
    Some(CommandLine::Run(class.cmd, arg))
}

pub fn get_command(name: &str) -> Option<&'static CommandClassifier<'static>> {
    COMMAND_CLASSIFIER
        .iter()
        .find(|class| name == class.short_name || name == class.long_name)
}

// get the command entry in COMMAND_CLASSIFIER whose long name starts with prefix.
pub fn get_command_starts_with(prefix: &str) -> Option<&'static CommandClassifier<'static>> {
    COMMAND_CLASSIFIER
        .iter()
        .find(|class| class.long_name.starts_with(prefix))
}

pub fn print_usage() {
    println!(
"An interpreter for the Monkey language.
Enter expressions or statements; bindings made with `let` persist across lines.

Available commands:"
    );
    for command in COMMAND_CLASSIFIER {
        println!(":{}, :{}\t{}",
                 command.short_name,
                 command.long_name,
                 command.description);
    }
}
