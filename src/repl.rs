use std::{
    env,
    borrow::Cow,
    cell::RefCell,
    path::Path,
    rc::Rc,
};
use rustyline::{
    At,
    Cmd,
    CompletionType,
    Context,
    Editor,
    KeyPress,
    Movement,
    Word,
    completion::{Completer, FilenameCompleter, Pair},
    error::ReadlineError,
    highlight::{Highlighter, MatchingBracketHighlighter},
    hint::Hinter,
    line_buffer::LineBuffer,
};
use rustyline_derive::Helper;

use monkey_interp::{
    lexer::Lexer,
    token::{TokenTag, KEYWORDS},
    ParseError,
    Session,
};

use crate::{
    cmd::{self, Command, CommandLine},
    opt::{self, Options},
};

const PROMPT: &str = ">> ";
const CONTINUATION_PROMPT: &str = ".. ";

const MONKEY_FACE: &str = r#"
  .--.  .-"     "-.  .--.
 / .. \/  .-. .-.  \/ .. \
| |  '|  /   Y   \  |'  | |
| \   \  \ 0 | 0 /  /   / |
 \ '- ,\.-"""""""-./, -' /
  ''-' /_   ^ ^   _\ '-''
      |  \._   _./  |
      \   \ '~' /   /
       '._ '-=-' _.'
          '-----'
"#;

#[derive(Helper)]
struct RustylineHelper {
    filename_completer: FilenameCompleter, // for :load
    highlighter: MatchingBracketHighlighter,
    session: Rc<RefCell<Session>>,
}

impl Hinter for RustylineHelper {
    fn hint(&self, _line: &str, _pos: usize, _context: &Context) -> Option<String> {
        None
    }
}

impl Completer for RustylineHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, cursor_pos: usize, context: &Context)
        -> Result<(usize, Vec<Self::Candidate>), ReadlineError>
    {
        let null_completion = (0, Vec::with_capacity(0));
        if cursor_pos == 0 {
            return Ok(null_completion);
        }
        match line.chars().next() {
            None => Ok(null_completion),
            Some(':') => {
                let compl_str = &line[1..cursor_pos];
                match compl_str.find(' ') {
                    None => {
                        // no space: complete the command's name.
                        match cmd::get_command_starts_with(compl_str) {
                            None => Ok(null_completion),
                            Some(class) => {
                                let compl_pair = Pair {
                                    display: class.long_name.to_string(),
                                    replacement: class.long_name.to_string(),
                                };
                                Ok((1, vec![compl_pair]))
                            },
                        }
                    },
                    Some(pos) => {
                        // with space: complete the argument.
                        match cmd::get_command(&compl_str[..pos]) {
                            Some(class) if class.cmd == Command::Load => {
                                self.filename_completer.complete(line, cursor_pos, context)
                            },
                            Some(class) if class.cmd == Command::Ast => {
                                Ok(self.complete_name(line, cursor_pos))
                            },
                            _ => Ok(null_completion),
                        }
                    },
                }
            },
            Some(_) => Ok(self.complete_name(line, cursor_pos)),
        }
    }

    fn update(&self, line: &mut LineBuffer, start: usize, elected: &str) {
        self.filename_completer.update(line, start, elected)
    }
}

impl RustylineHelper {
    // keywords and every name bound in the session.
    fn complete_name(&self, line: &str, cursor_pos: usize) -> (usize, Vec<Pair>) {
        let word_begin = get_start_word_under_cursor(line, cursor_pos);
        let prefix = &line[word_begin..cursor_pos];
        if prefix.is_empty() {
            return (word_begin, Vec::new());
        }
        let mut names: Vec<String> = KEYWORDS
            .iter()
            .map(|(keyword, _)| keyword.to_string())
            .filter(|keyword| keyword.starts_with(prefix))
            .collect();
        names.extend(self.session.borrow().env().borrow().names_with_prefix(prefix));

        let completion = names
            .into_iter()
            .map(|s| Pair { display: s.clone(), replacement: s })
            .collect();
        (word_begin, completion)
    }
}

impl Highlighter for RustylineHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }
    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: CompletionType
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize) -> bool {
        self.highlighter.highlight_char(line, pos)
    }
}

fn make_rustyline_editor(histfile: Option<&str>, session: Rc<RefCell<Session>>)
    -> Editor<RustylineHelper>
{
    let mut rl = Editor::<RustylineHelper>::new();

    let rustyline_helper = RustylineHelper {
        filename_completer: FilenameCompleter::new(),
        highlighter: MatchingBracketHighlighter::new(),
        session,
    };
    rl.set_helper(Some(rustyline_helper));

    if let Some(histfile) = histfile {
        if let Err(e) = rl.load_history(histfile) {
            tracing::debug!(error = %e, histfile, "no history loaded");
        }
    }

    rl.bind_sequence(KeyPress::ControlRight,
                     Cmd::Move(Movement::ForwardWord(1, At::Start, Word::Vi)));
    rl.bind_sequence(KeyPress::ControlLeft,
                     Cmd::Move(Movement::BackwardWord(1, Word::Vi)));
    rl
}

fn get_histfile_path() -> String {
    let home_key = "HOME";
    let fallback = "/tmp";
    let filename = "monkey_hist";
    match env::var(home_key) {
        Ok(home) => format!("{}/.cache/{}", home, filename),
        Err(e) => {
            eprintln!("warning: failed to read env variable {} ({}), using fallback {}.",
                      home_key, e, fallback);
            format!("{}/{}", fallback, filename)
        },
    }
}

pub fn read_eval_print_loop(session: Session, options: &Options) {

    let session = Rc::new(RefCell::new(session));

    let histfile = if options.no_history { None } else { Some(get_histfile_path()) };
    let mut rl = make_rustyline_editor(histfile.as_deref(), Rc::clone(&session));

    loop {
        match rl.readline(PROMPT) {
            Ok(mut line) => {
                while needs_more_input(&line) {
                    match rl.readline(CONTINUATION_PROMPT) {
                        Ok(new_line) => {
                            line.push('\n');
                            line.push_str(&new_line);
                        },
                        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                        Err(err) => {
                            eprintln!("error: {:?}", err);
                            break;
                        },
                    };
                }
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str());

                let mut session = session.borrow_mut();
                if !handle_line(&line, &mut session) {
                    break;
                }
            },
            Err(ReadlineError::Interrupted) => {
                break;
            },
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("error: {:?}", err);
                break;
            },
        };
    }
    if let Some(histfile) = histfile {
        if rl.save_history(&histfile).is_err() {
            eprintln!("failed to save history file");
        }
    }
}

// returns false when the REPL should stop.
fn handle_line(line: &str, session: &mut Session) -> bool {
    match cmd::parse_command_line(line) {
        Some(CommandLine::Run(command, arg)) => return run_command(command, arg, session),
        Some(CommandLine::MissingArgument(name)) => {
            eprintln!("command :{} expects an argument", name);
        },
        Some(CommandLine::Unknown(name)) => {
            eprintln!("unknown command ':{}', try :help", name);
        },
        None => match session.run(line) {
            Ok(Some(result)) => println!("{}", result),
            Ok(None) => {},
            Err(errors) => print_parse_errors(&errors),
        },
    }
    true
}

fn run_command(command: Command, arg: &str, session: &mut Session) -> bool {
    match command {
        Command::Help => cmd::print_usage(),
        Command::Load => {
            opt::load_file(Some(Path::new(arg)), session, true);
        },
        Command::Ast => {
            let (program, errors) = monkey_interp::parse(arg);
            if errors.is_empty() {
                println!("{}", program);
            } else {
                print_parse_errors(&errors);
            }
        },
        Command::Reset => session.reset(),
        Command::Quit => return false,
    }
    true
}

pub fn print_parse_errors(errors: &[ParseError]) {
    print!("{}", MONKEY_FACE);
    println!("Woops! Looks like we ran into some monkey business here");
    println!(" parser errors:");
    for (i, error) in errors.iter().enumerate() {
        println!("\t{}. - {}", i, error);
    }
}

// true while the input has more '(' or '{' open than closed.
fn needs_more_input(source: &str) -> bool {
    if cmd::parse_command_line(source).is_some() {
        return false;
    }
    let mut depth: i64 = 0;
    for token in Lexer::new(source) {
        match token.tag {
            TokenTag::LParen | TokenTag::LBrace => depth += 1,
            TokenTag::RParen | TokenTag::RBrace => depth -= 1,
            _ => {},
        }
    }
    depth > 0
}

// find the beginning of the word in line which is currently under the cursor,
// whose position is cursor_pos.
//
fn get_start_word_under_cursor(line: &str, cursor_pos: usize) -> usize {
    let mut chars = line[..cursor_pos].chars();
    let mut res = cursor_pos;
    while let Some(c) = chars.next_back() {
        if !(c.is_ascii_alphabetic() || c == '_' || c == '?') {
            break
        }
        res -= c.len_utf8();
    };
    // if iter == None, res == 0.
    res
}
