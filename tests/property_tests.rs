//! Property-based tests for the lexer and the canonical printer.
//!
//! 1. Round trip: printing a parsed expression and parsing the text again
//!    prints the same canonical string.
//! 2. Total coverage: for any input the lexer reaches end-of-input and stays
//!    there.

use monkey_interp::lexer::Lexer;
use monkey_interp::parse;
use monkey_interp::token::{TokenTag, KEYWORDS};
use proptest::prelude::*;

/// Generate an identifier that is not a keyword.
fn identifier_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z_][a-z_?]{0,6}")
        .expect("valid regex")
        .prop_filter("not a keyword", |s| !KEYWORDS.iter().any(|(k, _)| k == s))
}

fn leaf_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..100_000).prop_map(|n| n.to_string()),
        identifier_strategy(),
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

/// Generate a syntactically valid operator/call expression, with or without
/// redundant parentheses. `if` and `fn` print their blocks without braces, so
/// their text does not parse back and they are left out.
fn expression_strategy() -> impl Strategy<Value = String> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!["+", "-", "*", "/", "<", ">", "==", "!="]), inner.clone())
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            (prop::sample::select(vec!["-", "!"]), inner.clone())
                .prop_map(|(op, e)| format!("{}{}", op, e)),
            inner.clone().prop_map(|e| format!("({})", e)),
            (identifier_strategy(), prop::collection::vec(inner, 0..3))
                .prop_map(|(f, args)| format!("{}({})", f, args.join(", "))),
        ]
    })
}

proptest! {
    #[test]
    fn printer_round_trips(src in expression_strategy()) {
        let (program, errors) = parse(&src);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", src, errors);
        let printed = program.to_string();

        let (reparsed, errors) = parse(&printed);
        prop_assert!(errors.is_empty(), "errors for {:?}: {:?}", printed, errors);
        prop_assert_eq!(reparsed.to_string(), printed);
    }

    #[test]
    fn lexer_always_reaches_eof(src in ".{0,64}") {
        let mut lexer = Lexer::new(&src);
        let mut steps = 0;
        while lexer.next_token().tag != TokenTag::Eof {
            steps += 1;
            prop_assert!(steps <= src.len(), "no end of input after {} tokens", steps);
        }
        for _ in 0..3 {
            prop_assert_eq!(lexer.next_token().tag, TokenTag::Eof);
        }
    }
}
