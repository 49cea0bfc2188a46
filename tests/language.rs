use monkey_interp::{parse, Environment, Object, ParseError, Session};
use monkey_interp::token::TokenTag;
use pretty_assertions::assert_eq;

fn run(src: &str) -> Object {
    let (program, errors) = parse(src);
    assert!(errors.is_empty(), "parse errors for {:?}: {:?}", src, errors);
    monkey_interp::eval_program(&program, &Environment::new())
}

#[test]
fn precedence_rendering() {
    let cases = &[
        ("-a * b", "((-a) * b)"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
    ];
    for (src, expected) in cases {
        let (program, errors) = parse(src);
        assert!(errors.is_empty());
        assert_eq!(program.to_string(), *expected);
    }
}

#[test]
fn arithmetic() {
    assert_eq!(run("5 + 5 + 5 - 10 + 1"), Object::Integer(6));
    assert_eq!(run("2 * (4 + 5)"), Object::Integer(18));
}

#[test]
fn return_escapes_nested_blocks() {
    assert_eq!(run("if (1 > 0) { return 10; } return 1;"), Object::Integer(10));
}

#[test]
fn closures_and_nested_calls() {
    assert_eq!(run("let add = fn(x, y) { x + y; }; add(1 + 1, add(2, 4))"), Object::Integer(8));
}

#[test]
fn error_messages() {
    assert_eq!(run("5 + true"), Object::error("Type missmatch: INTEGER + BOOLEAN"));
    assert_eq!(run("foobar"), Object::error("Identifier not found: foobar"));
    assert_eq!(run("5 + true").inspect(), "ERROR: Type missmatch: INTEGER + BOOLEAN");
}

#[test]
fn boolean_singletons_compare_equal() {
    assert_eq!(run("let a = 1 < 2; let b = 3 < 4; a == b"), Object::Boolean(true));
}

#[test]
fn functions_are_never_structurally_equal() {
    assert_eq!(run("let f = fn(x) { x }; let g = fn(x) { x }; f == g"), Object::Boolean(false));
    assert_eq!(run("let f = fn(x) { x }; f == f"), Object::Boolean(true));
}

#[test]
fn counter_closures_capture_their_own_scope() {
    let src = "
        let make = fn(start) {
            fn(step) { start + step }
        };
        let from_ten = make(10);
        let from_hundred = make(100);
        from_ten(1) + from_hundred(2)
    ";
    assert_eq!(run(src), Object::Integer(113));
}

#[test]
fn higher_order_functions() {
    let src = "
        let twice = fn(f, x) { f(f(x)) };
        let inc = fn(x) { x + 1 };
        twice(inc, twice(inc, 0))
    ";
    assert_eq!(run(src), Object::Integer(4));
}

#[test]
fn function_inspect_text() {
    assert_eq!(run("fn(a, b) { a * b; }").inspect(), "fn (a, b) {\n(a * b)\n}");
}

#[test]
fn session_keeps_bindings_across_lines() {
    let mut session = Session::new();
    assert_eq!(session.run("let max = fn(a, b) { if (a > b) { a } else { b } };"), Ok(None));
    assert_eq!(session.run("let x = max(3, 9);"), Ok(None));
    assert_eq!(session.run("max(x, 4) * 2"), Ok(Some(Object::Integer(18))));
}

#[test]
fn session_reports_all_diagnostics() {
    let mut session = Session::new();
    let errors = session.run("let = 1; let x 2;").unwrap_err();
    assert_eq!(
        errors,
        vec![
            ParseError::UnexpectedToken { expected: TokenTag::Ident, got: TokenTag::Assign },
            ParseError::NoPrefixParser(TokenTag::Assign),
            ParseError::UnexpectedToken { expected: TokenTag::Assign, got: TokenTag::Int },
        ]
    );
    assert_eq!(errors[0].to_string(), "expected token=IDENT got==");
}

#[test]
fn division_by_zero_is_a_language_error() {
    assert_eq!(run("10 / (5 - 5)"), Object::error("Division by zero: 10 / 0"));
    assert_eq!(run("0 / 10"), Object::Integer(0));
}
