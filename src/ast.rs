//! The syntax tree. Each node owns its children; the `Display` impls give the
//! canonical, fully parenthesized re-serialization used by `:ast` and by the
//! precedence tests.

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let { name: Identifier, value: Expression },
    Return(Option<Expression>),
    Expression(Expression),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Lt,
    Gt,
    Eq,
    NotEq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(i64),
    Boolean(bool),
    Prefix {
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

/// Materializes the digit run of an integer token.
///
/// ```
/// # use monkey_interp::ast::parse_integer_literal;
/// assert_eq!(parse_integer_literal("007"), Ok(7));
/// assert!(parse_integer_literal("9223372036854775808").is_err());
/// ```
pub fn parse_integer_literal(digits: &str) -> Result<i64, ParseError> {
    digits
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidInteger(digits.to_string()))
}

impl Expression {
    pub fn prefix(operator: PrefixOperator, right: Expression) -> Expression {
        Expression::Prefix {
            operator,
            right: Box::new(right),
        }
    }

    pub fn infix(left: Expression, operator: InfixOperator, right: Expression) -> Expression {
        Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier(name.to_string()))
    }
}

fn write_statements(f: &mut Formatter, statements: &[Statement]) -> fmt::Result {
    for stmt in statements {
        write!(f, "{}", stmt)?;
    }
    Ok(())
}

fn write_separated<T: Display>(f: &mut Formatter, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(Some(value)) => write!(f, "return {};", value),
            Statement::Return(None) => write!(f, "return;"),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            PrefixOperator::Bang => write!(f, "!"),
            PrefixOperator::Minus => write!(f, "-"),
        }
    }
}

impl Display for InfixOperator {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let op = match self {
            InfixOperator::Plus => "+",
            InfixOperator::Minus => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Lt => "<",
            InfixOperator::Gt => ">",
            InfixOperator::Eq => "==",
            InfixOperator::NotEq => "!=",
        };
        write!(f, "{}", op)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix { left, operator, right } => {
                write!(f, "({} {} {})", left, operator, right)
            },
            Expression::If { condition, consequence, alternative } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            },
            Expression::FunctionLiteral { parameters, body } => {
                write!(f, "fn(")?;
                write_separated(f, parameters)?;
                write!(f, ") {}", body)
            },
            Expression::Call { function, arguments } => {
                write!(f, "{}(", function)?;
                write_separated(f, arguments)?;
                write!(f, ")")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn let_statement_text() {
        let program = Program {
            statements: vec![Statement::Let {
                name: Identifier("myVar".to_string()),
                value: Expression::ident("anotherVar"),
            }],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    #[test]
    fn statements_concatenate_without_separator() {
        let program = Program {
            statements: vec![
                Statement::Return(Some(Expression::IntegerLiteral(5))),
                Statement::Return(None),
                Statement::Expression(Expression::Boolean(true)),
            ],
        };
        assert_eq!(program.to_string(), "return 5;return;true");
    }

    #[test]
    fn nested_operators_fully_parenthesized() {
        let expr = Expression::infix(
            Expression::prefix(PrefixOperator::Minus, Expression::ident("a")),
            InfixOperator::Multiply,
            Expression::ident("b"),
        );
        assert_eq!(expr.to_string(), "((-a) * b)");
    }

    #[test]
    fn if_else_text() {
        let expr = Expression::If {
            condition: Box::new(Expression::infix(
                Expression::ident("x"),
                InfixOperator::Lt,
                Expression::ident("y"),
            )),
            consequence: BlockStatement {
                statements: vec![Statement::Expression(Expression::ident("x"))],
            },
            alternative: Some(BlockStatement {
                statements: vec![Statement::Expression(Expression::ident("y"))],
            }),
        };
        assert_eq!(expr.to_string(), "if (x < y) x else y");
    }

    #[test]
    fn function_and_call_text() {
        let func = Expression::FunctionLiteral {
            parameters: vec![Identifier("x".to_string()), Identifier("y".to_string())],
            body: BlockStatement {
                statements: vec![Statement::Expression(Expression::infix(
                    Expression::ident("x"),
                    InfixOperator::Plus,
                    Expression::ident("y"),
                ))],
            },
        };
        assert_eq!(func.to_string(), "fn(x, y) (x + y)");

        let call = Expression::Call {
            function: Box::new(Expression::ident("add")),
            arguments: vec![Expression::IntegerLiteral(1), Expression::ident("z")],
        };
        assert_eq!(call.to_string(), "add(1, z)");

        let empty = Expression::Call {
            function: Box::new(Expression::ident("f")),
            arguments: Vec::new(),
        };
        assert_eq!(empty.to_string(), "f()");
    }

    #[test]
    fn integer_literal_limits() {
        assert_eq!(parse_integer_literal("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(
            parse_integer_literal("9223372036854775808"),
            Err(ParseError::InvalidInteger("9223372036854775808".to_string()))
        );
    }
}
