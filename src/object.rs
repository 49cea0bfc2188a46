use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::ast::{BlockStatement, Identifier};
use crate::environment::Env;

/// The shared `true`, `false` and `null` values. The evaluator hands these
/// out instead of building new ones, and `==` on them is identity.
pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    Function(Rc<Function>),
    /// Carries a `return`ed value up through enclosing blocks.
    ReturnValue(Box<Object>),
    Error(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    Function,
    ReturnValue,
    Error,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::Function => "FUNCTION",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}

/// A closure: parameters and body of a function literal, plus the scope it
/// was evaluated in.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Env,
}

// The captured scope may contain this very function, so it is left out.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl Object {
    pub fn from_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    pub fn error(message: impl Into<String>) -> Object {
        Object::Error(message.into())
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::Function(_) => ObjectType::Function,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Only `false` and `null` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Boolean(value) => *value,
            Object::Null => false,
            _ => true,
        }
    }

    /// Identity comparison. Booleans and null are the shared constants, so
    /// comparing their payloads is the same as comparing the instances;
    /// functions are only identical to themselves.
    pub fn is_identical(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => self.is_identical(other),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Function(func) => {
                let params: Vec<String> = func.parameters.iter().map(|p| p.to_string()).collect();
                write!(f, "fn ({}) {{\n{}\n}}", params.join(", "), func.body)
            },
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, InfixOperator, Statement};
    use crate::environment::Environment;

    fn add_function() -> Object {
        Object::Function(Rc::new(Function {
            parameters: vec![Identifier("x".to_string()), Identifier("y".to_string())],
            body: BlockStatement {
                statements: vec![Statement::Expression(Expression::infix(
                    Expression::ident("x"),
                    InfixOperator::Plus,
                    Expression::ident("y"),
                ))],
            },
            env: Environment::new(),
        }))
    }

    #[test]
    fn inspect() {
        assert_eq!(Object::Integer(-42).inspect(), "-42");
        assert_eq!(TRUE.inspect(), "true");
        assert_eq!(FALSE.inspect(), "false");
        assert_eq!(NULL.inspect(), "null");
        assert_eq!(Object::error("boom").inspect(), "ERROR: boom");
        assert_eq!(Object::ReturnValue(Box::new(Object::Integer(3))).inspect(), "3");
        assert_eq!(add_function().inspect(), "fn (x, y) {\n(x + y)\n}");
    }

    #[test]
    fn truthiness() {
        assert!(TRUE.is_truthy());
        assert!(!FALSE.is_truthy());
        assert!(!NULL.is_truthy());
        assert!(Object::Integer(0).is_truthy());
        assert!(add_function().is_truthy());
    }

    #[test]
    fn type_names() {
        assert_eq!(Object::Integer(1).object_type().to_string(), "INTEGER");
        assert_eq!(NULL.object_type().to_string(), "NULL");
        assert_eq!(add_function().object_type().to_string(), "FUNCTION");
    }

    #[test]
    fn functions_are_only_identical_to_themselves() {
        let f = add_function();
        let g = add_function();
        assert!(f.is_identical(&f.clone()));
        assert!(!f.is_identical(&g));
    }

    #[test]
    fn booleans_are_the_shared_constants() {
        assert!(Object::from_bool(true).is_identical(&TRUE));
        assert!(Object::from_bool(false).is_identical(&FALSE));
        assert!(!TRUE.is_identical(&NULL));
    }
}
