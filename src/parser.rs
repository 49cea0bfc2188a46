use crate::ast::{
    self, BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program,
    Statement,
};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Token, TokenTag};

/// Binding power of an operator, lowest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

impl Precedence {
    fn of(tag: TokenTag) -> Precedence {
        match tag {
            TokenTag::Eq | TokenTag::NotEq => Precedence::Equals,
            TokenTag::Lt | TokenTag::Gt => Precedence::LessGreater,
            TokenTag::Plus | TokenTag::Minus => Precedence::Sum,
            TokenTag::Asterisk | TokenTag::Slash => Precedence::Product,
            TokenTag::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}

fn infix_operator(tag: TokenTag) -> Option<InfixOperator> {
    let op = match tag {
        TokenTag::Plus => InfixOperator::Plus,
        TokenTag::Minus => InfixOperator::Minus,
        TokenTag::Asterisk => InfixOperator::Multiply,
        TokenTag::Slash => InfixOperator::Divide,
        TokenTag::Lt => InfixOperator::Lt,
        TokenTag::Gt => InfixOperator::Gt,
        TokenTag::Eq => InfixOperator::Eq,
        TokenTag::NotEq => InfixOperator::NotEq,
        _ => return None,
    };
    Some(op)
}

/// Our hand-written Pratt parser.
/// Use with parse_program(), then check errors().
///
/// Binary operators are left associative and bind by precedence:
///
/// ```
/// # use monkey_interp::{lexer::Lexer, parser::Parser};
/// let mut parser = Parser::new(Lexer::new("a + b * c + d / e - f"));
/// let program = parser.parse_program();
///
/// assert!(parser.errors().is_empty());
/// assert_eq!(program.to_string(), "(((a + (b * c)) + (d / e)) - f)");
/// ```
///
/// A malformed statement is reported and skipped; parsing carries on:
///
/// ```
/// # use monkey_interp::{lexer::Lexer, parser::Parser};
/// let mut parser = Parser::new(Lexer::new("let x 5; y"));
/// let program = parser.parse_program();
///
/// assert_eq!(parser.errors().len(), 1);
/// assert_eq!(program.to_string(), "5y");
/// ```
///
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
        let mut parser = Parser {
            lexer,
            cur: Token::eof(),
            peek: Token::eof(),
            errors: Vec::new(),
        };
        parser.next_token();
        parser.next_token();
        parser
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.cur.is(TokenTag::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.cur = std::mem::replace(&mut self.peek, next);
    }

    fn peek_is(&self, tag: TokenTag) -> bool {
        self.peek.is(tag)
    }

    fn expect_peek(&mut self, tag: TokenTag) -> Option<()> {
        if self.peek_is(tag) {
            self.next_token();
            Some(())
        } else {
            self.record(ParseError::UnexpectedToken {
                expected: tag,
                got: self.peek.tag,
            });
            None
        }
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenTag::Semicolon) {
            self.next_token();
        }
    }

    fn record(&mut self, error: ParseError) {
        tracing::debug!(%error, token = %self.cur.text, "parse diagnostic");
        self.errors.push(error);
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.tag {
            TokenTag::Let => self.parse_let_statement(),
            TokenTag::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        self.expect_peek(TokenTag::Ident)?;
        let name = Identifier(self.cur.text.clone());
        self.expect_peek(TokenTag::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        // `return` may stand alone at the end of a statement, block or input.
        if self.peek_is(TokenTag::Semicolon)
            || self.peek_is(TokenTag::RBrace)
            || self.peek_is(TokenTag::Eof)
        {
            self.skip_optional_semicolon();
            return Some(Statement::Return(None));
        }
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Return(Some(value)))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();
        Some(Statement::Expression(expr))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(TokenTag::Semicolon) && precedence < Precedence::of(self.peek.tag) {
            let tag = self.peek.tag;
            left = if let Some(operator) = infix_operator(tag) {
                self.next_token();
                self.parse_infix_expression(left, operator)?
            } else if tag == TokenTag::LParen {
                self.next_token();
                self.parse_call_expression(left)?
            } else {
                return Some(left);
            };
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.tag {
            TokenTag::Ident => Some(Expression::Identifier(Identifier(self.cur.text.clone()))),
            TokenTag::Int => match ast::parse_integer_literal(&self.cur.text) {
                Ok(value) => Some(Expression::IntegerLiteral(value)),
                Err(e) => {
                    self.record(e);
                    None
                },
            },
            TokenTag::True => Some(Expression::Boolean(true)),
            TokenTag::False => Some(Expression::Boolean(false)),
            TokenTag::Bang => self.parse_prefix_expression(PrefixOperator::Bang),
            TokenTag::Minus => self.parse_prefix_expression(PrefixOperator::Minus),
            TokenTag::LParen => self.parse_grouped_expression(),
            TokenTag::If => self.parse_if_expression(),
            TokenTag::Function => self.parse_function_literal(),
            tag => {
                self.record(ParseError::NoPrefixParser(tag));
                None
            },
        }
    }

    fn parse_prefix_expression(&mut self, operator: PrefixOperator) -> Option<Expression> {
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expression::prefix(operator, right))
    }

    fn parse_infix_expression(
        &mut self,
        left: Expression,
        operator: InfixOperator,
    ) -> Option<Expression> {
        let precedence = Precedence::of(self.cur.tag);
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Some(Expression::infix(left, operator, right))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenTag::RParen)?;
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        self.expect_peek(TokenTag::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenTag::RParen)?;
        self.expect_peek(TokenTag::LBrace)?;
        let consequence = self.parse_block_statement();

        let mut alternative = None;
        if self.peek_is(TokenTag::Else) {
            self.next_token();
            self.expect_peek(TokenTag::LBrace)?;
            alternative = Some(self.parse_block_statement());
        }

        Some(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    // Expects the current token to be `{`; stops on the matching `}` or at
    // end of input.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let mut block = BlockStatement::default();
        self.next_token();
        while !self.cur.is(TokenTag::RBrace) && !self.cur.is(TokenTag::Eof) {
            if let Some(stmt) = self.parse_statement() {
                block.statements.push(stmt);
            }
            self.next_token();
        }
        block
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        self.expect_peek(TokenTag::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenTag::LBrace)?;
        let body = self.parse_block_statement();
        Some(Expression::FunctionLiteral { parameters, body })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();
        if self.peek_is(TokenTag::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.expect_peek(TokenTag::Ident)?;
        parameters.push(Identifier(self.cur.text.clone()));
        while self.peek_is(TokenTag::Comma) {
            self.next_token();
            self.expect_peek(TokenTag::Ident)?;
            parameters.push(Identifier(self.cur.text.clone()));
        }
        self.expect_peek(TokenTag::RParen)?;
        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_call_arguments()?;
        Some(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expression>> {
        let mut arguments = Vec::new();
        if self.peek_is(TokenTag::RParen) {
            self.next_token();
            return Some(arguments);
        }

        self.next_token();
        arguments.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenTag::Comma) {
            self.next_token();
            self.next_token();
            arguments.push(self.parse_expression(Precedence::Lowest)?);
        }
        self.expect_peek(TokenTag::RParen)?;
        Some(arguments)
    }
}
