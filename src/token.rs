use std::fmt;

/// Every kind of token the lexer can produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenTag {
    Illegal,
    Eof,

    Ident,
    Int,

    Assign,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Bang,
    Lt,
    Gt,
    Eq,
    NotEq,

    Comma,
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    Function,
    Let,
    If,
    Else,
    Return,
    True,
    False,
}

impl fmt::Display for TokenTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenTag::Illegal => "ILLEGAL",
            TokenTag::Eof => "EOF",
            TokenTag::Ident => "IDENT",
            TokenTag::Int => "INT",
            TokenTag::Assign => "=",
            TokenTag::Plus => "+",
            TokenTag::Minus => "-",
            TokenTag::Asterisk => "*",
            TokenTag::Slash => "/",
            TokenTag::Bang => "!",
            TokenTag::Lt => "<",
            TokenTag::Gt => ">",
            TokenTag::Eq => "==",
            TokenTag::NotEq => "!=",
            TokenTag::Comma => ",",
            TokenTag::Semicolon => ";",
            TokenTag::LParen => "(",
            TokenTag::RParen => ")",
            TokenTag::LBrace => "{",
            TokenTag::RBrace => "}",
            TokenTag::Function => "FUNCTION",
            TokenTag::Let => "LET",
            TokenTag::If => "IF",
            TokenTag::Else => "ELSE",
            TokenTag::Return => "RETURN",
            TokenTag::True => "TRUE",
            TokenTag::False => "FALSE",
        };
        write!(f, "{}", name)
    }
}

/// A tag plus the exact text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub tag: TokenTag,
    pub text: String,
}

impl Token {
    pub fn new(tag: TokenTag, text: impl Into<String>) -> Token {
        Token {
            tag,
            text: text.into(),
        }
    }

    pub fn eof() -> Token {
        Token::new(TokenTag::Eof, "")
    }

    pub fn is(&self, tag: TokenTag) -> bool {
        self.tag == tag
    }
}

pub const KEYWORDS: &[(&str, TokenTag)] = &[
    ("fn", TokenTag::Function),
    ("let", TokenTag::Let),
    ("if", TokenTag::If),
    ("else", TokenTag::Else),
    ("return", TokenTag::Return),
    ("true", TokenTag::True),
    ("false", TokenTag::False),
];

/// Tells a keyword apart from an ordinary identifier.
pub fn lookup_ident(ident: &str) -> TokenTag {
    for (keyword, tag) in KEYWORDS {
        if *keyword == ident {
            return *tag;
        }
    }
    TokenTag::Ident
}
