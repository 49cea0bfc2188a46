use crate::token::{self, Token, TokenTag};

/// Single-pass scanner over the bytes of a source string. Used by Parser.
///
/// Whitespace separates tokens but is otherwise ignored:
///
/// ```
/// # use monkey_interp::lexer::Lexer;
/// # use monkey_interp::token::TokenTag;
/// let mut lexer = Lexer::new("let  x\n=\t5;");
/// let tags: Vec<TokenTag> = lexer.by_ref().map(|t| t.tag).collect();
///
/// assert_eq!(tags, vec![
///     TokenTag::Let, TokenTag::Ident, TokenTag::Assign, TokenTag::Int, TokenTag::Semicolon,
/// ]);
/// ```
///
/// Once the input is exhausted, the end-of-input token keeps coming back:
///
/// ```
/// # use monkey_interp::lexer::Lexer;
/// # use monkey_interp::token::TokenTag;
/// let mut lexer = Lexer::new("");
///
/// assert_eq!(lexer.next_token().tag, TokenTag::Eof);
/// assert_eq!(lexer.next_token().tag, TokenTag::Eof);
/// ```
///
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a [u8],
    // byte under examination; 0 once past the end.
    ch: u8,
    // position of `ch`
    pos: usize,
    read_pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        let mut lexer = Lexer {
            input: input.as_bytes(),
            ch: 0,
            pos: 0,
            read_pos: 0,
        };
        lexer.read_char();
        lexer
    }

    pub fn next_token(&mut self) -> Token {
        self.consume_whitespace();

        let single = match self.ch {
            0 if self.pos >= self.input.len() => return Token::eof(),
            b'=' => {
                if self.peek_char() == b'=' {
                    return self.two_char_token(TokenTag::Eq);
                }
                TokenTag::Assign
            },
            b'!' => {
                if self.peek_char() == b'=' {
                    return self.two_char_token(TokenTag::NotEq);
                }
                TokenTag::Bang
            },
            b'+' => TokenTag::Plus,
            b'-' => TokenTag::Minus,
            b'*' => TokenTag::Asterisk,
            b'/' => TokenTag::Slash,
            b'<' => TokenTag::Lt,
            b'>' => TokenTag::Gt,
            b',' => TokenTag::Comma,
            b';' => TokenTag::Semicolon,
            b'(' => TokenTag::LParen,
            b')' => TokenTag::RParen,
            b'{' => TokenTag::LBrace,
            b'}' => TokenTag::RBrace,
            c if is_letter(c) => {
                let ident = self.read_while(is_letter);
                return Token::new(token::lookup_ident(&ident), ident);
            },
            c if c.is_ascii_digit() => {
                let digits = self.read_while(|c| c.is_ascii_digit());
                return Token::new(TokenTag::Int, digits);
            },
            _ => TokenTag::Illegal,
        };

        // a non-ASCII byte is still carried as a single byte.
        let text = String::from_utf8_lossy(&[self.ch]).into_owned();
        self.read_char();
        Token::new(single, text)
    }

    fn read_char(&mut self) {
        self.ch = self.peek_char();
        self.pos = self.read_pos;
        if self.read_pos <= self.input.len() {
            self.read_pos += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        match self.input.get(self.read_pos) {
            Some(c) => *c,
            None => 0,
        }
    }

    fn two_char_token(&mut self, tag: TokenTag) -> Token {
        let start = self.pos;
        self.read_char();
        self.read_char();
        Token::new(tag, self.slice(start, self.pos))
    }

    fn read_while(&mut self, accept: impl Fn(u8) -> bool) -> String {
        let start = self.pos;
        while self.pos < self.input.len() && accept(self.ch) {
            self.read_char();
        }
        self.slice(start, self.pos)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    fn consume_whitespace(&mut self) {
        while let b' ' | b'\t' | b'\n' | b'\r' = self.ch {
            self.read_char();
        }
    }
}

/// Yields every token before end-of-input.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenTag::Eof) {
            None
        } else {
            Some(token)
        }
    }
}

fn is_letter(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c == b'?'
}
