use crate::token::TokenTag;

/// A syntax diagnostic. The parser collects these instead of stopping at the
/// first one.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected token={expected} got={got}")]
    UnexpectedToken { expected: TokenTag, got: TokenTag },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParser(TokenTag),
    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = ParseError::UnexpectedToken { expected: TokenTag::Assign, got: TokenTag::Int };
        assert_eq!(e.to_string(), "expected token== got=INT");
        let e = ParseError::NoPrefixParser(TokenTag::RParen);
        assert_eq!(e.to_string(), "no prefix parse function for ) found");
        let e = ParseError::InvalidInteger("99999999999999999999".to_string());
        assert_eq!(e.to_string(), "could not parse \"99999999999999999999\" as integer");
    }
}
