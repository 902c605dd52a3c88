use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum LexError {
    #[error("unrecognized character '{0}'")]
    UnrecognizedChar(char),
    #[error("reached end of file while reading string")]
    UnterminatedString,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, Error)]
pub enum ParseError {
    #[error("Failed to lex token, because: {0}")]
    Lex(#[from] LexError),
    #[error("Expected {expected}, but got '{actual}'")]
    UnexpectedToken {
        expected: &'static str,
        actual: String,
    },
    #[error("Expected {expected}, but reached end of file")]
    UnexpectedEof { expected: &'static str },
    #[error("Integer literal '{0}' does not fit into 64 bits")]
    InvalidIntLiteral(String),
    #[error("Invalid escape sequence '\\{0}' in string literal")]
    InvalidEscape(char),
    #[error("Nesting is deeper than {0} levels")]
    NestingTooDeep(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_is_wrapped_with_cause() {
        let err = ParseError::from(LexError::UnrecognizedChar('`'));
        assert_eq!(
            "Failed to lex token, because: unrecognized character '`'",
            err.to_string()
        );
    }

    #[test]
    fn test_unexpected_token_message() {
        let err = ParseError::UnexpectedToken {
            expected: "':'",
            actual: "Int".to_owned(),
        };
        assert_eq!("Expected ':', but got 'Int'", err.to_string());
    }
}
