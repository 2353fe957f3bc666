use crate::lexer::LexError;
use crate::source::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    UnexpectedToken { expected: String, found: String },
    UnexpectedEndOfInput { expected: String },
    RecursionLimitExceeded { limit: usize },
    Lex(LexError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserError {
    pub kind: ParserErrorKind,
    pub location: SourceLocation,
}

pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    pub fn unexpected_token(location: SourceLocation, expected: &str, found: String) -> Self {
        Self {
            kind: ParserErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found,
            },
            location,
        }
    }

    pub fn unexpected_end_of_input(location: SourceLocation, expected: &str) -> Self {
        Self {
            kind: ParserErrorKind::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
            location,
        }
    }

    pub fn recursion_limit_exceeded(location: SourceLocation, limit: usize) -> Self {
        Self {
            kind: ParserErrorKind::RecursionLimitExceeded { limit },
            location,
        }
    }
}

impl From<LexError> for ParserError {
    fn from(error: LexError) -> Self {
        let location = error.location;
        Self {
            kind: ParserErrorKind::Lex(error),
            location,
        }
    }
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.kind {
            ParserErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "error: expected {expected} but found {found}")
            }
            ParserErrorKind::UnexpectedEndOfInput { expected } => {
                write!(f, "error: expected {expected} but reached end of input")
            }
            ParserErrorKind::RecursionLimitExceeded { limit } => {
                write!(f, "error: brackets nested deeper than {limit} levels")
            }
            ParserErrorKind::Lex(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for ParserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParserErrorKind::Lex(error) => Some(error),
            _ => None,
        }
    }
}
