use std::fmt;
use crate::lexer::LexError;
use crate::parser::{ParserError, ParserErrorKind};
use crate::semantic_analyzer::SemanticError;
use crate::source::SourceLocation;

/// Any error that stops a compilation, tagged with the stage that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lex(LexError),
    Syntax(ParserError),
    Semantic(SemanticError),
}

impl CompileError {
    pub fn location(&self) -> SourceLocation {
        match self {
            CompileError::Lex(error) => error.location,
            CompileError::Syntax(error) => error.location,
            CompileError::Semantic(error) => error.location,
        }
    }

    /// The one-line message, without location.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn stage(&self) -> &'static str {
        match self {
            CompileError::Lex(_) => "lexical analysis",
            CompileError::Syntax(_) => "syntax analysis",
            CompileError::Semantic(_) => "semantic analysis",
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Lex(error) => write!(f, "{error}"),
            CompileError::Syntax(error) => write!(f, "{error}"),
            CompileError::Semantic(error) => write!(f, "{error}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Lex(error) => Some(error),
            CompileError::Syntax(error) => Some(error),
            CompileError::Semantic(error) => Some(error),
        }
    }
}

impl From<LexError> for CompileError {
    fn from(error: LexError) -> Self {
        CompileError::Lex(error)
    }
}

/// Lexer failures surfacing through the parser are reported as lexical
/// errors, not syntax errors.
impl From<ParserError> for CompileError {
    fn from(error: ParserError) -> Self {
        match error.kind {
            ParserErrorKind::Lex(error) => CompileError::Lex(error),
            _ => CompileError::Syntax(error),
        }
    }
}

impl From<SemanticError> for CompileError {
    fn from(error: SemanticError) -> Self {
        CompileError::Semantic(error)
    }
}
