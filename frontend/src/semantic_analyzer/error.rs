use std::fmt;
use crate::source::SourceLocation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticErrorKind {
    DuplicateIdentifier { name: String, previous: SourceLocation },
    UndeclaredIdentifier { name: String },
    AssignmentToConstant { name: String },
    /// The statement list does not end in `RETURN`.
    MissingReturn,
    /// A `RETURN` followed by further statements.
    StatementAfterReturn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub location: SourceLocation,
}

impl SemanticError {
    pub fn duplicate_identifier(name: &str, location: SourceLocation, previous: SourceLocation) -> Self {
        Self {
            kind: SemanticErrorKind::DuplicateIdentifier {
                name: name.to_string(),
                previous,
            },
            location,
        }
    }

    pub fn undeclared_identifier(name: &str, location: SourceLocation) -> Self {
        Self {
            kind: SemanticErrorKind::UndeclaredIdentifier { name: name.to_string() },
            location,
        }
    }

    pub fn assignment_to_constant(name: &str, location: SourceLocation) -> Self {
        Self {
            kind: SemanticErrorKind::AssignmentToConstant { name: name.to_string() },
            location,
        }
    }

    pub fn missing_return(location: SourceLocation) -> Self {
        Self { kind: SemanticErrorKind::MissingReturn, location }
    }

    pub fn statement_after_return(location: SourceLocation) -> Self {
        Self { kind: SemanticErrorKind::StatementAfterReturn, location }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SemanticErrorKind::DuplicateIdentifier { name, previous } => write!(
                f,
                "error: identifier \"{name}\" is already declared at {previous}"
            ),
            SemanticErrorKind::UndeclaredIdentifier { name } => {
                write!(f, "error: identifier \"{name}\" is not declared")
            }
            SemanticErrorKind::AssignmentToConstant { name } => {
                write!(f, "error: cannot assign to constant \"{name}\"")
            }
            SemanticErrorKind::MissingReturn => {
                write!(f, "error: last statement must be a RETURN statement")
            }
            SemanticErrorKind::StatementAfterReturn => {
                write!(f, "error: statement after RETURN is never executed")
            }
        }
    }
}

impl std::error::Error for SemanticError {}
