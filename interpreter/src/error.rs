use frontend::ast::ArithmeticError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterpreterError {
    ParameterCountMismatch { expected: usize, found: usize },
    DivisionByZero,
    /// An AST id with no slot behind it. Only reachable with an AST that was
    /// not produced by the semantic analyzer.
    InvalidSlot(usize),
}

impl fmt::Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterError::ParameterCountMismatch { expected, found } => {
                write!(f, "function expects {expected} parameter(s) but {found} were supplied")
            }
            InterpreterError::DivisionByZero => write!(f, "division by zero"),
            InterpreterError::InvalidSlot(id) => write!(f, "no slot with id {id}"),
        }
    }
}

impl std::error::Error for InterpreterError {}

impl From<ArithmeticError> for InterpreterError {
    fn from(error: ArithmeticError) -> Self {
        match error {
            ArithmeticError::DivisionByZero => InterpreterError::DivisionByZero,
        }
    }
}
