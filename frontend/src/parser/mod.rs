pub mod core;
pub mod expr;
pub mod stmt;
pub mod token_source;
pub mod error;


pub use core::{Parser, DEFAULT_MAX_RECURSION_DEPTH};
pub use error::{ParserError, ParserErrorKind, ParserResult};
