pub mod ast;
pub mod dot;
pub mod error;
pub mod lexer;
pub mod optimizer;
pub mod parse_tree;
pub mod parser;
pub mod semantic_analyzer;
pub mod source;
pub mod token;

pub use error::CompileError;
pub use lexer::{LexError, LexErrorKind, Lexer};
pub use optimizer::ConstantPropagation;
pub use parser::{Parser, ParserError, ParserErrorKind, ParserResult, DEFAULT_MAX_RECURSION_DEPTH};
pub use semantic_analyzer::{SemanticAnalyzer, SemanticError, SemanticErrorKind, SymbolTable};
pub use source::{SourceCode, SourceLocation};

/// Whether the crate was built with the `debug-logging` feature.
pub const fn is_debug_logging_enabled() -> bool {
    cfg!(feature = "debug-logging")
}

/// Stage-progress output on stderr, compiled in only with `debug-logging`.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::is_debug_logging_enabled() {
            eprintln!("[debug] {}", format_args!($($arg)*));
        }
    };
}
