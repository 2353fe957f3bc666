use frontend::{CompileError, SourceCode, SourceLocation};
use crate::error::InterpreterError;

/// Renders errors for a terminal: compile errors point into the source with
/// a caret line, run-time errors are a single line.
pub struct ErrorFormatter<'a> {
    source: &'a SourceCode,
}

impl<'a> ErrorFormatter<'a> {
    pub fn new(source: &'a SourceCode) -> Self {
        Self { source }
    }

    pub fn format_compile_error(&self, error: &CompileError) -> String {
        self.format_error_with_location(&error.message(), &error.location())
    }

    pub fn format_runtime_error(&self, error: &InterpreterError) -> String {
        format!("error: {error}\n")
    }

    pub fn format_error_with_location(&self, message: &str, location: &SourceLocation) -> String {
        self.source.render_diagnostic(location, message)
    }
}
