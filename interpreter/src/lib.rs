pub mod environment;
pub mod error;
pub mod error_formatter;
pub mod evaluation;

use std::sync::Arc;
use compiler_core::{CompileOptions, CompiledFunction, CompilerSession};
use frontend::{CompileError, SourceCode};
use crate::error::InterpreterError;
use crate::evaluation::EvaluationContext;

pub use crate::environment::Environment;
pub use crate::error_formatter::ErrorFormatter;

/// Registry of compiled functions.
///
/// Functions are compiled when registered. The registry and every handle
/// share ownership of the compiled function, so a handle stays valid after
/// the registry is dropped.
pub struct Pljit {
    session: CompilerSession,
    functions: Vec<Arc<CompiledFunction>>,
}

impl Pljit {
    pub fn new() -> Self {
        Self::with_options(CompileOptions::default())
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            session: CompilerSession::with_options(options),
            functions: Vec::new(),
        }
    }

    pub fn register_function(&mut self, code: &str) -> Result<FunctionHandle, CompileError> {
        self.register_source(&SourceCode::new(code))
    }

    pub fn register_source(&mut self, source: &SourceCode) -> Result<FunctionHandle, CompileError> {
        let function = Arc::new(self.session.compile(source)?);
        self.functions.push(Arc::clone(&function));
        frontend::debug_log!("registered function #{}", self.functions.len() - 1);
        Ok(FunctionHandle { function })
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

impl Default for Pljit {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheap, cloneable reference to a registered function.
#[derive(Debug, Clone)]
pub struct FunctionHandle {
    function: Arc<CompiledFunction>,
}

impl FunctionHandle {
    /// Evaluate with `parameters` bound in declaration order. Every call
    /// gets fresh slots, so handles may be called from several threads.
    pub fn call(&self, parameters: &[i64]) -> Result<i64, InterpreterError> {
        EvaluationContext::new(&self.function).evaluate_function(parameters)
    }

    pub fn parameter_count(&self) -> usize {
        self.function.parameter_count
    }

    pub fn function(&self) -> &CompiledFunction {
        &self.function
    }
}
