#![allow(dead_code)]

use compiler_core::{CompileOptions, CompiledFunction, CompilerSession};
use frontend::CompileError;
use interpreter::{FunctionHandle, Pljit};

/// Register `source` in a fresh registry and hand back the handle.
pub fn register(source: &str) -> FunctionHandle {
    let mut jit = Pljit::new();
    jit.register_function(source)
        .unwrap_or_else(|e| panic!("failed to compile {source:?}: {e}"))
}

/// Compile and evaluate, flattening both error kinds into a string.
pub fn run(source: &str, parameters: &[i64]) -> Result<i64, String> {
    let mut jit = Pljit::new();
    let handle = jit.register_function(source).map_err(|e| format!("compile error: {e}"))?;
    handle.call(parameters).map_err(|e| format!("runtime error: {e}"))
}

pub fn assert_result(source: &str, parameters: &[i64], expected: i64) {
    let result = run(source, parameters).expect("program execution failed");
    assert_eq!(result, expected, "{source}");
}

pub fn compile_error(source: &str) -> CompileError {
    let mut jit = Pljit::new();
    match jit.register_function(source) {
        Ok(_) => panic!("{source:?} compiled but was expected to fail"),
        Err(error) => error,
    }
}

pub fn compile_with(source: &str, optimize: bool) -> CompiledFunction {
    let options = CompileOptions { optimize, ..CompileOptions::default() };
    CompilerSession::with_options(options)
        .compile_str(source)
        .unwrap_or_else(|e| panic!("failed to compile {source:?}: {e}"))
}
