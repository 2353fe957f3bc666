use compiler_core::CompiledFunction;
use frontend::ast::{Arithmetic, AssignmentExpression, Statement};
use crate::environment::Environment;
use crate::error::InterpreterError;

/// Tree-walking evaluator over a `CompiledFunction`.
///
/// The context only borrows the function; slot storage is created per call
/// in `evaluate_function`.
pub struct EvaluationContext<'a> {
    function: &'a CompiledFunction,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(function: &'a CompiledFunction) -> Self {
        Self { function }
    }

    /// Bind `parameters` to the parameter slots in declaration order and run
    /// the statement chain up to its `RETURN`.
    pub fn evaluate_function(&self, parameters: &[i64]) -> Result<i64, InterpreterError> {
        let mut env = Environment::new(&self.function.slots, self.function.parameter_count, parameters)?;
        let mut statement = &self.function.ast.statement;
        loop {
            match statement {
                Statement::Normal { assignment, next } => {
                    self.evaluate_assignment(&mut env, assignment)?;
                    statement = &**next;
                }
                Statement::Return(expression) => {
                    let result = self.evaluate(&env, expression)?;
                    frontend::debug_log!("evaluation: {:?} -> {}", parameters, result);
                    return Ok(result);
                }
            }
        }
    }

    pub fn evaluate_assignment(
        &self,
        env: &mut Environment,
        assignment: &AssignmentExpression,
    ) -> Result<(), InterpreterError> {
        let value = self.evaluate(env, &assignment.value)?;
        env.set(assignment.id, value)
    }

    /// Operands are evaluated left to right. The right spine of an operator
    /// chain is walked in a loop; only left operands and unary operands
    /// recurse, and those nest no deeper than the brackets in the source.
    pub fn evaluate(&self, env: &Environment, expression: &Arithmetic) -> Result<i64, InterpreterError> {
        let mut pending = Vec::new();
        let mut expression = expression;
        let mut value = loop {
            match expression {
                Arithmetic::Binary { op, left, right } => {
                    pending.push((*op, self.evaluate(env, left)?));
                    expression = &**right;
                }
                Arithmetic::Unary { op, operand } => break op.apply(self.evaluate(env, operand)?),
                Arithmetic::Literal(value) => break *value,
                Arithmetic::Identifier { id, .. } => break env.get(*id)?,
            }
        };
        while let Some((op, lhs)) = pending.pop() {
            value = op.apply(lhs, value)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compiler_core::{CompileOptions, CompilerSession};
    use rstest::rstest;

    fn compile(text: &str, optimize: bool) -> CompiledFunction {
        let options = CompileOptions { optimize, ..CompileOptions::default() };
        CompilerSession::with_options(options).compile_str(text).unwrap()
    }

    fn run(text: &str, parameters: &[i64]) -> Result<i64, InterpreterError> {
        let function = compile(text, true);
        EvaluationContext::new(&function).evaluate_function(parameters)
    }

    #[rstest]
    #[case("BEGIN RETURN 10 - 3 - 2 END.", 9)]
    #[case("BEGIN RETURN 100 / 10 / 5 END.", 50)]
    #[case("BEGIN RETURN (10 - 3) - 2 END.", 5)]
    #[case("BEGIN RETURN 1 + 2 * 3 END.", 7)]
    #[case("BEGIN RETURN -7 / 2 END.", -3)]
    #[case("BEGIN RETURN -(-5) END.", 5)]
    #[case("BEGIN RETURN +5 END.", 5)]
    fn literal_expressions(#[case] text: &str, #[case] expected: i64) {
        assert_eq!(run(text, &[]), Ok(expected));
        let unoptimized = compile(text, false);
        assert_eq!(EvaluationContext::new(&unoptimized).evaluate_function(&[]), Ok(expected));
    }

    #[test]
    fn variables_start_at_zero() {
        assert_eq!(run("VAR v; BEGIN RETURN v END.", &[]), Ok(0));
    }

    #[test]
    fn assignments_run_in_order() {
        let text = "PARAM a; VAR b; BEGIN b := a * 2; a := b + 1; b := a * b; RETURN b END.";
        // a = 3: b = 6, a = 7, b = 42
        assert_eq!(run(text, &[3]), Ok(42));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let function = compile("PARAM x; VAR y; BEGIN y := y + x; RETURN y END.", true);
        let context = EvaluationContext::new(&function);
        assert_eq!(context.evaluate_function(&[5]), Ok(5));
        assert_eq!(context.evaluate_function(&[5]), Ok(5));
    }

    #[test]
    fn division_by_zero_at_run_time() {
        assert_eq!(run("PARAM d; BEGIN RETURN 1 / d END.", &[0]), Err(InterpreterError::DivisionByZero));
        assert_eq!(run("BEGIN RETURN 1 / (2 - 2) END.", &[]), Err(InterpreterError::DivisionByZero));
    }

    #[test]
    fn parameter_count_mismatch() {
        let err = run("PARAM a, b; BEGIN RETURN a END.", &[1]).unwrap_err();
        assert_eq!(err, InterpreterError::ParameterCountMismatch { expected: 2, found: 1 });
    }

    #[test]
    fn invalid_slot_in_hand_built_function() {
        let mut function = compile("BEGIN RETURN 1 END.", true);
        let mut interner: string_interner::DefaultStringInterner = string_interner::DefaultStringInterner::new();
        let name = interner.get_or_intern("ghost");
        function.ast.statement = Statement::Return(Arithmetic::Identifier { id: 3, name });
        let err = EvaluationContext::new(&function).evaluate_function(&[]).unwrap_err();
        assert_eq!(err, InterpreterError::InvalidSlot(3));
    }

    #[test]
    fn long_flat_chains_evaluate_without_folding() {
        let terms = vec!["1"; 300].join(" + ");
        let text = format!("BEGIN RETURN {terms} END.");
        let function = compile(&text, false);
        assert_eq!(EvaluationContext::new(&function).evaluate_function(&[]), Ok(300));

        // 1 - (1 - (1 - ...)) over an even number of ones is 0
        let text = format!("PARAM x; BEGIN RETURN x - {} END.", vec!["1"; 100_000].join(" - "));
        let function = compile(&text, false);
        assert_eq!(EvaluationContext::new(&function).evaluate_function(&[100_000]), Ok(100_000));
    }

    #[test]
    fn first_error_along_a_chain_wins() {
        assert_eq!(
            run("PARAM a; BEGIN RETURN 1 + 2 * (3 / a) - 4 END.", &[0]),
            Err(InterpreterError::DivisionByZero)
        );
    }
}
