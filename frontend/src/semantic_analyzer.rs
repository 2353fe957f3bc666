pub mod error;
pub mod symbol_table;


pub use error::{SemanticError, SemanticErrorKind};
pub use symbol_table::{Identifier, IdentifierClass, SymbolTable};

use string_interner::DefaultStringInterner;
use crate::ast::{self, Arithmetic, BinaryOperator, UnaryOperator};
use crate::parse_tree::*;
use crate::source::SourceLocation;

/// Resolves names and lowers a parse tree into an `ast::Function`.
///
/// Declarations are registered first (parameters, then variables, then
/// constants, so ids come out in that order), after which the statements are
/// lowered in source order. References to constants become literals.
pub struct SemanticAnalyzer<'a> {
    string_interner: &'a mut DefaultStringInterner,
    symbols: SymbolTable,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(string_interner: &'a mut DefaultStringInterner) -> Self {
        SemanticAnalyzer {
            string_interner,
            symbols: SymbolTable::new(),
        }
    }

    pub fn analyse_function(
        mut self,
        function: &FunctionDefinition,
    ) -> Result<(ast::Function, SymbolTable), SemanticError> {
        if let Some(parameters) = &function.parameters {
            for identifier in parameters.declarators.identifiers() {
                self.declare(identifier, IdentifierClass::Parameter, None)?;
            }
        }
        if let Some(variables) = &function.variables {
            for identifier in variables.declarators.identifiers() {
                self.declare(identifier, IdentifierClass::Variable, None)?;
            }
        }
        if let Some(constants) = &function.constants {
            for declarator in constants.declarators.declarators() {
                let value = Some(declarator.literal.value);
                self.declare(&declarator.identifier, IdentifierClass::Constant, value)?;
            }
        }
        crate::debug_log!(
            "semantic analysis: {} parameter(s), {} variable(s), {} constant(s)",
            self.symbols.parameter_count(),
            self.symbols.count(IdentifierClass::Variable),
            self.symbols.count(IdentifierClass::Constant)
        );

        let statement = self.lower_compound_statement(&function.compound_statement)?;
        Ok((ast::Function::new(statement), self.symbols))
    }

    fn declare(
        &mut self,
        identifier: &IdentifierTerminal,
        class: IdentifierClass,
        value: Option<i64>,
    ) -> Result<usize, SemanticError> {
        let name = self.string_interner.get_or_intern(&identifier.name);
        self.symbols
            .add(name, identifier.location, class, value)
            .map_err(|previous| {
                SemanticError::duplicate_identifier(&identifier.name, identifier.location, previous)
            })
    }

    fn resolve(&self, identifier: &IdentifierTerminal) -> Result<&Identifier, SemanticError> {
        self.string_interner
            .get(&identifier.name)
            .and_then(|name| self.symbols.get(name))
            .ok_or_else(|| SemanticError::undeclared_identifier(&identifier.name, identifier.location))
    }

    // Only the last statement may be (and must be) a RETURN. Statements are
    // lowered front to back so the first error in the source is the one
    // reported, then chained from the back.
    fn lower_compound_statement(&mut self, compound: &CompoundStatement) -> Result<ast::Statement, SemanticError> {
        let statements: Vec<&Statement> = compound.statements.statements().collect();
        let mut assignments = Vec::with_capacity(statements.len());
        let mut result = None;

        for (index, statement) in statements.iter().enumerate() {
            match statement {
                Statement::Assignment(assignment) => {
                    assignments.push(self.lower_assignment(assignment)?);
                }
                Statement::Return { expression, .. } => {
                    let value = self.lower_additive_expression(expression)?;
                    if let Some(next) = statements.get(index + 1) {
                        return Err(SemanticError::statement_after_return(statement_location(next)));
                    }
                    result = Some(value);
                }
            }
        }

        let result = result.ok_or_else(|| SemanticError::missing_return(compound.end.location))?;
        Ok(ast::Statement::chain(assignments, result))
    }

    fn lower_assignment(
        &mut self,
        assignment: &AssignmentExpression,
    ) -> Result<ast::AssignmentExpression, SemanticError> {
        let target = self.resolve(&assignment.target)?;
        if target.class == IdentifierClass::Constant {
            return Err(SemanticError::assignment_to_constant(
                &assignment.target.name,
                assignment.target.location,
            ));
        }
        let (id, name) = (target.id, target.name);
        let value = self.lower_additive_expression(&assignment.expression)?;
        Ok(ast::AssignmentExpression { id, name, value })
    }

    fn lower_additive_expression(&self, expression: &AdditiveExpression) -> Result<Arithmetic, SemanticError> {
        let first = self.lower_multiplicative_expression(&expression.first)?;
        let mut rest = Vec::with_capacity(expression.rest.len());
        for (op, _, operand) in &expression.rest {
            let op = match op {
                AdditiveOperator::Plus => BinaryOperator::Plus,
                AdditiveOperator::Minus => BinaryOperator::Minus,
            };
            rest.push((op, self.lower_multiplicative_expression(operand)?));
        }
        Ok(group_to_the_right(first, rest))
    }

    fn lower_multiplicative_expression(
        &self,
        expression: &MultiplicativeExpression,
    ) -> Result<Arithmetic, SemanticError> {
        let first = self.lower_unary_expression(&expression.first)?;
        let mut rest = Vec::with_capacity(expression.rest.len());
        for (op, _, operand) in &expression.rest {
            let op = match op {
                MultiplicativeOperator::Multiply => BinaryOperator::Multiply,
                MultiplicativeOperator::Divide => BinaryOperator::Divide,
            };
            rest.push((op, self.lower_unary_expression(operand)?));
        }
        Ok(group_to_the_right(first, rest))
    }

    fn lower_unary_expression(&self, expression: &UnaryExpression) -> Result<Arithmetic, SemanticError> {
        let operand = self.lower_primary_expression(&expression.primary)?;
        Ok(match expression.sign {
            None => operand,
            Some((UnarySign::Plus, _)) => Arithmetic::unary(UnaryOperator::Plus, operand),
            Some((UnarySign::Minus, _)) => Arithmetic::unary(UnaryOperator::Minus, operand),
        })
    }

    fn lower_primary_expression(&self, expression: &PrimaryExpression) -> Result<Arithmetic, SemanticError> {
        match expression {
            PrimaryExpression::Identifier(identifier) => {
                let resolved = self.resolve(identifier)?;
                Ok(match (resolved.class, resolved.value) {
                    (IdentifierClass::Constant, Some(value)) => Arithmetic::Literal(value),
                    _ => Arithmetic::Identifier {
                        id: resolved.id,
                        name: resolved.name,
                    },
                })
            }
            PrimaryExpression::Literal(literal) => Ok(Arithmetic::Literal(literal.value)),
            PrimaryExpression::Parenthesized { expression, .. } => self.lower_additive_expression(expression),
        }
    }
}

/// `a op1 b op2 c` becomes `a op1 (b op2 c)`. Each operator in `rest` sits
/// between the operand before it and the operand paired with it.
fn group_to_the_right(first: Arithmetic, rest: Vec<(BinaryOperator, Arithmetic)>) -> Arithmetic {
    let mut rest = rest.into_iter().rev();
    let Some((mut op, mut right)) = rest.next() else {
        return first;
    };
    for (previous, left) in rest {
        right = Arithmetic::binary(op, left, right);
        op = previous;
    }
    Arithmetic::binary(op, first, right)
}

fn statement_location(statement: &Statement) -> SourceLocation {
    match statement {
        Statement::Assignment(assignment) => assignment.target.location,
        Statement::Return { keyword, .. } => keyword.location,
    }
}
