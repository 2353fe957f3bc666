//! Lowered tree produced by semantic analysis. Identifiers are resolved to
//! slot ids, constants are already inlined as literals, and brackets and
//! other grammar-only structure are gone.

use std::fmt;
use string_interner::DefaultSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    DivisionByZero,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::DivisionByZero => write!(f, "division by zero"),
        }
    }
}

impl std::error::Error for ArithmeticError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl BinaryOperator {
    /// Two's complement arithmetic on i64. Overflow wraps; division truncates
    /// toward zero.
    pub fn apply(self, lhs: i64, rhs: i64) -> Result<i64, ArithmeticError> {
        match self {
            BinaryOperator::Plus => Ok(lhs.wrapping_add(rhs)),
            BinaryOperator::Minus => Ok(lhs.wrapping_sub(rhs)),
            BinaryOperator::Multiply => Ok(lhs.wrapping_mul(rhs)),
            BinaryOperator::Divide => {
                if rhs == 0 {
                    Err(ArithmeticError::DivisionByZero)
                } else {
                    Ok(lhs.wrapping_div(rhs))
                }
            }
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl UnaryOperator {
    pub fn apply(self, operand: i64) -> i64 {
        match self {
            UnaryOperator::Plus => operand,
            UnaryOperator::Minus => operand.wrapping_neg(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOperator::Plus => "+",
            UnaryOperator::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arithmetic {
    Binary {
        op: BinaryOperator,
        left: Box<Arithmetic>,
        right: Box<Arithmetic>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Arithmetic>,
    },
    Literal(i64),
    /// Parameter or variable reference.
    Identifier {
        id: usize,
        name: DefaultSymbol,
    },
}

impl Arithmetic {
    pub fn binary(op: BinaryOperator, left: Arithmetic, right: Arithmetic) -> Self {
        Arithmetic::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: Arithmetic) -> Self {
        Arithmetic::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn as_literal(&self) -> Option<i64> {
        match self {
            Arithmetic::Literal(value) => Some(*value),
            _ => None,
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Arithmetic::Literal(_) | Arithmetic::Identifier { .. })
    }

    /// Move every child that has children of its own into `detached`,
    /// leaving a literal in its place.
    fn detach_subtrees(&mut self, detached: &mut Vec<Arithmetic>) {
        let children: [Option<&mut Box<Arithmetic>>; 2] = match self {
            Arithmetic::Binary { left, right, .. } => [Some(left), Some(right)],
            Arithmetic::Unary { operand, .. } => [Some(operand), None],
            Arithmetic::Literal(_) | Arithmetic::Identifier { .. } => [None, None],
        };
        for child in children.into_iter().flatten() {
            if !child.is_leaf() {
                detached.push(std::mem::replace(&mut **child, Arithmetic::Literal(0)));
            }
        }
    }
}

// Operator chains lean right and can be as long as the source, so the tree
// is torn down with an explicit stack instead of one stack frame per level.
impl Drop for Arithmetic {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_subtrees(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_subtrees(&mut detached);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentExpression {
    pub id: usize,
    pub name: DefaultSymbol,
    pub value: Arithmetic,
}

/// Statements form a chain that always ends in `Return`.
///
/// A function may hold any number of statements, so `Clone`, `PartialEq`,
/// `Debug` and `Drop` all walk the chain in a loop.
pub enum Statement {
    Normal {
        assignment: AssignmentExpression,
        next: Box<Statement>,
    },
    Return(Arithmetic),
}

impl Statement {
    /// Chain `assignments`, in order, in front of `RETURN value`.
    pub fn chain(assignments: Vec<AssignmentExpression>, value: Arithmetic) -> Self {
        assignments
            .into_iter()
            .rev()
            .fold(Statement::Return(value), |next, assignment| Statement::Normal {
                assignment,
                next: Box::new(next),
            })
    }

    pub fn iter(&self) -> Statements<'_> {
        Statements { next: Some(self) }
    }
}

impl Clone for Statement {
    fn clone(&self) -> Self {
        let mut assignments = vec![];
        let mut statement = self;
        loop {
            match statement {
                Statement::Normal { assignment, next } => {
                    assignments.push(assignment.clone());
                    statement = &**next;
                }
                Statement::Return(value) => return Statement::chain(assignments, value.clone()),
            }
        }
    }
}

impl PartialEq for Statement {
    fn eq(&self, other: &Self) -> bool {
        let (mut lhs, mut rhs) = (self, other);
        loop {
            match (lhs, rhs) {
                (
                    Statement::Normal { assignment: a, next: lhs_next },
                    Statement::Normal { assignment: b, next: rhs_next },
                ) => {
                    if a != b {
                        return false;
                    }
                    lhs = &**lhs_next;
                    rhs = &**rhs_next;
                }
                (Statement::Return(a), Statement::Return(b)) => return a == b,
                _ => return false,
            }
        }
    }
}

impl Eq for Statement {}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for statement in self.iter() {
            match statement {
                Statement::Normal { assignment, .. } => list.entry(assignment),
                Statement::Return(value) => list.entry(&format_args!("Return({value:?})")),
            };
        }
        list.finish()
    }
}

impl Drop for Statement {
    fn drop(&mut self) {
        let mut rest = match self {
            Statement::Normal { next, .. } => detach_next(next),
            Statement::Return(_) => return,
        };
        while let Statement::Normal { next, .. } = &mut rest {
            let following = detach_next(next);
            rest = following;
        }
    }
}

fn detach_next(next: &mut Box<Statement>) -> Statement {
    std::mem::replace(&mut **next, Statement::Return(Arithmetic::Literal(0)))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub statement: Statement,
}

impl Function {
    pub fn new(statement: Statement) -> Self {
        Self { statement }
    }

    /// Statements in execution order; the last one is always the return.
    pub fn statements(&self) -> Statements<'_> {
        self.statement.iter()
    }

    pub fn return_expression(&self) -> &Arithmetic {
        let mut statement = &self.statement;
        loop {
            match statement {
                Statement::Normal { next, .. } => statement = &**next,
                Statement::Return(expression) => return expression,
            }
        }
    }
}

pub struct Statements<'a> {
    next: Option<&'a Statement>,
}

impl<'a> Iterator for Statements<'a> {
    type Item = &'a Statement;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if let Statement::Normal { next, .. } = current {
            self.next = Some(&**next);
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use string_interner::DefaultStringInterner;

    #[rstest]
    #[case(BinaryOperator::Plus, 2, 3, 5)]
    #[case(BinaryOperator::Minus, 2, 3, -1)]
    #[case(BinaryOperator::Multiply, -4, 3, -12)]
    #[case(BinaryOperator::Divide, 7, 2, 3)]
    #[case(BinaryOperator::Divide, -7, 2, -3)]
    #[case(BinaryOperator::Plus, i64::MAX, 1, i64::MIN)]
    #[case(BinaryOperator::Divide, i64::MIN, -1, i64::MIN)]
    fn binary_arithmetic(#[case] op: BinaryOperator, #[case] lhs: i64, #[case] rhs: i64, #[case] expected: i64) {
        assert_eq!(op.apply(lhs, rhs), Ok(expected));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(BinaryOperator::Divide.apply(1, 0), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn unary_arithmetic() {
        assert_eq!(UnaryOperator::Plus.apply(-3), -3);
        assert_eq!(UnaryOperator::Minus.apply(-3), 3);
        assert_eq!(UnaryOperator::Minus.apply(i64::MIN), i64::MIN);
    }

    #[test]
    fn statements_follow_the_chain() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let a = interner.get_or_intern("a");
        let b = interner.get_or_intern("b");
        let function = Function::new(Statement::Normal {
            assignment: AssignmentExpression { id: 0, name: a, value: Arithmetic::Literal(1) },
            next: Box::new(Statement::Normal {
                assignment: AssignmentExpression { id: 1, name: b, value: Arithmetic::Literal(2) },
                next: Box::new(Statement::Return(Arithmetic::Identifier { id: 1, name: b })),
            }),
        });

        let ids: Vec<_> = function
            .statements()
            .map(|statement| match statement {
                Statement::Normal { assignment, .. } => Some(assignment.id),
                Statement::Return(_) => None,
            })
            .collect();
        assert_eq!(ids, vec![Some(0), Some(1), None]);
        assert_eq!(function.return_expression(), &Arithmetic::Identifier { id: 1, name: b });
    }

    #[test]
    fn as_literal_only_matches_literals() {
        let expression = Arithmetic::binary(
            BinaryOperator::Plus,
            Arithmetic::Literal(1),
            Arithmetic::unary(UnaryOperator::Minus, Arithmetic::Literal(2)),
        );
        assert_eq!(expression.as_literal(), None);
        assert_eq!(Arithmetic::Literal(7).as_literal(), Some(7));
    }

    fn long_chain(interner: &mut DefaultStringInterner, length: usize) -> Statement {
        let v = interner.get_or_intern("v");
        let assignments = (0..length)
            .map(|i| AssignmentExpression {
                id: 0,
                name: v,
                value: Arithmetic::binary(
                    BinaryOperator::Plus,
                    Arithmetic::Identifier { id: 0, name: v },
                    Arithmetic::Literal(i as i64),
                ),
            })
            .collect();
        Statement::chain(assignments, Arithmetic::Identifier { id: 0, name: v })
    }

    #[test]
    fn long_statement_chains_clone_compare_and_drop() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let chain = long_chain(&mut interner, 200_000);
        let copy = chain.clone();
        assert!(chain == copy);
        assert_eq!(copy.iter().count(), 200_001);

        let shorter = long_chain(&mut interner, 199_999);
        assert!(chain != shorter);
        drop(chain);
        drop(copy);
        drop(shorter);
    }

    #[test]
    fn long_right_leaning_expressions_drop() {
        let mut expression = Arithmetic::Literal(0);
        for i in 0..200_000 {
            expression = Arithmetic::binary(BinaryOperator::Minus, Arithmetic::Literal(i), expression);
        }
        drop(expression);

        let mut expression = Arithmetic::Literal(1);
        for _ in 0..200_000 {
            expression = Arithmetic::unary(UnaryOperator::Minus, expression);
        }
        drop(expression);
    }

    #[test]
    fn chain_keeps_assignment_order() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let chain = long_chain(&mut interner, 3);
        let values: Vec<_> = chain
            .iter()
            .filter_map(|statement| match statement {
                Statement::Normal { assignment, .. } => match &assignment.value {
                    Arithmetic::Binary { right, .. } => right.as_literal(),
                    _ => None,
                },
                Statement::Return(_) => None,
            })
            .collect();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(format!("{:?}", Statement::Return(Arithmetic::Literal(4))), "[Return(Literal(4))]");
    }
}
