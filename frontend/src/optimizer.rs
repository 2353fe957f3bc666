use crate::ast::{Arithmetic, Function, Statement};

/// Constant propagation over an analysed function.
///
/// Every subtree whose operands are literals is replaced by the literal it
/// evaluates to. Children are folded before their parent, so whole literal
/// expressions collapse into one node. A division by a literal zero is left
/// in place for the evaluator to report.
#[derive(Debug, Default)]
pub struct ConstantPropagation {
    folded: usize,
}

impl ConstantPropagation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of operator nodes replaced so far.
    pub fn folded(&self) -> usize {
        self.folded
    }

    pub fn optimize(&mut self, function: &mut Function) {
        let mut statement = &mut function.statement;
        loop {
            match statement {
                Statement::Normal { assignment, next } => {
                    self.fold(&mut assignment.value);
                    statement = &mut **next;
                }
                Statement::Return(expression) => {
                    self.fold(expression);
                    break;
                }
            }
        }
        crate::debug_log!("constant propagation: {} node(s) folded", self.folded);
    }

    /// Fold `expression` in place.
    pub fn fold(&mut self, expression: &mut Arithmetic) {
        let folded = match expression {
            Arithmetic::Binary { .. } => {
                self.fold_chain(expression);
                None
            }
            Arithmetic::Unary { op, operand } => {
                self.fold(operand);
                operand.as_literal().map(|value| op.apply(value))
            }
            Arithmetic::Literal(_) | Arithmetic::Identifier { .. } => None,
        };
        if let Some(value) = folded {
            *expression = Arithmetic::Literal(value);
            self.folded += 1;
        }
    }

    // `l1 op1 (l2 op2 (... tail))`: the right spine is as long as the operator
    // chain in the source, so it is taken apart into a stack and rebuilt from
    // the bottom. Only left operands and the tail recurse.
    fn fold_chain(&mut self, expression: &mut Arithmetic) {
        let mut links = Vec::new();
        let mut tail = std::mem::replace(expression, Arithmetic::Literal(0));
        while let Arithmetic::Binary { op, left, right } = &mut tail {
            let op = *op;
            let mut left = std::mem::replace(&mut **left, Arithmetic::Literal(0));
            let right = std::mem::replace(&mut **right, Arithmetic::Literal(0));
            self.fold(&mut left);
            links.push((op, left));
            tail = right;
        }
        self.fold(&mut tail);

        while let Some((op, left)) = links.pop() {
            let value = match (left.as_literal(), tail.as_literal()) {
                (Some(lhs), Some(rhs)) => op.apply(lhs, rhs).ok(),
                _ => None,
            };
            tail = match value {
                Some(value) => {
                    self.folded += 1;
                    Arithmetic::Literal(value)
                }
                None => Arithmetic::binary(op, left, tail),
            };
        }
        *expression = tail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AssignmentExpression, BinaryOperator, UnaryOperator};
    use string_interner::DefaultStringInterner;

    fn lit(value: i64) -> Arithmetic {
        Arithmetic::Literal(value)
    }

    #[test]
    fn literal_chain_collapses_to_one_node() {
        // 5 * (10 * 6)
        let mut function = Function::new(Statement::Return(Arithmetic::binary(
            BinaryOperator::Multiply,
            lit(5),
            Arithmetic::binary(BinaryOperator::Multiply, lit(10), lit(6)),
        )));
        let mut optimizer = ConstantPropagation::new();
        optimizer.optimize(&mut function);
        assert_eq!(function.statement, Statement::Return(lit(300)));
        assert_eq!(optimizer.folded(), 2);
    }

    #[test]
    fn identifiers_block_folding_of_their_parent_only() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let x = interner.get_or_intern("x");
        // x + (-(2 * 3))
        let mut expression = Arithmetic::binary(
            BinaryOperator::Plus,
            Arithmetic::Identifier { id: 0, name: x },
            Arithmetic::unary(
                UnaryOperator::Minus,
                Arithmetic::binary(BinaryOperator::Multiply, lit(2), lit(3)),
            ),
        );
        let mut optimizer = ConstantPropagation::new();
        optimizer.fold(&mut expression);
        assert_eq!(
            expression,
            Arithmetic::binary(BinaryOperator::Plus, Arithmetic::Identifier { id: 0, name: x }, lit(-6))
        );
        assert_eq!(optimizer.folded(), 2);
    }

    #[test]
    fn division_by_literal_zero_is_not_folded() {
        let mut expression = Arithmetic::binary(
            BinaryOperator::Divide,
            lit(1),
            Arithmetic::binary(BinaryOperator::Minus, lit(2), lit(2)),
        );
        ConstantPropagation::new().fold(&mut expression);
        assert_eq!(expression, Arithmetic::binary(BinaryOperator::Divide, lit(1), lit(0)));
    }

    #[test]
    fn every_statement_is_visited() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let v = interner.get_or_intern("v");
        let mut function = Function::new(Statement::Normal {
            assignment: AssignmentExpression {
                id: 0,
                name: v,
                value: Arithmetic::binary(BinaryOperator::Minus, lit(10), lit(4)),
            },
            next: Box::new(Statement::Return(Arithmetic::unary(UnaryOperator::Minus, lit(3)))),
        });
        ConstantPropagation::new().optimize(&mut function);

        let expected = Function::new(Statement::Normal {
            assignment: AssignmentExpression { id: 0, name: v, value: lit(6) },
            next: Box::new(Statement::Return(lit(-3))),
        });
        assert_eq!(function, expected);
    }

    fn right_chain(length: i64, op: BinaryOperator, tail: Arithmetic) -> Arithmetic {
        (0..length).fold(tail, |right, _| Arithmetic::binary(op, lit(1), right))
    }

    #[test]
    fn long_chains_fold_to_one_literal() {
        let mut expression = right_chain(200_000, BinaryOperator::Plus, lit(1));
        let mut optimizer = ConstantPropagation::new();
        optimizer.fold(&mut expression);
        assert_eq!(expression, lit(200_001));
        assert_eq!(optimizer.folded(), 200_000);
    }

    #[test]
    fn identifier_at_the_end_of_a_long_chain_blocks_every_link() {
        let mut interner: DefaultStringInterner = DefaultStringInterner::new();
        let x = interner.get_or_intern("x");
        let mut expression = right_chain(100_000, BinaryOperator::Multiply, Arithmetic::Identifier { id: 0, name: x });
        let mut optimizer = ConstantPropagation::new();
        optimizer.fold(&mut expression);
        assert_eq!(optimizer.folded(), 0);
        assert!(matches!(expression, Arithmetic::Binary { op: BinaryOperator::Multiply, .. }));
    }

    #[test]
    fn folding_inside_a_chain_stops_at_a_zero_divisor() {
        // 1 + (2 * (6 / (3 - 3)))
        let mut expression = Arithmetic::binary(
            BinaryOperator::Plus,
            lit(1),
            Arithmetic::binary(
                BinaryOperator::Multiply,
                lit(2),
                Arithmetic::binary(
                    BinaryOperator::Divide,
                    lit(6),
                    Arithmetic::binary(BinaryOperator::Minus, lit(3), lit(3)),
                ),
            ),
        );
        let mut optimizer = ConstantPropagation::new();
        optimizer.fold(&mut expression);
        let expected = Arithmetic::binary(
            BinaryOperator::Plus,
            lit(1),
            Arithmetic::binary(
                BinaryOperator::Multiply,
                lit(2),
                Arithmetic::binary(BinaryOperator::Divide, lit(6), lit(0)),
            ),
        );
        assert_eq!(expression, expected);
        assert_eq!(optimizer.folded(), 1);
    }
}
