use crate::parse_tree::*;
use crate::token::{Kind, OperatorKind};
use super::core::Parser;
use super::error::ParserResult;

/// Operator tokens accepted at one precedence level, with the parse-tree
/// operator each one maps to.
pub struct OperatorGroup<Op: 'static> {
    pub tokens: &'static [(OperatorKind, Op)],
}

const ADDITIVE: OperatorGroup<AdditiveOperator> = OperatorGroup {
    tokens: &[
        (OperatorKind::Plus, AdditiveOperator::Plus),
        (OperatorKind::Minus, AdditiveOperator::Minus),
    ],
};

const MULTIPLICATIVE: OperatorGroup<MultiplicativeOperator> = OperatorGroup {
    tokens: &[
        (OperatorKind::Multiply, MultiplicativeOperator::Multiply),
        (OperatorKind::Divide, MultiplicativeOperator::Divide),
    ],
};

const UNARY: OperatorGroup<UnarySign> = OperatorGroup {
    tokens: &[
        (OperatorKind::Plus, UnarySign::Plus),
        (OperatorKind::Minus, UnarySign::Minus),
    ],
};

impl<Op: Copy + 'static> OperatorGroup<Op> {
    /// Consume the current token if it belongs to this group.
    fn accept(&self, parser: &mut Parser) -> ParserResult<Option<(Op, Terminal)>> {
        let matched = match parser.peek()? {
            Some(Kind::Operator(kind)) => self
                .tokens
                .iter()
                .find(|(accepted, _)| accepted == kind)
                .map(|(_, op)| *op),
            _ => None,
        };
        Ok(matched.map(|op| (op, parser.take_terminal())))
    }
}

// additive-expr := mult-expr [('+' | '-') additive-expr]
//
// Read as a loop; the semantic analyzer regroups the operands to the right,
// so `a - b - c` means `a - (b - c)`.
pub fn parse_additive_expression(parser: &mut Parser) -> ParserResult<AdditiveExpression> {
    let first = parse_multiplicative_expression(parser)?;
    let mut rest = vec![];
    while let Some((op, terminal)) = ADDITIVE.accept(parser)? {
        rest.push((op, terminal, parse_multiplicative_expression(parser)?));
    }
    Ok(AdditiveExpression { first, rest })
}

// mult-expr := unary-expr [('*' | '/') mult-expr]
pub fn parse_multiplicative_expression(parser: &mut Parser) -> ParserResult<MultiplicativeExpression> {
    let first = parse_unary_expression(parser)?;
    let mut rest = vec![];
    while let Some((op, terminal)) = MULTIPLICATIVE.accept(parser)? {
        rest.push((op, terminal, parse_unary_expression(parser)?));
    }
    Ok(MultiplicativeExpression { first, rest })
}

// unary-expr := ['+' | '-'] primary-expr
pub fn parse_unary_expression(parser: &mut Parser) -> ParserResult<UnaryExpression> {
    let sign = UNARY.accept(parser)?;
    let primary = parse_primary_expression(parser)?;
    Ok(UnaryExpression { sign, primary })
}

// primary-expr := IDENT | LITERAL | '(' additive-expr ')'
pub fn parse_primary_expression(parser: &mut Parser) -> ParserResult<PrimaryExpression> {
    match parser.peek()? {
        Some(Kind::Identifier(_)) => Ok(PrimaryExpression::Identifier(parser.expect_identifier()?)),
        Some(Kind::Literal(_)) => Ok(PrimaryExpression::Literal(parser.expect_literal()?)),
        Some(Kind::Operator(OperatorKind::ParenOpen)) => {
            // only brackets nest, so only they count against the limit
            parser.check_and_increment_recursion()?;
            let result = parse_parenthesized_expression(parser);
            parser.decrement_recursion();
            result
        }
        _ => Err(parser.unexpected("identifier, literal or \"(\"")),
    }
}

fn parse_parenthesized_expression(parser: &mut Parser) -> ParserResult<PrimaryExpression> {
    let open = parser.take_terminal();
    let expression = parse_additive_expression(parser)?;
    let close = parser.expect(&Kind::Operator(OperatorKind::ParenClose), "\")\"")?;
    Ok(PrimaryExpression::Parenthesized {
        open,
        expression: Box::new(expression),
        close,
    })
}
