use crate::parse_tree::*;
use crate::token::{Kind, KeywordKind, OperatorKind};
use super::core::{Parser, SEMICOLON};
use super::error::ParserResult;
use super::expr::parse_additive_expression;

// compound-statement := BEGIN statement-list END
pub fn parse_compound_statement(parser: &mut Parser) -> ParserResult<CompoundStatement> {
    let begin = parser.expect(&Kind::Keyword(KeywordKind::Begin), "\"BEGIN\"")?;
    let statements = parse_statement_list(parser)?;
    let end = parser.expect(&Kind::Keyword(KeywordKind::End), "\"END\"")?;
    Ok(CompoundStatement { begin, statements, end })
}

// statement-list := statement {';' statement}
pub fn parse_statement_list(parser: &mut Parser) -> ParserResult<StatementList> {
    let first = parse_statement(parser)?;
    let mut rest = vec![];
    while parser.peek_is(&SEMICOLON)? {
        let semicolon = parser.take_terminal();
        rest.push((semicolon, parse_statement(parser)?));
    }
    Ok(StatementList { first, rest })
}

// statement := assignment | RETURN additive-expr
pub fn parse_statement(parser: &mut Parser) -> ParserResult<Statement> {
    if parser.peek_is(&Kind::Keyword(KeywordKind::Return))? {
        let keyword = parser.take_terminal();
        let expression = parse_additive_expression(parser)?;
        return Ok(Statement::Return { keyword, expression });
    }
    match parser.peek()? {
        Some(Kind::Identifier(_)) => Ok(Statement::Assignment(parse_assignment_expression(parser)?)),
        _ => Err(parser.unexpected("statement")),
    }
}

// assignment := IDENT ':=' additive-expr
pub fn parse_assignment_expression(parser: &mut Parser) -> ParserResult<AssignmentExpression> {
    let target = parser.expect_identifier()?;
    let assign = parser.expect(&Kind::Operator(OperatorKind::Assign), "\":=\"")?;
    let expression = parse_additive_expression(parser)?;
    Ok(AssignmentExpression { target, assign, expression })
}
