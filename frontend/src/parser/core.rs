use crate::lexer::Lexer;
use crate::parse_tree::*;
use crate::source::SourceCode;
use crate::token::{Kind, KeywordKind, OperatorKind, SeparatorKind, Token};
use super::error::{ParserError, ParserResult};
use super::token_source::TokenProvider;

pub(crate) const COMMA: Kind = Kind::Separator(SeparatorKind::Comma);
pub(crate) const SEMICOLON: Kind = Kind::Separator(SeparatorKind::Semicolon);
pub(crate) const POINT: Kind = Kind::Separator(SeparatorKind::Point);

pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 256;

/// Recursive-descent parser producing a `parse_tree::FunctionDefinition`.
///
/// Every production is chosen by looking at a single token, and the first
/// mismatch aborts the whole parse.
pub struct Parser<'a> {
    token_provider: TokenProvider<Lexer<'a>>,
    recursion_depth: usize,
    max_recursion_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a SourceCode) -> Self {
        Self::with_max_recursion_depth(source, DEFAULT_MAX_RECURSION_DEPTH)
    }

    pub fn with_max_recursion_depth(source: &'a SourceCode, max_recursion_depth: usize) -> Self {
        Parser {
            token_provider: TokenProvider::new(Lexer::new(source)),
            recursion_depth: 0,
            max_recursion_depth,
        }
    }

    pub fn peek(&mut self) -> ParserResult<Option<&Kind>> {
        Ok(self.token_provider.peek_kind()?)
    }

    pub fn peek_is(&mut self, kind: &Kind) -> ParserResult<bool> {
        Ok(self.peek()? == Some(kind))
    }

    pub fn next(&mut self) -> Option<Token> {
        self.token_provider.advance()
    }

    /// Consume the current token as a terminal node.
    pub(crate) fn take_terminal(&mut self) -> Terminal {
        match self.next() {
            Some(token) => Terminal { location: token.location },
            None => Terminal { location: self.token_provider.end_location() },
        }
    }

    pub fn expect(&mut self, accept: &Kind, expected: &str) -> ParserResult<Terminal> {
        if self.peek_is(accept)? {
            Ok(self.take_terminal())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub fn expect_identifier(&mut self) -> ParserResult<IdentifierTerminal> {
        match self.token_provider.peek()? {
            Some(Token { kind: Kind::Identifier(name), location }) => {
                let identifier = IdentifierTerminal {
                    name: name.clone(),
                    location: *location,
                };
                self.next();
                Ok(identifier)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    pub fn expect_literal(&mut self) -> ParserResult<LiteralTerminal> {
        match self.token_provider.peek()? {
            Some(Token { kind: Kind::Literal(value), location }) => {
                let literal = LiteralTerminal {
                    value: *value,
                    location: *location,
                };
                self.next();
                Ok(literal)
            }
            _ => Err(self.unexpected("literal")),
        }
    }

    /// Error describing the current token (or end of input) as not matching
    /// `expected`.
    pub(crate) fn unexpected(&mut self, expected: &str) -> ParserError {
        let end = self.token_provider.end_location();
        match self.token_provider.peek() {
            Ok(Some(token)) => {
                ParserError::unexpected_token(token.location, expected, token.kind.describe())
            }
            Ok(None) => ParserError::unexpected_end_of_input(end, expected),
            Err(error) => error.into(),
        }
    }

    pub(crate) fn check_and_increment_recursion(&mut self) -> ParserResult<()> {
        if self.recursion_depth >= self.max_recursion_depth {
            let location = self.token_provider.peek_location()?;
            return Err(ParserError::recursion_limit_exceeded(location, self.max_recursion_depth));
        }
        self.recursion_depth += 1;
        Ok(())
    }

    pub(crate) fn decrement_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // function-definition = [params] [vars] [consts] compound-statement '.'
    // params := PARAM declarator-list ';'
    // vars := VAR declarator-list ';'
    // consts := CONST init-declarator-list ';'
    // declarator-list := IDENT {',' IDENT}
    // init-declarator-list := init-declarator {',' init-declarator}
    // init-declarator := IDENT '=' LITERAL
    pub fn parse_function_definition(&mut self) -> ParserResult<FunctionDefinition> {
        let parameters = self.parse_parameter_declarations()?;
        let variables = self.parse_variable_declarations()?;
        let constants = self.parse_constant_declarations()?;
        let compound_statement = super::stmt::parse_compound_statement(self)?;
        let point = self.expect(&POINT, "\".\"")?;
        crate::debug_log!(
            "parser: {} statement(s) parsed",
            compound_statement.statements.len()
        );
        Ok(FunctionDefinition {
            parameters,
            variables,
            constants,
            compound_statement,
            point,
        })
    }

    pub fn parse_parameter_declarations(&mut self) -> ParserResult<Option<ParameterDeclarations>> {
        if !self.peek_is(&Kind::Keyword(KeywordKind::Param))? {
            return Ok(None);
        }
        let keyword = self.take_terminal();
        let declarators = self.parse_declarator_list()?;
        let semicolon = self.expect(&SEMICOLON, "\";\"")?;
        Ok(Some(ParameterDeclarations { keyword, declarators, semicolon }))
    }

    pub fn parse_variable_declarations(&mut self) -> ParserResult<Option<VariableDeclarations>> {
        if !self.peek_is(&Kind::Keyword(KeywordKind::Var))? {
            return Ok(None);
        }
        let keyword = self.take_terminal();
        let declarators = self.parse_declarator_list()?;
        let semicolon = self.expect(&SEMICOLON, "\";\"")?;
        Ok(Some(VariableDeclarations { keyword, declarators, semicolon }))
    }

    pub fn parse_constant_declarations(&mut self) -> ParserResult<Option<ConstantDeclarations>> {
        if !self.peek_is(&Kind::Keyword(KeywordKind::Const))? {
            return Ok(None);
        }
        let keyword = self.take_terminal();
        let declarators = self.parse_init_declarator_list()?;
        let semicolon = self.expect(&SEMICOLON, "\";\"")?;
        Ok(Some(ConstantDeclarations { keyword, declarators, semicolon }))
    }

    pub fn parse_declarator_list(&mut self) -> ParserResult<DeclaratorList> {
        let first = self.expect_identifier()?;
        let mut rest = vec![];
        while self.peek_is(&COMMA)? {
            let comma = self.take_terminal();
            rest.push((comma, self.expect_identifier()?));
        }
        Ok(DeclaratorList { first, rest })
    }

    pub fn parse_init_declarator_list(&mut self) -> ParserResult<InitDeclaratorList> {
        let first = self.parse_init_declarator()?;
        let mut rest = vec![];
        while self.peek_is(&COMMA)? {
            let comma = self.take_terminal();
            rest.push((comma, self.parse_init_declarator()?));
        }
        Ok(InitDeclaratorList { first, rest })
    }

    pub fn parse_init_declarator(&mut self) -> ParserResult<InitDeclarator> {
        let identifier = self.expect_identifier()?;
        let equals = self.expect(&Kind::Operator(OperatorKind::Init), "\"=\"")?;
        let literal = self.expect_literal()?;
        Ok(InitDeclarator { identifier, equals, literal })
    }
}
