//! Concrete parse tree. One type per grammar production; punctuation is kept
//! as `Terminal`s so every node can point back at its source text. Repeated
//! grammar elements (`{',' IDENT}`, `{';' statement}`) and the right-recursive
//! operator chains are flattened into ordered vectors, each element paired
//! with the separator or operator that preceded it.

use crate::source::SourceLocation;

/// Keyword, operator or separator token consumed by a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Terminal {
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierTerminal {
    pub name: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralTerminal {
    pub value: i64,
    pub location: SourceLocation,
}

/// function-definition = [params] [vars] [consts] compound-statement '.'
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub parameters: Option<ParameterDeclarations>,
    pub variables: Option<VariableDeclarations>,
    pub constants: Option<ConstantDeclarations>,
    pub compound_statement: CompoundStatement,
    pub point: Terminal,
}

/// params = PARAM declarator-list ';'
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDeclarations {
    pub keyword: Terminal,
    pub declarators: DeclaratorList,
    pub semicolon: Terminal,
}

/// vars = VAR declarator-list ';'
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarations {
    pub keyword: Terminal,
    pub declarators: DeclaratorList,
    pub semicolon: Terminal,
}

/// consts = CONST init-declarator-list ';'
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDeclarations {
    pub keyword: Terminal,
    pub declarators: InitDeclaratorList,
    pub semicolon: Terminal,
}

/// declarator-list = IDENT {',' IDENT}
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaratorList {
    pub first: IdentifierTerminal,
    pub rest: Vec<(Terminal, IdentifierTerminal)>,
}

impl DeclaratorList {
    pub fn identifiers(&self) -> impl Iterator<Item = &IdentifierTerminal> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, ident)| ident))
    }
}

/// init-declarator-list = init-declarator {',' init-declarator}
#[derive(Debug, Clone, PartialEq)]
pub struct InitDeclaratorList {
    pub first: InitDeclarator,
    pub rest: Vec<(Terminal, InitDeclarator)>,
}

impl InitDeclaratorList {
    pub fn declarators(&self) -> impl Iterator<Item = &InitDeclarator> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, decl)| decl))
    }
}

/// init-declarator = IDENT '=' LITERAL
#[derive(Debug, Clone, PartialEq)]
pub struct InitDeclarator {
    pub identifier: IdentifierTerminal,
    pub equals: Terminal,
    pub literal: LiteralTerminal,
}

/// compound-statement = BEGIN statement-list END
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundStatement {
    pub begin: Terminal,
    pub statements: StatementList,
    pub end: Terminal,
}

/// statement-list = statement {';' statement}
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList {
    pub first: Statement,
    pub rest: Vec<(Terminal, Statement)>,
}

impl StatementList {
    pub fn statements(&self) -> impl DoubleEndedIterator<Item = &Statement> {
        std::iter::once(&self.first).chain(self.rest.iter().map(|(_, stmt)| stmt))
    }

    pub fn len(&self) -> usize {
        1 + self.rest.len()
    }
}

/// statement = assignment | RETURN additive-expr
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assignment(AssignmentExpression),
    Return {
        keyword: Terminal,
        expression: AdditiveExpression,
    },
}

/// assignment = IDENT ':=' additive-expr
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpression {
    pub target: IdentifierTerminal,
    pub assign: Terminal,
    pub expression: AdditiveExpression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditiveOperator {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiplicativeOperator {
    Multiply,
    Divide,
}

/// additive-expr = mult-expr [('+' | '-') additive-expr]
///
/// The right-recursive chain is stored flat: `first` followed by each
/// operator and the operand after it. It still groups to the right, so
/// `a - b - c` means `a - (b - c)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditiveExpression {
    pub first: MultiplicativeExpression,
    pub rest: Vec<(AdditiveOperator, Terminal, MultiplicativeExpression)>,
}

/// mult-expr = unary-expr [('*' | '/') mult-expr]
#[derive(Debug, Clone, PartialEq)]
pub struct MultiplicativeExpression {
    pub first: UnaryExpression,
    pub rest: Vec<(MultiplicativeOperator, Terminal, UnaryExpression)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnarySign {
    Plus,
    Minus,
}

/// unary-expr = ['+' | '-'] primary-expr
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub sign: Option<(UnarySign, Terminal)>,
    pub primary: PrimaryExpression,
}

/// primary-expr = IDENT | LITERAL | '(' additive-expr ')'
#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryExpression {
    Identifier(IdentifierTerminal),
    Literal(LiteralTerminal),
    Parenthesized {
        open: Terminal,
        expression: Box<AdditiveExpression>,
        close: Terminal,
    },
}
