use std::fmt;
use crate::source::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Plus,
    Minus,
    Multiply,
    Divide,
    /// `=` in constant initializers
    Init,
    /// `:=`
    Assign,
    ParenOpen,
    ParenClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Param,
    Var,
    Const,
    Begin,
    End,
    Return,
}

impl KeywordKind {
    pub fn from_spelling(s: &str) -> Option<Self> {
        match s {
            "PARAM" => Some(KeywordKind::Param),
            "VAR" => Some(KeywordKind::Var),
            "CONST" => Some(KeywordKind::Const),
            "BEGIN" => Some(KeywordKind::Begin),
            "END" => Some(KeywordKind::End),
            "RETURN" => Some(KeywordKind::Return),
            _ => None,
        }
    }

    pub fn spelling(&self) -> &'static str {
        match self {
            KeywordKind::Param => "PARAM",
            KeywordKind::Var => "VAR",
            KeywordKind::Const => "CONST",
            KeywordKind::Begin => "BEGIN",
            KeywordKind::End => "END",
            KeywordKind::Return => "RETURN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    Comma,
    Semicolon,
    Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    Identifier(String),
    Literal(i64),
    Operator(OperatorKind),
    Keyword(KeywordKind),
    Separator(SeparatorKind),
}

impl Kind {
    /// Spelling used in "expected ..." diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Kind::Identifier(name) => format!("identifier \"{name}\""),
            Kind::Literal(value) => format!("literal {value}"),
            Kind::Operator(op) => format!("\"{}\"", op.spelling()),
            Kind::Keyword(kw) => format!("\"{}\"", kw.spelling()),
            Kind::Separator(sep) => format!("\"{}\"", sep.spelling()),
        }
    }
}

impl OperatorKind {
    pub fn spelling(&self) -> &'static str {
        match self {
            OperatorKind::Plus => "+",
            OperatorKind::Minus => "-",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Init => "=",
            OperatorKind::Assign => ":=",
            OperatorKind::ParenOpen => "(",
            OperatorKind::ParenClose => ")",
        }
    }
}

impl SeparatorKind {
    pub fn spelling(&self) -> &'static str {
        match self {
            SeparatorKind::Comma => ",",
            SeparatorKind::Semicolon => ";",
            SeparatorKind::Point => ".",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: Kind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: Kind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}
