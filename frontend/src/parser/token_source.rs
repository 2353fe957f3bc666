use crate::lexer::LexError;
use crate::source::SourceLocation;
use crate::token::{Kind, Token};

/// Trait for token sources that can provide tokens to the parser
pub trait TokenSource {
    /// Get the next token, or `None` once the input is exhausted
    fn next_token(&mut self) -> Result<Option<Token>, LexError>;

    /// Location reported for "unexpected end of input"
    fn end_location(&self) -> SourceLocation;
}

/// One-token lookahead over a `TokenSource`.
///
/// A token is pulled from the source only when the parser first peeks at it,
/// and is held until `advance` releases it.
pub struct TokenProvider<T: TokenSource> {
    source: T,
    ahead: Option<Token>,
}

impl<T: TokenSource> TokenProvider<T> {
    pub fn new(source: T) -> Self {
        TokenProvider {
            source,
            ahead: None,
        }
    }

    /// Peek at the current token without consuming it
    pub fn peek(&mut self) -> Result<Option<&Token>, LexError> {
        if self.ahead.is_none() {
            self.ahead = self.source.next_token()?;
        }
        Ok(self.ahead.as_ref())
    }

    pub fn peek_kind(&mut self) -> Result<Option<&Kind>, LexError> {
        Ok(self.peek()?.map(|t| &t.kind))
    }

    /// Location of the current token, or the end of input
    pub fn peek_location(&mut self) -> Result<SourceLocation, LexError> {
        let end = self.source.end_location();
        Ok(self.peek()?.map_or(end, |t| t.location))
    }

    /// Consume the current token and hand it back
    pub fn advance(&mut self) -> Option<Token> {
        self.ahead.take()
    }

    pub fn end_location(&self) -> SourceLocation {
        self.source.end_location()
    }
}
