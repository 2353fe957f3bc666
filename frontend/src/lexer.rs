use std::fmt;
use crate::parser::token_source::TokenSource;
use crate::source::{SourceCode, SourceLocation};
use crate::token::{Kind, KeywordKind, OperatorKind, SeparatorKind, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    UnknownCharacter(char),
    /// `:` not followed by `=`
    MalformedAssignment,
    /// digit run that does not fit in a signed 64-bit integer
    InvalidLiteral(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub location: SourceLocation,
}

impl LexError {
    pub fn new(kind: LexErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LexErrorKind::UnknownCharacter(c) => write!(f, "error: unknown character '{c}'"),
            LexErrorKind::MalformedAssignment => write!(f, "error: should be \":=\""),
            LexErrorKind::InvalidLiteral(text) => {
                write!(f, "error: literal {text} does not fit in a 64-bit integer")
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Hand-written scanner over the lines of a `SourceCode`.
///
/// Tokens never span lines: a digit or letter run that reaches the end of its
/// line ends there, and scanning resumes at the start of the next line. The
/// `.` separator terminates the program; whatever follows it is never looked
/// at. After an error the lexer is exhausted as well.
pub struct Lexer<'a> {
    source: &'a SourceCode,
    line: usize,
    ch: usize,
    exhausted: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a SourceCode) -> Self {
        Lexer {
            source,
            line: 0,
            ch: 0,
            exhausted: source.line_count() == 0,
        }
    }

    /// Lex the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = vec![];
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        crate::debug_log!("lexer: {} tokens", tokens.len());
        Ok(tokens)
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();
        if self.exhausted {
            return Ok(None);
        }
        let Some(c) = self.current() else {
            return Ok(None);
        };
        let location = SourceLocation::point(self.line, self.ch);

        let single = match c {
            b',' => Some(Kind::Separator(SeparatorKind::Comma)),
            b';' => Some(Kind::Separator(SeparatorKind::Semicolon)),
            b'+' => Some(Kind::Operator(OperatorKind::Plus)),
            b'-' => Some(Kind::Operator(OperatorKind::Minus)),
            b'*' => Some(Kind::Operator(OperatorKind::Multiply)),
            b'/' => Some(Kind::Operator(OperatorKind::Divide)),
            b'=' => Some(Kind::Operator(OperatorKind::Init)),
            b'(' => Some(Kind::Operator(OperatorKind::ParenOpen)),
            b')' => Some(Kind::Operator(OperatorKind::ParenClose)),
            _ => None,
        };
        if let Some(kind) = single {
            self.advance();
            return Ok(Some(Token::new(kind, location)));
        }

        match c {
            b'.' => {
                self.exhausted = true;
                Ok(Some(Token::new(Kind::Separator(SeparatorKind::Point), location)))
            }
            b':' => self.lex_assign(location).map(Some),
            c if c.is_ascii_digit() => self.lex_literal().map(Some),
            c if c.is_ascii_alphabetic() => Ok(Some(self.lex_word())),
            _ => {
                let line = self.source.line(self.line).unwrap_or("");
                let unknown = line[self.ch..].chars().next().unwrap_or('\u{fffd}');
                let location = SourceLocation::new(
                    self.line,
                    self.ch,
                    self.ch + unknown.len_utf8() - 1,
                );
                Err(self.fail(LexErrorKind::UnknownCharacter(unknown), location))
            }
        }
    }

    fn lex_assign(&mut self, location: SourceLocation) -> Result<Token, LexError> {
        let line = self.line;
        self.advance();
        if self.line == line && self.current() == Some(b'=') {
            self.advance();
            let location = SourceLocation::new(line, location.char_begin, location.char_begin + 1);
            Ok(Token::new(Kind::Operator(OperatorKind::Assign), location))
        } else if self.line == line && !self.exhausted {
            let location = SourceLocation::new(line, location.char_begin, location.char_begin + 1);
            Err(self.fail(LexErrorKind::MalformedAssignment, location))
        } else {
            Err(self.fail(LexErrorKind::MalformedAssignment, location))
        }
    }

    fn lex_literal(&mut self) -> Result<Token, LexError> {
        let location = self.take_run(|c| c.is_ascii_digit());
        let text = self.source.fragment(&location);
        match text.parse::<i64>() {
            Ok(value) => Ok(Token::new(Kind::Literal(value), location)),
            Err(_) => {
                let text = text.to_string();
                Err(self.fail(LexErrorKind::InvalidLiteral(text), location))
            }
        }
    }

    fn lex_word(&mut self) -> Token {
        let location = self.take_run(|c| c.is_ascii_alphabetic());
        let text = self.source.fragment(&location);
        let kind = match KeywordKind::from_spelling(text) {
            Some(keyword) => Kind::Keyword(keyword),
            None => Kind::Identifier(text.to_string()),
        };
        Token::new(kind, location)
    }

    /// Consume the maximal run of bytes matching `accept` on the current line
    /// and return its span. A run is clipped at the end of its line.
    fn take_run(&mut self, accept: impl Fn(u8) -> bool) -> SourceLocation {
        let line = self.line;
        let begin = self.ch;
        let bytes = self.source.line(line).unwrap_or("").as_bytes();
        let end = bytes[begin..]
            .iter()
            .position(|&c| !accept(c))
            .map_or(bytes.len(), |offset| begin + offset);
        self.ch = end;
        if self.ch >= bytes.len() {
            self.next_line();
        }
        SourceLocation::new(line, begin, end - 1)
    }

    fn fail(&mut self, kind: LexErrorKind, location: SourceLocation) -> LexError {
        self.exhausted = true;
        LexError::new(kind, location)
    }

    fn current(&self) -> Option<u8> {
        self.source
            .line(self.line)
            .and_then(|line| line.as_bytes().get(self.ch).copied())
    }

    fn skip_whitespace(&mut self) {
        while !self.exhausted {
            match self.current() {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.advance(),
                // empty line, or nothing left on this one
                None => self.next_line(),
                Some(_) => return,
            }
        }
    }

    fn advance(&mut self) {
        self.ch += 1;
        let len = self.source.line(self.line).map_or(0, str::len);
        if self.ch >= len {
            self.next_line();
        }
    }

    fn next_line(&mut self) {
        self.ch = 0;
        self.line += 1;
        if self.line >= self.source.line_count() {
            self.exhausted = true;
        }
    }
}

impl<'a> TokenSource for Lexer<'a> {
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        Lexer::next_token(self)
    }

    fn end_location(&self) -> SourceLocation {
        self.source.end_location()
    }
}
