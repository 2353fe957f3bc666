use std::fmt;

/// A span on one source line. Line and character indices are 0-based and
/// `char_end` is inclusive, so a single character has `char_begin == char_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub char_begin: usize,
    pub char_end: usize,
}

impl SourceLocation {
    pub fn new(line: usize, char_begin: usize, char_end: usize) -> Self {
        Self { line, char_begin, char_end }
    }

    pub fn point(line: usize, ch: usize) -> Self {
        Self::new(line, ch, ch)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.char_begin)
    }
}

/// Source text split into lines. Every stage addresses the text through
/// `SourceLocation`s into these lines.
#[derive(Debug, Clone)]
pub struct SourceCode {
    lines: Vec<String>,
}

impl SourceCode {
    pub fn new(text: &str) -> Self {
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        // "a\n" is one line, not a line followed by an empty one
        if text.ends_with('\n') || text.is_empty() {
            lines.pop();
        }
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    /// Literal text covered by `location`, or an empty string when the span
    /// lies outside the source (end-of-input locations do).
    pub fn fragment(&self, location: &SourceLocation) -> &str {
        self.line(location.line)
            .and_then(|line| line.get(location.char_begin..=location.char_end))
            .unwrap_or("")
    }

    /// Location one past the last character of the input, used for
    /// "unexpected end of input" diagnostics.
    pub fn end_location(&self) -> SourceLocation {
        match self.lines.last() {
            Some(last) => SourceLocation::point(self.lines.len() - 1, last.len()),
            None => SourceLocation::point(0, 0),
        }
    }

    /// Renders a diagnostic as
    ///
    /// ```text
    /// <line>:<char>: <message>
    /// \t<source line>
    /// \t<spaces>^~~~
    /// ```
    pub fn render_diagnostic(&self, location: &SourceLocation, message: &str) -> String {
        let line = self.line(location.line).unwrap_or("");
        format!(
            "{}:{}: {}\n\t{}\n\t{}\n",
            location.line,
            location.char_begin,
            message,
            line,
            Self::marking(location)
        )
    }

    fn marking(location: &SourceLocation) -> String {
        let mut marking = " ".repeat(location.char_begin);
        marking.push('^');
        marking.push_str(&"~".repeat(location.char_end.saturating_sub(location.char_begin)));
        marking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_without_trailing_newline() {
        let source = SourceCode::new("BEGIN\nRETURN 5\nEND.");
        assert_eq!(source.line_count(), 3);
        assert_eq!(source.line(1), Some("RETURN 5"));
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let source = SourceCode::new("BEGIN\nEND.\n");
        assert_eq!(source.line_count(), 2);
        assert_eq!(SourceCode::new("").line_count(), 0);
    }

    #[test]
    fn fragment_is_inclusive() {
        let source = SourceCode::new("Hello World!");
        assert_eq!(source.fragment(&SourceLocation::new(0, 0, 4)), "Hello");
        assert_eq!(source.fragment(&SourceLocation::point(0, 6)), "W");
        assert_eq!(source.fragment(&SourceLocation::point(3, 0)), "");
    }

    #[test]
    fn diagnostic_marks_range_with_caret_and_tildes() {
        let source = SourceCode::new("Hello World!");
        let rendered = source.render_diagnostic(&SourceLocation::new(0, 6, 10), "error");
        assert_eq!(rendered, "0:6: error\n\tHello World!\n\t      ^~~~~\n");
    }

    #[test]
    fn diagnostic_for_single_character() {
        let source = SourceCode::new("a\nb ? c");
        let rendered = source.render_diagnostic(&SourceLocation::point(1, 2), "error: unknown character");
        assert_eq!(rendered, "1:2: error: unknown character\n\tb ? c\n\t  ^\n");
    }
}
