//! Source location tracking

use std::fmt;

/// Source position (line, column, and byte offset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
    /// Byte offset from start of input
    pub offset: usize,
}

impl Position {
    /// Position of the first character of an input
    #[inline]
    pub fn start() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Position immediately after `c`
    pub fn advance(
        self,
        c: char,
    ) -> Self {
        if c == '\n' {
            Self {
                line: self.line + 1,
                column: 1,
                offset: self.offset + 1,
            }
        } else {
            Self {
                line: self.line,
                column: self.column + 1,
                offset: self.offset + c.len_utf8(),
            }
        }
    }

    /// Position immediately after `text`
    pub fn advance_str(
        self,
        text: &str,
    ) -> Self {
        text.chars().fold(self, Position::advance)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::start()
    }
}

impl fmt::Display for Position {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source span (start position to end position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Span covering `text` starting at `start`
    #[inline]
    pub fn covering(
        start: Position,
        text: &str,
    ) -> Self {
        Self {
            start,
            end: start.advance_str(text),
        }
    }

    /// Get the source text length
    #[inline]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Check if span is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}
