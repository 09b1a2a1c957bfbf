use std::fmt;

/// A human-readable location in the source text.
///
/// The lexer itself only tracks byte offsets; a `Position` is derived from an
/// offset when something needs to be reported (diagnostics, traces).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number in characters (1-indexed)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the line and column of `offset` within `text`.
    ///
    /// Offsets past the end are clamped to the end of the text, and an
    /// offset inside a multi-byte character resolves to that character.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut position = Self::new();
        for (index, ch) in text.char_indices() {
            // only characters that end at or before `offset` come before it
            if index + ch.len_utf8() > offset {
                break;
            }
            if ch == '\n' {
                position.line += 1;
                position.column = 1;
            } else {
                position.column += 1;
            }
        }
        position.offset = offset.min(text.len());
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
