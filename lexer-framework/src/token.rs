use common_framework::{Span, TextSlice};
use std::fmt;

/// Token kinds produced by the reference rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    String,
    Dot,
    Hex,
    Bin,
    Dec,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::String => "STRING",
            TokenKind::Dot => "DOT",
            TokenKind::Hex => "HEX",
            TokenKind::Bin => "BIN",
            TokenKind::Dec => "DEC",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognised piece of input. Immutable once minted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K = TokenKind> {
    pub kind: K,
    pub value: TextSlice,
    pub start: usize,
    pub end: usize,
}

impl<K> Token<K> {
    pub fn new(kind: K, value: TextSlice) -> Self {
        Self {
            kind,
            start: value.start(),
            end: value.end(),
            value,
        }
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    pub fn text(&self) -> &str {
        self.value.as_str()
    }
}

impl<K: fmt::Display> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} {}..{}", self.kind, self.text(), self.start, self.end)
    }
}
