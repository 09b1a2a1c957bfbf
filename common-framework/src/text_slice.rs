use crate::Span;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A view over a shared, immutable text buffer.
///
/// Cloning a slice clones the `Arc`, never the text, so token values can
/// outlive the cursor that produced them without copying the input.
#[derive(Clone)]
pub struct TextSlice {
    buffer: Arc<str>,
    span: Span,
}

impl TextSlice {
    /// Creates a slice over `span` of `buffer`.
    ///
    /// Panics if the span is out of bounds or does not fall on char boundaries.
    pub fn new(buffer: Arc<str>, span: Span) -> Self {
        assert!(
            buffer.get(span.range()).is_some(),
            "span {span} is not a valid slice of a {}-byte buffer",
            buffer.len()
        );
        Self { buffer, span }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn as_str(&self) -> &str {
        &self.buffer[self.span.range()]
    }

    /// Returns `true` if both slices view the same buffer allocation.
    pub fn shares_buffer(&self, other: &TextSlice) -> bool {
        Arc::ptr_eq(&self.buffer, &other.buffer)
    }
}

impl fmt::Debug for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.as_str(), self.span)
    }
}

impl fmt::Display for TextSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}
