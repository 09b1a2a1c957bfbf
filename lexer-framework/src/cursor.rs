use crate::error::EatError;
use crate::frame::{Frame, FrameStack};
use common_framework::{Position, Span, TextSlice};
use std::sync::Arc;

/// A shared position over the input text.
///
/// All advancement goes through [`Cursor::eat_if`]; the helpers below are
/// thin wrappers over it. Advancement lands on the innermost open frame, so
/// whoever opened that frame decides whether it sticks.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<str>,
    frames: FrameStack,
}

impl Cursor {
    /// Creates a new cursor from the input string.
    pub fn new<S: Into<String>>(input: S) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::<str>::from(owned))
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<str>) -> Self {
        Self {
            buffer,
            frames: FrameStack::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<str> {
        Arc::clone(&self.buffer)
    }

    /// Returns the current effective offset in bytes.
    pub fn offset(&self) -> usize {
        self.frames.offset()
    }

    /// Returns the offset committed outside of every open transaction.
    pub fn base(&self) -> usize {
        self.frames.base()
    }

    /// Returns the number of open transactions.
    pub fn depth(&self) -> usize {
        self.frames.depth()
    }

    pub fn frames(&self) -> &FrameStack {
        &self.frames
    }

    /// Returns the line and column of the current offset.
    pub fn position(&self) -> Position {
        Position::locate(&self.buffer, self.offset())
    }

    /// Returns true if the cursor is at the end of the input.
    pub fn is_eof(&self) -> bool {
        self.offset() >= self.buffer.len()
    }

    /// Returns the next character without advancing, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.buffer.get(self.offset()..)?.chars().next()
    }

    /// Consumes the next character if `predicate` accepts it.
    ///
    /// On failure nothing moves and the error records whether the input was
    /// exhausted or merely held the wrong character.
    pub fn eat_if<F>(&mut self, predicate: F, description: &str) -> Result<char, EatError>
    where
        F: FnOnce(char) -> bool,
    {
        self.eat_with(predicate, || description.to_string())
    }

    /// Consumes any one character.
    pub fn eat(&mut self) -> Result<char, EatError> {
        self.eat_if(|_| true, "any char")
    }

    /// Consumes exactly `expected`.
    pub fn eat_only(&mut self, expected: char) -> Result<char, EatError> {
        self.eat_with(|ch| ch == expected, || format!("only {expected:?}"))
    }

    /// Consumes any one character contained in `set`.
    pub fn eat_any(&mut self, set: &str) -> Result<char, EatError> {
        self.eat_with(|ch| set.contains(ch), || format!("any of {set:?}"))
    }

    /// Zero-width lookahead that fails when the next character satisfies
    /// `predicate`. End of input always passes.
    pub fn not_followed_by<F>(&self, predicate: F, description: &str) -> Result<(), EatError>
    where
        F: FnOnce(char) -> bool,
    {
        match self.peek() {
            Some(ch) if predicate(ch) => Err(EatError::mismatch(description, self.offset(), ch)),
            _ => Ok(()),
        }
    }

    fn eat_with<F, D>(&mut self, predicate: F, describe: D) -> Result<char, EatError>
    where
        F: FnOnce(char) -> bool,
        D: FnOnce() -> String,
    {
        match self.peek() {
            Some(ch) if predicate(ch) => {
                self.frames.advance(ch.len_utf8());
                Ok(ch)
            }
            Some(ch) => Err(EatError::mismatch(describe(), self.offset(), ch)),
            None => Err(EatError::end_of_input(describe(), self.offset())),
        }
    }

    /// Returns the remaining input from the current offset.
    pub fn remaining(&self) -> &str {
        &self.buffer[self.offset()..]
    }

    /// Returns a shared view over `span` of the input.
    pub fn slice(&self, span: Span) -> TextSlice {
        TextSlice::new(self.buffer(), span)
    }

    /// Opens a transaction at the current offset.
    pub fn begin(&mut self) -> Frame {
        self.frames.begin()
    }

    /// Closes the innermost transaction, keeping its advancement.
    pub fn commit(&mut self) -> Option<Frame> {
        self.frames.commit()
    }

    /// Closes the innermost transaction, discarding its advancement.
    pub fn rollback(&mut self) -> Option<Frame> {
        self.frames.rollback()
    }

    pub(crate) fn unwind(&mut self, depth: usize) {
        self.frames.unwind(depth);
    }

    /// Drops every open transaction and rewinds to the beginning.
    pub fn reset(&mut self) {
        self.frames.reset();
    }
}
