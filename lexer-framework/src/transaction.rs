use crate::cursor::Cursor;
use crate::error::{EatError, MatchError};
use crate::frame::Frame;
use crate::token::Token;
use common_framework::TextSlice;
use std::ops::{Deref, DerefMut};

/// A scoped transaction over a [`Cursor`].
///
/// The frame is opened on creation and closed exactly once: by
/// [`Transaction::commit`], by [`Transaction::rollback`], or by `Drop`, which
/// rolls back. Any frames a body left open above this one are discarded
/// first, so closing always restores the stack to its depth before `begin`.
pub struct Transaction<'c> {
    cursor: &'c mut Cursor,
    depth: usize,
    start: usize,
    closed: bool,
}

impl<'c> Transaction<'c> {
    pub fn begin(cursor: &'c mut Cursor) -> Self {
        let frame = cursor.begin();
        let depth = cursor.depth();
        Self {
            cursor,
            depth,
            start: frame.start(),
            closed: false,
        }
    }

    /// The offset this transaction started at.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The transaction's frame as it stands now.
    pub fn frame(&self) -> Frame {
        self.cursor
            .frames()
            .frames()
            .get(self.depth - 1)
            .copied()
            .unwrap_or_else(|| Frame::open(self.start))
    }

    pub fn commit(mut self) -> Frame {
        self.close(Cursor::commit)
    }

    pub fn rollback(mut self) -> Frame {
        self.close(Cursor::rollback)
    }

    fn close(&mut self, release: fn(&mut Cursor) -> Option<Frame>) -> Frame {
        self.closed = true;
        debug_assert!(
            self.cursor.depth() >= self.depth,
            "transaction frame at depth {} was closed behind its guard",
            self.depth
        );
        if self.cursor.depth() < self.depth {
            return Frame::open(self.start);
        }
        self.cursor.unwind(self.depth);
        release(&mut *self.cursor).unwrap_or_else(|| Frame::open(self.start))
    }
}

impl Deref for Transaction<'_> {
    type Target = Cursor;

    fn deref(&self) -> &Cursor {
        self.cursor
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Cursor {
        self.cursor
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.closed {
            self.close(Cursor::rollback);
        }
    }
}

/// The result of a committed rule body.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    pub frame: Frame,
    pub value: TextSlice,
    pub output: T,
}

impl<T> Committed<T> {
    /// Mints a token of `kind` covering the committed span.
    pub fn token<K>(self, kind: K) -> Token<K> {
        Token::new(kind, self.value)
    }
}

impl Cursor {
    /// Runs `body` in a nested frame, committing on success and rolling back
    /// on failure. The consumption failure is passed through untouched.
    pub fn scoped<T, F>(&mut self, body: F) -> Result<T, EatError>
    where
        F: FnOnce(&mut Cursor) -> Result<T, EatError>,
    {
        let mut tx = Transaction::begin(self);
        let result = body(&mut *tx);
        match result {
            Ok(_) => tx.commit(),
            Err(_) => tx.rollback(),
        };
        result
    }

    /// Runs a rule body as one all-or-nothing transaction.
    ///
    /// A consumption failure rolls the frame back and comes out as a
    /// [`MatchError`] naming `rule`; the cursor is then exactly where it was
    /// before the call.
    pub fn transaction<T, F>(&mut self, rule: &'static str, body: F) -> Result<Committed<T>, MatchError>
    where
        F: FnOnce(&mut Cursor) -> Result<T, EatError>,
    {
        let mut tx = Transaction::begin(self);
        let start = tx.start();
        match body(&mut *tx) {
            Ok(output) => {
                let frame = tx.commit();
                Ok(Committed {
                    frame,
                    value: self.slice(frame.span()),
                    output,
                })
            }
            Err(cause) => {
                tx.rollback();
                Err(MatchError::new(rule, start, cause))
            }
        }
    }
}
