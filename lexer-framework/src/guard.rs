use crate::cursor::Cursor;
use crate::error::EatError;

/// Which consumption failures a guard swallows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardMode {
    /// Any failure ends the guarded step quietly.
    #[default]
    Any,
    /// Only running out of input is quiet; a present but rejected character
    /// is re-raised.
    EofOnly,
}

/// Filters a consumption result through `mode`.
///
/// Returns `Ok(Some(_))` on success, `Ok(None)` when the failure is
/// swallowed, and `Err` when it must propagate.
pub fn guard<T>(result: Result<T, EatError>, mode: GuardMode) -> Result<Option<T>, EatError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if mode == GuardMode::Any || error.failed_on_eof() => Ok(None),
        Err(error) => Err(error),
    }
}

impl Cursor {
    /// Runs `body` once in a nested frame; a failure leaves nothing consumed.
    pub fn optional<T, F>(&mut self, body: F) -> Option<T>
    where
        F: FnOnce(&mut Cursor) -> Result<T, EatError>,
    {
        self.scoped(body).ok()
    }

    /// Zero or more repetitions of `body`. Returns how many succeeded.
    ///
    /// Every iteration runs in its own frame, so the iteration that stops the
    /// loop leaves nothing behind, including the character it rejected.
    pub fn many<T, F>(&mut self, body: F) -> usize
    where
        F: FnMut(&mut Cursor) -> Result<T, EatError>,
    {
        self.repeat(GuardMode::Any, body).0
    }

    /// Like [`Cursor::many`], but failures not swallowed by `mode` propagate.
    pub fn many_with<T, F>(&mut self, mode: GuardMode, body: F) -> Result<usize, EatError>
    where
        F: FnMut(&mut Cursor) -> Result<T, EatError>,
    {
        match self.repeat(mode, body) {
            (count, None) => Ok(count),
            (_, Some(error)) => Err(error),
        }
    }

    /// One or more repetitions of `body`.
    pub fn many1<T, F>(&mut self, mut body: F) -> Result<usize, EatError>
    where
        F: FnMut(&mut Cursor) -> Result<T, EatError>,
    {
        self.scoped(&mut body)?;
        Ok(1 + self.many(body))
    }

    fn repeat<T, F>(&mut self, mode: GuardMode, mut body: F) -> (usize, Option<EatError>)
    where
        F: FnMut(&mut Cursor) -> Result<T, EatError>,
    {
        let mut count = 0;
        loop {
            let before = self.offset();
            match guard(self.scoped(&mut body), mode) {
                // An iteration that consumed nothing would repeat forever.
                Ok(Some(_)) if self.offset() > before => count += 1,
                Ok(_) => return (count, None),
                Err(error) => return (count, Some(error)),
            }
        }
    }
}
