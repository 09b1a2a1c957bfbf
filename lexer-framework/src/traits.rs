use crate::cursor::Cursor;
use crate::error::MatchError;
use crate::token::Token;

/// An ordered list of rules; earlier rules win.
pub type RuleSet<K> = Vec<Box<dyn LexingRule<K>>>;

/// A rule that recognises one kind of token at the cursor.
///
/// Rules are stateless and independent of each other. A failed match must
/// leave the cursor where it found it, which [`Cursor::transaction`] takes
/// care of.
pub trait LexingRule<K> {
    /// Name used in diagnostics and traces.
    fn name(&self) -> &'static str;

    /// Attempts to build a token starting at the cursor's offset.
    fn try_match(&self, cursor: &mut Cursor) -> Result<Token<K>, MatchError>;

    /// Quick check: returns whether this rule might match based on the first character.
    ///
    /// - `Some(true)`  - This rule might match
    /// - `Some(false)` - This rule definitely won't match
    /// - `None`        - Unknown, need to try full match
    ///
    /// Returning `Some(false)` for input the rule would accept is a bug: the
    /// dispatcher skips the rule without trying it.
    #[inline]
    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        let _ = first_char;
        None
    }
}

/// Adapts a plain function or closure into a [`LexingRule`].
pub struct FnRule<F> {
    name: &'static str,
    matcher: F,
}

impl<F> FnRule<F> {
    pub fn new(name: &'static str, matcher: F) -> Self {
        Self { name, matcher }
    }
}

impl<K, F> LexingRule<K> for FnRule<F>
where
    F: Fn(&mut Cursor) -> Result<Token<K>, MatchError>,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token<K>, MatchError> {
        (self.matcher)(cursor)
    }
}
