use crate::cursor::Cursor;
use crate::error::{EatError, LexError, MatchError};
use crate::token::Token;
use crate::trace::{LexTrace, NoTrace};
use crate::traits::{LexingRule, RuleSet};
use crate::transaction::Transaction;
use common_framework::{Position, Span};

/// Tries `rules` in order at the cursor's offset and returns the first token.
///
/// Every rule starts from the same offset. When none applies the error
/// carries each rule's failure, and the cursor has not moved.
pub fn first_match<K>(rules: &[Box<dyn LexingRule<K>>], cursor: &mut Cursor) -> Result<Token<K>, LexError> {
    first_match_traced(rules, cursor, &mut NoTrace)
}

/// [`first_match`], reporting each decision to `trace`.
pub fn first_match_traced<K>(
    rules: &[Box<dyn LexingRule<K>>],
    cursor: &mut Cursor,
    trace: &mut dyn LexTrace<K>,
) -> Result<Token<K>, LexError> {
    dispatch(rules, cursor, trace).map(|(_, token)| token)
}

/// Returns the winning rule's name alongside its token.
fn dispatch<K>(
    rules: &[Box<dyn LexingRule<K>>],
    cursor: &mut Cursor,
    trace: &mut dyn LexTrace<K>,
) -> Result<(&'static str, Token<K>), LexError> {
    let offset = cursor.offset();
    let first_char = cursor.peek();
    let mut attempts = Vec::with_capacity(rules.len());

    for rule in rules {
        // Quick check optimization: skip rules that definitely won't match
        if let Some(false) = rule.quick_check(first_char) {
            trace.skipped(rule.name(), offset);
            attempts.push(skipped(rule.name(), offset, first_char));
            continue;
        }

        trace.attempt(rule.name(), offset);

        // The outer frame restores the offset even for a rule that consumed
        // without opening a transaction of its own.
        let mut tx = Transaction::begin(cursor);
        match rule.try_match(&mut *tx) {
            Ok(token) => {
                tx.commit();
                trace.matched(rule.name(), &token);
                return Ok((rule.name(), token));
            }
            Err(error) => {
                tx.rollback();
                trace.failed(&error);
                attempts.push(error);
            }
        }
    }

    trace.exhausted(offset);
    Err(LexError::NoMatch {
        offset,
        position: Position::locate(cursor.text(), offset),
        found: first_char,
        span: Span::new(offset, offset + first_char.map_or(0, char::len_utf8)).into(),
        attempts,
    })
}

fn skipped(rule: &'static str, offset: usize, first_char: Option<char>) -> MatchError {
    let expected = format!("start of {rule}");
    let cause = match first_char {
        Some(ch) => EatError::mismatch(expected, offset, ch),
        None => EatError::end_of_input(expected, offset),
    };
    MatchError::new(rule, offset, cause)
}

/// A lexer that dispatches an ordered rule set until the input runs out.
/// The rule order is the priority order; nothing is re-sorted.
pub struct Lexer<K> {
    cursor: Cursor,
    rules: RuleSet<K>,
    trace: Box<dyn LexTrace<K>>,
    failed: bool,
}

impl<K> Lexer<K> {
    /// Creates a new lexer over `cursor` with the given rules.
    pub fn new(cursor: Cursor, rules: RuleSet<K>) -> Self {
        Self {
            cursor,
            rules,
            trace: Box::new(NoTrace),
            failed: false,
        }
    }

    /// Creates a new lexer from an input string.
    pub fn from_str<S: Into<String>>(input: S, rules: RuleSet<K>) -> Self {
        Self::new(Cursor::new(input), rules)
    }

    /// Reports every dispatch decision to `trace`.
    pub fn with_trace(mut self, trace: Box<dyn LexTrace<K>>) -> Self {
        self.trace = trace;
        self
    }

    /// Returns a reference to the cursor.
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn rules(&self) -> &[Box<dyn LexingRule<K>>] {
        &self.rules
    }

    /// Returns true once the whole input has been consumed.
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// Produces the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token<K>>, LexError> {
        debug_assert_eq!(self.cursor.depth(), 0, "frames left open between dispatches");

        if self.cursor.is_eof() {
            return Ok(None);
        }

        let (rule, token) = dispatch(&self.rules, &mut self.cursor, self.trace.as_mut())?;

        // A token that consumed nothing would be produced forever.
        if token.start == token.end {
            let offset = token.start;
            return Err(LexError::NoProgress {
                rule,
                offset,
                position: Position::locate(self.cursor.text(), offset),
                span: Span::at(offset).into(),
            });
        }

        Ok(Some(token))
    }

    /// Collects all tokens from the input, stopping at the first failure.
    pub fn tokenize(&mut self) -> Result<Vec<Token<K>>, LexError> {
        self.collect()
    }
}

/// Yields tokens until the input is exhausted; after an error it yields
/// nothing more.
impl<K> Iterator for Lexer<K> {
    type Item = Result<Token<K>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}
