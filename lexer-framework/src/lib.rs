//! A backtracking, rule-driven lexer.
//!
//! Rules consume from a shared [`Cursor`] inside transactions: a rule that
//! fails partway through is rolled back to where it started, so the
//! [`Lexer`] can try the next rule from the same offset.

pub mod cursor;
pub mod error;
pub mod frame;
pub mod guard;
pub mod lexer;
pub mod rules;
pub mod token;
pub mod trace;
pub mod traits;
pub mod transaction;

pub use common_framework::{Position, Span, TextSlice};
pub use cursor::Cursor;
pub use error::{EatError, LexError, MatchError};
pub use frame::{Frame, FrameStack};
pub use guard::{guard, GuardMode};
pub use lexer::{first_match, first_match_traced, Lexer};
pub use rules::{default_rules, rule_set, RuleName};
pub use token::{Token, TokenKind};
pub use trace::{LexTrace, NoTrace, StderrTrace, TraceEvent, TraceLog};
pub use traits::{FnRule, LexingRule, RuleSet};
pub use transaction::{Committed, Transaction};

/// Tokenizes `input` with the default rule set.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::from_str(input, default_rules()).tokenize()
}
