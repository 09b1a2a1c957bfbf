//! The reference rule set: quoted strings, dots, and numeric literals.

use crate::cursor::Cursor;
use crate::error::{EatError, MatchError};
use crate::token::{Token, TokenKind};
use crate::traits::{LexingRule, RuleSet};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const QUOTES: &str = "'\"";

fn is_dec_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

fn is_bin_digit(ch: char) -> bool {
    matches!(ch, '0' | '1')
}

/// Numeric literals may not run straight into a word character, so `0b`
/// is an error rather than `0` followed by something else.
fn literal_boundary(cursor: &Cursor) -> Result<(), EatError> {
    cursor.not_followed_by(
        |ch| ch.is_alphanumeric() || ch == '_',
        "end of numeric literal",
    )
}

/// A quoted string without escapes: `'...'` or `"..."`.
///
/// The closing quote must match the opening one; an unterminated string
/// fails instead of producing a partial token.
pub struct StringRule;

impl LexingRule<TokenKind> for StringRule {
    fn name(&self) -> &'static str {
        "string"
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(QUOTES.contains(first_char?))
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token, MatchError> {
        cursor
            .transaction(self.name(), |c| {
                let quote = c.eat_any(QUOTES)?;
                let unquoted = format!("anything but {quote:?}");
                c.many(|c| c.eat_if(|ch| ch != quote, &unquoted));
                c.eat_only(quote)
            })
            .map(|done| done.token(TokenKind::String))
    }
}

/// A single `.`.
pub struct DotRule;

impl LexingRule<TokenKind> for DotRule {
    fn name(&self) -> &'static str {
        "dot"
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(first_char? == '.')
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token, MatchError> {
        cursor
            .transaction(self.name(), |c| c.eat_only('.'))
            .map(|done| done.token(TokenKind::Dot))
    }
}

/// `0x` followed by one or more hex digits of either case.
pub struct HexRule;

impl LexingRule<TokenKind> for HexRule {
    fn name(&self) -> &'static str {
        "hex"
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(first_char? == '0')
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token, MatchError> {
        cursor
            .transaction(self.name(), |c| {
                c.eat_only('0')?;
                c.eat_only('x')?;
                c.many1(|c| c.eat_if(is_hex_digit, "hex digit"))?;
                literal_boundary(c)
            })
            .map(|done| done.token(TokenKind::Hex))
    }
}

/// `0b` followed by one or more binary digits.
pub struct BinRule;

impl LexingRule<TokenKind> for BinRule {
    fn name(&self) -> &'static str {
        "bin"
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(first_char? == '0')
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token, MatchError> {
        cursor
            .transaction(self.name(), |c| {
                c.eat_only('0')?;
                c.eat_only('b')?;
                c.many1(|c| c.eat_if(is_bin_digit, "bin digit"))?;
                literal_boundary(c)
            })
            .map(|done| done.token(TokenKind::Bin))
    }
}

/// Decimal digits with an optional fraction: `digit+ ("." digit+)?`.
///
/// The fraction is tried in its own nested frame. When the dot is not
/// followed by a digit only the fraction is rolled back, so `1.` yields
/// `DEC "1"` and leaves the dot for the next round.
pub struct DecRule;

impl LexingRule<TokenKind> for DecRule {
    fn name(&self) -> &'static str {
        "dec"
    }

    fn quick_check(&self, first_char: Option<char>) -> Option<bool> {
        Some(is_dec_digit(first_char?))
    }

    fn try_match(&self, cursor: &mut Cursor) -> Result<Token, MatchError> {
        cursor
            .transaction(self.name(), |c| {
                c.many1(|c| c.eat_if(is_dec_digit, "dec digit"))?;
                c.optional(|c| {
                    c.eat_only('.')?;
                    c.many1(|c| c.eat_if(is_dec_digit, "dec digit"))
                });
                literal_boundary(c)
            })
            .map(|done| done.token(TokenKind::Dec))
    }
}

/// Names of the reference rules, for building rule sets from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
    String,
    Dot,
    Hex,
    Bin,
    Dec,
}

impl RuleName {
    /// The default priority order.
    pub const ALL: [RuleName; 5] = [
        RuleName::String,
        RuleName::Dot,
        RuleName::Hex,
        RuleName::Bin,
        RuleName::Dec,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::String => "string",
            RuleName::Dot => "dot",
            RuleName::Hex => "hex",
            RuleName::Bin => "bin",
            RuleName::Dec => "dec",
        }
    }

    pub fn rule(&self) -> Box<dyn LexingRule<TokenKind>> {
        match self {
            RuleName::String => Box::new(StringRule),
            RuleName::Dot => Box::new(DotRule),
            RuleName::Hex => Box::new(HexRule),
            RuleName::Bin => Box::new(BinRule),
            RuleName::Dec => Box::new(DecRule),
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rule `{0}` (expected one of: string, dot, hex, bin, dec)")]
pub struct UnknownRule(pub String);

impl FromStr for RuleName {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRule(s.to_string()))
    }
}

/// Builds a rule set in exactly the given order.
pub fn rule_set(names: &[RuleName]) -> RuleSet<TokenKind> {
    names.iter().map(RuleName::rule).collect()
}

/// STRING, DOT, HEX, BIN, DEC, in that order.
///
/// HEX and BIN come before DEC because `0x1` and `0b1` start with a digit.
pub fn default_rules() -> RuleSet<TokenKind> {
    rule_set(&RuleName::ALL)
}
