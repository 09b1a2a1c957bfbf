use common_framework::{Position, Span};
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// A single consumption that did not happen.
///
/// `found` is `None` when the cursor was at end of input. Repetition loops
/// use that distinction to decide whether running out of characters is an
/// acceptable way to stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at offset {offset} found {} while parsing {expected}", describe(.found))]
pub struct EatError {
    pub expected: String,
    pub offset: usize,
    pub found: Option<char>,
}

impl EatError {
    pub fn mismatch(expected: impl Into<String>, offset: usize, found: char) -> Self {
        Self {
            expected: expected.into(),
            offset,
            found: Some(found),
        }
    }

    pub fn end_of_input(expected: impl Into<String>, offset: usize) -> Self {
        Self {
            expected: expected.into(),
            offset,
            found: None,
        }
    }

    pub fn failed_on_eof(&self) -> bool {
        self.found.is_none()
    }

    /// The span of the character that was rejected (empty at end of input).
    pub fn span(&self) -> Span {
        let width = self.found.map_or(0, char::len_utf8);
        Span::new(self.offset, self.offset + width)
    }
}

/// A nested rule that failed inside another rule's body becomes a
/// consumption failure of the outer rule, keeping the inner EOF flag.
impl From<MatchError> for EatError {
    fn from(error: MatchError) -> Self {
        Self {
            expected: error.rule.to_string(),
            offset: error.cause.offset,
            found: error.cause.found,
        }
    }
}

/// A rule that does not apply at the position it was tried.
///
/// By the time this exists the rule's transaction has been rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{rule} does not apply: {cause}")]
pub struct MatchError {
    pub rule: &'static str,
    /// Where the attempt began.
    pub start: usize,
    pub cause: EatError,
    #[label("rule stopped here")]
    pub span: SourceSpan,
}

impl MatchError {
    pub fn new(rule: &'static str, start: usize, cause: EatError) -> Self {
        let span = cause.span().into();
        Self {
            rule,
            start,
            cause,
            span,
        }
    }

    pub fn failed_on_eof(&self) -> bool {
        self.cause.failed_on_eof()
    }
}

/// Terminal failures of a lexing run.
#[derive(Debug, Clone, Error, Diagnostic)]
pub enum LexError {
    #[error("no rule matched {} at {position}", describe(.found))]
    #[diagnostic(
        code(lexer::no_match),
        help("every rule was tried at this position; see the related failures")
    )]
    NoMatch {
        offset: usize,
        position: Position,
        found: Option<char>,
        #[label("no rule matches here")]
        span: SourceSpan,
        #[related]
        attempts: Vec<MatchError>,
    },

    #[error("rule `{rule}` matched without consuming input at {position}")]
    #[diagnostic(code(lexer::no_progress))]
    NoProgress {
        rule: &'static str,
        offset: usize,
        position: Position,
        #[label("empty match")]
        span: SourceSpan,
    },
}

impl LexError {
    pub fn offset(&self) -> usize {
        match self {
            LexError::NoMatch { offset, .. } | LexError::NoProgress { offset, .. } => *offset,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            LexError::NoMatch { position, .. } | LexError::NoProgress { position, .. } => {
                *position
            }
        }
    }
}

fn describe(found: &Option<char>) -> String {
    match found {
        Some(ch) => format!("{ch:?}"),
        None => "EOF".to_string(),
    }
}
