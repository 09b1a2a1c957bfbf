//! Optional tracing of dispatch decisions.
//!
//! Tracing is a side channel: it observes which rule was tried where and what
//! came of it, and never influences the result.

use crate::error::MatchError;
use crate::token::Token;
use std::fmt::Display;

pub trait LexTrace<K> {
    fn attempt(&mut self, rule: &'static str, offset: usize) {
        let _ = (rule, offset);
    }

    /// The rule's quick check ruled it out without trying it.
    fn skipped(&mut self, rule: &'static str, offset: usize) {
        let _ = (rule, offset);
    }

    fn matched(&mut self, rule: &'static str, token: &Token<K>) {
        let _ = (rule, token);
    }

    fn failed(&mut self, error: &MatchError) {
        let _ = error;
    }

    /// Every rule failed at `offset`.
    fn exhausted(&mut self, offset: usize) {
        let _ = offset;
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl<K> LexTrace<K> for NoTrace {}

/// Prints every event to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTrace;

impl<K: Display> LexTrace<K> for StderrTrace {
    fn attempt(&mut self, rule: &'static str, offset: usize) {
        eprintln!("Trace: trying `{}` at offset {}", rule, offset);
    }

    fn skipped(&mut self, rule: &'static str, offset: usize) {
        eprintln!("Trace: skipping `{}` at offset {}", rule, offset);
    }

    fn matched(&mut self, rule: &'static str, token: &Token<K>) {
        eprintln!("Trace: `{}` produced {}", rule, token);
    }

    fn failed(&mut self, error: &MatchError) {
        eprintln!("Trace: {}", error);
    }

    fn exhausted(&mut self, offset: usize) {
        eprintln!("Trace: no rule matched at offset {}", offset);
    }
}

/// A recorded dispatch event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    Attempt { rule: &'static str, offset: usize },
    Skipped { rule: &'static str, offset: usize },
    Matched { rule: &'static str, start: usize, end: usize },
    Failed { rule: &'static str, offset: usize },
    Exhausted { offset: usize },
}

/// Keeps every event in order.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl<K> LexTrace<K> for TraceLog {
    fn attempt(&mut self, rule: &'static str, offset: usize) {
        self.events.push(TraceEvent::Attempt { rule, offset });
    }

    fn skipped(&mut self, rule: &'static str, offset: usize) {
        self.events.push(TraceEvent::Skipped { rule, offset });
    }

    fn matched(&mut self, rule: &'static str, token: &Token<K>) {
        self.events.push(TraceEvent::Matched {
            rule,
            start: token.start,
            end: token.end,
        });
    }

    fn failed(&mut self, error: &MatchError) {
        self.events.push(TraceEvent::Failed {
            rule: error.rule,
            offset: error.start,
        });
    }

    fn exhausted(&mut self, offset: usize) {
        self.events.push(TraceEvent::Exhausted { offset });
    }
}
