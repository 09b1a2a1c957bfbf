//! Tokenizes a few literal-heavy inputs with the reference rules, then
//! lexes a comma-separated list with closure rules over a kind enum of its
//! own.

use std::fmt;

use lexer_framework::{default_rules, Cursor, FnRule, LexError, Lexer, RuleSet, Token};

fn print_tokens<K: fmt::Display>(input: &str, result: Result<Vec<Token<K>>, LexError>) {
    println!("Input: {:?}", input);
    match result {
        Ok(tokens) => {
            for token in tokens {
                println!("  {}", token);
            }
        }
        Err(err) => println!("  error: {}", err),
    }
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Number,
    Comma,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Number => write!(f, "NUMBER"),
            ListKind::Comma => write!(f, "COMMA"),
        }
    }
}

fn list_rules() -> RuleSet<ListKind> {
    let number = FnRule::new("number", |cursor: &mut Cursor| {
        cursor
            .transaction("number", |c| {
                c.many1(|c| c.eat_if(|ch| ch.is_ascii_digit(), "digit"))
            })
            .map(|done| done.token(ListKind::Number))
    });
    let comma = FnRule::new("comma", |cursor: &mut Cursor| {
        cursor
            .transaction("comma", |c| c.eat_only(','))
            .map(|done| done.token(ListKind::Comma))
    });
    let mut rules: RuleSet<ListKind> = Vec::new();
    rules.push(Box::new(number));
    rules.push(Box::new(comma));
    rules
}

fn main() {
    let inputs = ["1..2.2123", "0x1A.5", "'it''s'", "0b101", "0b", "\"abc"];

    for input in inputs {
        let mut lexer = Lexer::from_str(input, default_rules());
        print_tokens(input, lexer.tokenize());
    }

    // Any Display type can serve as the token kind.
    for input in ["1,22,333", "1,,x"] {
        let mut lexer = Lexer::from_str(input, list_rules());
        print_tokens(input, lexer.tokenize());
    }
}
