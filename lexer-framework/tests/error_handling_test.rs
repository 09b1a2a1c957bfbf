//! Error handling and boundary scenario tests.

use lexer_framework::{
    default_rules, lex, Cursor, EatError, FnRule, LexError, Lexer, LexingRule, MatchError,
    Position, Token, TokenKind,
};
use miette::Diagnostic;

fn no_match(err: LexError) -> (usize, Option<char>, Vec<MatchError>) {
    match err {
        LexError::NoMatch {
            offset,
            found,
            attempts,
            ..
        } => (offset, found, attempts),
        other => panic!("expected NoMatch, got {other:?}"),
    }
}

#[test]
fn test_unterminated_string_is_fatal() {
    let err = lex("\"abc").unwrap_err();
    let (offset, found, attempts) = no_match(err);
    assert_eq!(offset, 0);
    assert_eq!(found, Some('"'));

    let string = attempts.iter().find(|a| a.rule == "string").unwrap();
    assert!(string.failed_on_eof());
}

#[test]
fn test_bare_binary_prefix_fails_at_start() {
    let err = lex("0b").unwrap_err();
    assert_eq!(err.offset(), 0);

    let (_, found, attempts) = no_match(err);
    assert_eq!(found, Some('0'));
    let rules: Vec<_> = attempts.iter().map(|a| a.rule).collect();
    assert_eq!(rules, vec!["string", "dot", "hex", "bin", "dec"]);
}

#[test]
fn test_failure_after_tokens_reports_position() {
    let err = lex("'a\nb'.?").unwrap_err();
    assert_eq!(err.offset(), 6);
    assert_eq!(err.position(), Position::at(2, 4, 6));
    assert_eq!(err.to_string(), "no rule matched '?' at 2:4");
}

#[test]
fn test_iterator_fuses_after_error() {
    let mut lexer = Lexer::from_str("1?2", default_rules());
    assert_eq!(lexer.next().unwrap().unwrap().text(), "1");
    assert!(lexer.next().unwrap().is_err());
    assert!(lexer.next().is_none());
    assert_eq!(lexer.cursor().offset(), 1);
}

#[test]
fn test_no_rules() {
    let mut lexer: Lexer<TokenKind> = Lexer::from_str("1", Vec::new());
    let (offset, _, attempts) = no_match(lexer.tokenize().unwrap_err());
    assert_eq!(offset, 0);
    assert!(attempts.is_empty());
}

#[test]
fn test_no_rules_on_empty_input() {
    let mut lexer: Lexer<TokenKind> = Lexer::from_str("", Vec::new());
    assert_eq!(lexer.tokenize().unwrap(), Vec::new());
}

#[test]
fn test_empty_match_is_rejected() {
    let empty = FnRule::new("empty", |cursor: &mut Cursor| {
        cursor
            .transaction("empty", |_| Ok(()))
            .map(|done| done.token(TokenKind::Dot))
    });
    let rules: Vec<Box<dyn LexingRule<TokenKind>>> = vec![Box::new(empty)];
    let err = Lexer::from_str("x", rules).tokenize().unwrap_err();
    match err {
        LexError::NoProgress { rule, offset, .. } => {
            assert_eq!(rule, "empty");
            assert_eq!(offset, 0);
        }
        other => panic!("expected NoProgress, got {other:?}"),
    }
}

#[test]
fn test_dispatcher_restores_rule_without_transaction() {
    // Consumes directly on the cursor, then gives up.
    fn greedy(cursor: &mut Cursor) -> Result<Token, MatchError> {
        let start = cursor.offset();
        cursor.eat().map_err(|cause| MatchError::new("greedy", start, cause))?;
        cursor.eat().map_err(|cause| MatchError::new("greedy", start, cause))?;
        Err(MatchError::new(
            "greedy",
            start,
            EatError::mismatch("nothing", cursor.offset(), '!'),
        ))
    }

    let mut rules: Vec<Box<dyn LexingRule<TokenKind>>> = vec![Box::new(FnRule::new("greedy", greedy))];
    rules.extend(default_rules());
    let tokens = Lexer::from_str("12.5", rules).tokenize().unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].text(), "12.5");
}

#[test]
fn test_diagnostic_metadata() {
    let err = lex("0b").unwrap_err();
    assert_eq!(err.code().unwrap().to_string(), "lexer::no_match");

    let labels: Vec<_> = err.labels().unwrap().collect();
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].offset(), 0);
    assert_eq!(labels[0].len(), 1);

    assert_eq!(err.related().unwrap().count(), 5);
}

#[test]
fn test_match_error_message() {
    let mut cursor = Cursor::new("0x");
    let err = lexer_framework::rules::HexRule
        .try_match(&mut cursor)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "hex does not apply: at offset 2 found EOF while parsing hex digit"
    );
}
