use lexer_framework::{Cursor, EatError, Transaction};

#[test]
fn test_transaction_commits_on_success() {
    let mut cursor = Cursor::new("ab");
    let done = cursor
        .transaction("pair", |c| {
            c.eat_only('a')?;
            c.eat_only('b')
        })
        .unwrap();

    assert_eq!(done.value, "ab");
    assert_eq!(done.output, 'b');
    assert_eq!((done.frame.start(), done.frame.end()), (0, 2));
    assert_eq!(cursor.offset(), 2);
    assert_eq!(cursor.base(), 2);
    assert_eq!(cursor.depth(), 0);
}

#[test]
fn test_transaction_rolls_back_partial_progress() {
    let mut cursor = Cursor::new("ax");
    let err = cursor
        .transaction("pair", |c| {
            c.eat_only('a')?;
            c.eat_only('b')
        })
        .unwrap_err();

    assert_eq!(err.rule, "pair");
    assert_eq!(err.start, 0);
    assert_eq!(err.cause.offset, 1);
    assert_eq!(err.cause.found, Some('x'));
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.depth(), 0);
}

#[test]
fn test_transaction_keeps_eof_flag() {
    let mut cursor = Cursor::new("a");
    let err = cursor
        .transaction("pair", |c| {
            c.eat_only('a')?;
            c.eat_only('b')
        })
        .unwrap_err();
    assert!(err.failed_on_eof());
}

#[test]
fn test_nested_failure_rolls_back_every_level() {
    let mut cursor = Cursor::new("abcx");
    cursor.eat_only('a').unwrap();
    let before = cursor.offset();

    let result = cursor.transaction("outer", |c| {
        c.eat_only('b')?;
        c.transaction("middle", |c| {
            c.eat_only('c')?;
            c.transaction("inner", |c| c.eat_only('d'))?;
            Ok(())
        })?;
        Ok(())
    });

    let err = result.unwrap_err();
    assert_eq!(err.rule, "outer");
    assert_eq!(err.cause.expected, "middle");
    assert_eq!(err.cause.offset, 3);
    assert_eq!(cursor.offset(), before);
    assert_eq!(cursor.depth(), 0);
}

#[test]
fn test_nested_success_propagates_to_top() {
    let mut cursor = Cursor::new("abc");
    let done = cursor
        .transaction("outer", |c| {
            c.eat_only('a')?;
            let inner = c.transaction("inner", |c| {
                c.eat_only('b')?;
                c.eat_only('c')
            })?;
            Ok(inner.frame)
        })
        .unwrap();

    assert_eq!(done.output.end(), 3);
    assert_eq!(done.frame.end(), done.output.end());
    assert_eq!(cursor.offset(), 3);
}

#[test]
fn test_inner_failure_recovered_by_outer() {
    let mut cursor = Cursor::new("ab");
    let done = cursor
        .transaction("outer", |c| {
            c.eat_only('a')?;
            // the inner rule fails after consuming nothing of its own
            if c.transaction("inner", |c| c.eat_only('z')).is_err() {
                c.eat_only('b')?;
            }
            Ok(())
        })
        .unwrap();
    assert_eq!(done.value, "ab");
}

#[test]
fn test_guard_rolls_back_on_drop() {
    let mut cursor = Cursor::new("abc");
    {
        let mut tx = Transaction::begin(&mut cursor);
        tx.eat().unwrap();
        tx.eat().unwrap();
        assert_eq!(tx.offset(), 2);
        assert_eq!(tx.frame().len(), 2);
    }
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.depth(), 0);
}

#[test]
fn test_guard_rolls_back_on_early_return() {
    fn eat_two(cursor: &mut Cursor) -> Result<(), EatError> {
        let mut tx = Transaction::begin(cursor);
        tx.eat_only('a')?;
        tx.eat_only('b')?;
        tx.commit();
        Ok(())
    }

    let mut cursor = Cursor::new("ax");
    assert!(eat_two(&mut cursor).is_err());
    assert_eq!(cursor.offset(), 0);

    let mut cursor = Cursor::new("ab");
    assert!(eat_two(&mut cursor).is_ok());
    assert_eq!(cursor.offset(), 2);
}

#[test]
fn test_guard_discards_leaked_inner_frames() {
    let mut cursor = Cursor::new("abc");
    let tx = {
        let mut tx = Transaction::begin(&mut cursor);
        tx.eat().unwrap();
        // opened and never closed
        tx.begin();
        tx.eat().unwrap();
        tx.rollback()
    };

    assert_eq!((tx.start(), tx.end()), (0, 1));
    assert_eq!(cursor.offset(), 0);
    assert_eq!(cursor.depth(), 0);
}

#[test]
fn test_scoped_passes_error_through() {
    let mut cursor = Cursor::new("a");
    let err = cursor
        .scoped(|c| {
            c.eat_only('a')?;
            c.eat_only('b')
        })
        .unwrap_err();
    assert!(err.failed_on_eof());
    assert_eq!(cursor.offset(), 0);
}

#[test]
fn test_committed_token() {
    let mut cursor = Cursor::new("..");
    let token = cursor
        .transaction("dot", |c| c.eat_only('.'))
        .unwrap()
        .token("DOT");
    assert_eq!(token.kind, "DOT");
    assert_eq!(token.text(), ".");
    assert_eq!((token.start, token.end), (0, 1));
}
