//! Cursor and combinator helpers the grammar is built from.
//!
//! Every production is a plain function taking `&mut Cursor` and returning an
//! [`Outcome`]. A failed production leaves the cursor where it stopped; the
//! combinators that may backtrack ([`optional`], [`first_of`], [`many`])
//! restore a checkpoint before trying anything else.

use tracing::trace;

use crate::constants::END_OF_INPUT;
use crate::error::ParseErrorKind;

/// Result of running a production.
pub(crate) type Outcome<T> = Result<T, ParseErrorKind>;

/// A production that can be used as an alternative in [`first_of`].
pub(crate) type Production<T> = fn(&mut Cursor<'_>) -> Outcome<T>;

/// A byte position into an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the current byte offset.
    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unconsumed input.
    pub(crate) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Returns true if all input has been consumed.
    pub(crate) const fn is_at_end(&self) -> bool {
        self.pos == self.input.len()
    }

    /// Returns the next character without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes `expected` if it is the next character.
    pub(crate) fn expect_char(&mut self, expected: char, production: &'static str) -> Outcome<char> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += c.len_utf8();
                Ok(c)
            }
            _ => Err(ParseErrorKind::Expected {
                production,
                position: self.pos,
            }),
        }
    }

    /// Consumes the longest run of characters not in `excluded`.
    ///
    /// Never fails; the run may be empty.
    pub(crate) fn take_except(&mut self, excluded: &[char]) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| excluded.contains(&c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    /// Succeeds only if the whole input has been consumed.
    pub(crate) fn finish(&self) -> Outcome<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(ParseErrorKind::Expected {
                production: END_OF_INPUT,
                position: self.pos,
            })
        }
    }
}

/// Runs `production`, yielding `None` and restoring the cursor on failure.
pub(crate) fn optional<'a, T>(
    cursor: &mut Cursor<'a>,
    production: impl FnOnce(&mut Cursor<'a>) -> Outcome<T>,
) -> Option<T> {
    let checkpoint = *cursor;
    if let Ok(value) = production(cursor) {
        Some(value)
    } else {
        *cursor = checkpoint;
        None
    }
}

/// Runs `production` until it fails or stops consuming input.
pub(crate) fn many<'a, T>(
    cursor: &mut Cursor<'a>,
    mut production: impl FnMut(&mut Cursor<'a>) -> Outcome<T>,
) -> Vec<T> {
    let mut items = Vec::new();
    loop {
        let start = cursor.position();
        match optional(cursor, &mut production) {
            Some(item) => {
                items.push(item);
                if cursor.position() == start {
                    break;
                }
            }
            None => break,
        }
    }
    items
}

/// Biased alternation: tries each alternative from the same position and
/// returns the first success.
///
/// The alternative list must be non-empty; an empty array is rejected at
/// compile time. If every alternative fails, the failure of the last one is
/// returned and the cursor is left at the starting position.
pub(crate) fn first_of<T, const N: usize>(
    cursor: &mut Cursor<'_>,
    alternatives: &[Production<T>; N],
) -> Outcome<T> {
    const { assert!(N > 0, "biased alternation needs at least one alternative") };
    let checkpoint = *cursor;
    let mut result = alternatives[0](cursor);
    for alternative in &alternatives[1..] {
        if result.is_ok() {
            break;
        }
        *cursor = checkpoint;
        result = alternative(cursor);
    }
    if result.is_err() {
        *cursor = checkpoint;
    }
    result
}

/// Runs `production` under a diagnostic name.
///
/// A failure at the position where the production started is reported as
/// expecting `name`; a failure after some input was consumed keeps the
/// innermost name.
pub(crate) fn named<'a, T>(
    cursor: &mut Cursor<'a>,
    name: &'static str,
    production: impl FnOnce(&mut Cursor<'a>) -> Outcome<T>,
) -> Outcome<T> {
    let start = cursor.position();
    trace!(production = name, position = start, "enter");
    let result = production(cursor);
    match result {
        Ok(value) => {
            trace!(production = name, end = cursor.position(), "matched");
            Ok(value)
        }
        Err(ParseErrorKind::Expected { position, .. }) if position == start => {
            trace!(production = name, position, "failed");
            Err(ParseErrorKind::Expected {
                production: name,
                position,
            })
        }
        Err(e) => {
            trace!(production = name, error = %e, "failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter_a(cursor: &mut Cursor<'_>) -> Outcome<char> {
        cursor.expect_char('a', "'a'")
    }

    fn letter_b(cursor: &mut Cursor<'_>) -> Outcome<char> {
        cursor.expect_char('b', "'b'")
    }

    fn ab(cursor: &mut Cursor<'_>) -> Outcome<char> {
        letter_a(cursor)?;
        letter_b(cursor)
    }

    #[test]
    fn expect_char_consumes_on_match() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.expect_char('a', "'a'"), Ok('a'));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.rest(), "b");
    }

    #[test]
    fn expect_char_reports_position_on_mismatch() {
        let mut cursor = Cursor::new("xb");
        assert_eq!(
            cursor.expect_char('a', "'a'"),
            Err(ParseErrorKind::Expected {
                production: "'a'",
                position: 0
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn expect_char_at_end_fails() {
        let mut cursor = Cursor::new("");
        assert!(cursor.expect_char('a', "'a'").is_err());
    }

    #[test]
    fn take_except_stops_at_excluded() {
        let mut cursor = Cursor::new("abc#def");
        assert_eq!(cursor.take_except(&['#', '?']), "abc");
        assert_eq!(cursor.peek(), Some('#'));
    }

    #[test]
    fn take_except_may_be_empty() {
        let mut cursor = Cursor::new("?x");
        assert_eq!(cursor.take_except(&['?']), "");
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn take_except_handles_multibyte() {
        let mut cursor = Cursor::new("héllo?x");
        assert_eq!(cursor.take_except(&['?']), "héllo");
        assert_eq!(cursor.position(), "héllo".len());
    }

    #[test]
    fn optional_restores_on_failure() {
        let mut cursor = Cursor::new("ac");
        assert_eq!(optional(&mut cursor, ab), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn many_collects_until_failure() {
        let mut cursor = Cursor::new("aaab");
        assert_eq!(many(&mut cursor, letter_a), vec!['a', 'a', 'a']);
        assert_eq!(cursor.rest(), "b");
    }

    #[test]
    fn many_stops_without_progress() {
        let mut cursor = Cursor::new("xyz");
        let runs = many(&mut cursor, |c| Ok(c.take_except(&['x'])));
        assert_eq!(runs, vec![""]);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn first_of_is_biased() {
        const ALTERNATIVES: [Production<char>; 2] = [letter_a, ab];
        let mut cursor = Cursor::new("ab");
        assert_eq!(first_of(&mut cursor, &ALTERNATIVES), Ok('a'));
        assert_eq!(cursor.rest(), "b");
    }

    #[test]
    fn first_of_falls_back_after_partial_match() {
        const ALTERNATIVES: [Production<char>; 2] = [ab, letter_a];
        let mut cursor = Cursor::new("ac");
        assert_eq!(first_of(&mut cursor, &ALTERNATIVES), Ok('a'));
        assert_eq!(cursor.rest(), "c");
    }

    #[test]
    fn first_of_returns_last_error() {
        const ALTERNATIVES: [Production<char>; 2] = [letter_a, letter_b];
        let mut cursor = Cursor::new("c");
        assert_eq!(
            first_of(&mut cursor, &ALTERNATIVES),
            Err(ParseErrorKind::Expected {
                production: "'b'",
                position: 0
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn first_of_single_alternative_reports_its_own_error() {
        const ALTERNATIVES: [Production<char>; 1] = [ab];
        let mut cursor = Cursor::new("ac");
        assert_eq!(
            first_of(&mut cursor, &ALTERNATIVES),
            Err(ParseErrorKind::Expected {
                production: "'b'",
                position: 1
            })
        );
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn named_relabels_failure_at_start() {
        let mut cursor = Cursor::new("c");
        assert_eq!(
            named(&mut cursor, "pair", ab),
            Err(ParseErrorKind::Expected {
                production: "pair",
                position: 0
            })
        );
    }

    #[test]
    fn named_keeps_innermost_failure_after_progress() {
        let mut cursor = Cursor::new("ac");
        assert_eq!(
            named(&mut cursor, "pair", ab),
            Err(ParseErrorKind::Expected {
                production: "'b'",
                position: 1
            })
        );
    }

    #[test]
    fn finish_reports_trailing_input() {
        let mut cursor = Cursor::new("ab");
        letter_a(&mut cursor).unwrap();
        assert_eq!(
            cursor.finish(),
            Err(ParseErrorKind::Expected {
                production: "end of input",
                position: 1
            })
        );
    }
}
