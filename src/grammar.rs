//! Productions of the `path[#anchor][?params]` grammar.
//!
//! ```text
//! uri        = path [ anchor ] [ parameters ]
//! path       = *( any char except "#" / "?" )
//! anchor     = "#" *( any char except "?" )
//! parameters = "?" [ pair *( "&" [ pair ] ) ]
//! pair       = name "=" value / name "=" / name
//! name       = *( any char except "&" / "=" )
//! value      = *( any char except "&" )
//! ```
//!
//! Every rule either repeats zero or more times or is optional, so `uri`
//! accepts every input string.

use crate::constants::{
    AMPERSAND, ANCHOR, EQUALS_SIGN, HASH, PARAMETERS, PARAMETER_NAME, PARAMETER_VALUE, PATH,
    QUESTION_MARK, URI,
};
use crate::cursor::{Cursor, Outcome, Production, first_of, many, named, optional};
use crate::query::{PairForm, ParameterPair, QueryParams};

const HASH_NAME: &str = "'#'";
const QUESTION_MARK_NAME: &str = "'?'";
const AMPERSAND_NAME: &str = "'&'";
const EQUALS_SIGN_NAME: &str = "'='";

/// Pair alternatives in precedence order.
const PAIR_ALTERNATIVES: [Production<ParameterPair>; 3] =
    [pair_with_value, pair_without_value, pair_without_equals_sign];

/// The three components bound by the top-level rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Components<'a> {
    pub(crate) path: &'a str,
    pub(crate) anchor: &'a str,
    pub(crate) params: QueryParams,
}

/// Parses a whole URI; the input must be fully consumed.
pub(crate) fn parse_uri(input: &str) -> Outcome<Components<'_>> {
    let mut cursor = Cursor::new(input);
    let components = named(&mut cursor, URI, uri)?;
    cursor.finish()?;
    Ok(components)
}

/// Parses a parameter list without its leading `?`.
pub(crate) fn parse_query(input: &str) -> Outcome<QueryParams> {
    let mut cursor = Cursor::new(input);
    let params = optional(&mut cursor, pairs).unwrap_or_default();
    cursor.finish()?;
    Ok(params)
}

/// Parses exactly one parameter pair.
pub(crate) fn parse_pair(input: &str) -> Outcome<ParameterPair> {
    let mut cursor = Cursor::new(input);
    let pair = pair(&mut cursor)?;
    cursor.finish()?;
    Ok(pair)
}

fn uri<'a>(cursor: &mut Cursor<'a>) -> Outcome<Components<'a>> {
    let path = path(cursor)?;
    let anchor = optional(cursor, anchor).unwrap_or_default();
    let params = optional(cursor, parameters).unwrap_or_default();
    Ok(Components {
        path,
        anchor,
        params,
    })
}

fn path<'a>(cursor: &mut Cursor<'a>) -> Outcome<&'a str> {
    named(cursor, PATH, |c| Ok(c.take_except(&[HASH, QUESTION_MARK])))
}

fn anchor<'a>(cursor: &mut Cursor<'a>) -> Outcome<&'a str> {
    named(cursor, ANCHOR, |c| {
        c.expect_char(HASH, HASH_NAME)?;
        Ok(c.take_except(&[QUESTION_MARK]))
    })
}

fn parameter_name<'a>(cursor: &mut Cursor<'a>) -> Outcome<&'a str> {
    named(cursor, PARAMETER_NAME, |c| {
        Ok(c.take_except(&[AMPERSAND, EQUALS_SIGN]))
    })
}

fn parameter_value<'a>(cursor: &mut Cursor<'a>) -> Outcome<&'a str> {
    named(cursor, PARAMETER_VALUE, |c| Ok(c.take_except(&[AMPERSAND])))
}

fn pair_with_value(cursor: &mut Cursor<'_>) -> Outcome<ParameterPair> {
    let name = parameter_name(cursor)?;
    cursor.expect_char(EQUALS_SIGN, EQUALS_SIGN_NAME)?;
    let value = parameter_value(cursor)?;
    Ok(ParameterPair {
        name: name.to_string(),
        value: value.to_string(),
        form: PairForm::WithValue,
    })
}

fn pair_without_value(cursor: &mut Cursor<'_>) -> Outcome<ParameterPair> {
    let name = parameter_name(cursor)?;
    cursor.expect_char(EQUALS_SIGN, EQUALS_SIGN_NAME)?;
    Ok(ParameterPair {
        name: name.to_string(),
        value: String::new(),
        form: PairForm::WithoutValue,
    })
}

fn pair_without_equals_sign(cursor: &mut Cursor<'_>) -> Outcome<ParameterPair> {
    let name = parameter_name(cursor)?;
    Ok(ParameterPair {
        name: name.to_string(),
        value: String::new(),
        form: PairForm::WithoutEqualsSign,
    })
}

fn pair(cursor: &mut Cursor<'_>) -> Outcome<ParameterPair> {
    first_of(cursor, &PAIR_ALTERNATIVES)
}

/// `pair *( "&" [ pair ] )`, folded into a mapping.
fn pairs(cursor: &mut Cursor<'_>) -> Outcome<QueryParams> {
    let first = pair(cursor)?;
    let rest = many(cursor, |c| {
        c.expect_char(AMPERSAND, AMPERSAND_NAME)?;
        Ok(optional(c, pair))
    });
    Ok(std::iter::once(first).chain(rest.into_iter().flatten()).collect())
}

fn parameters(cursor: &mut Cursor<'_>) -> Outcome<QueryParams> {
    named(cursor, PARAMETERS, |c| {
        c.expect_char(QUESTION_MARK, QUESTION_MARK_NAME)?;
        Ok(optional(c, pairs).unwrap_or_default())
    })
}
