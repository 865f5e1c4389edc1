//! Main structured URI type.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::constants::{HASH, QUESTION_MARK};
use crate::error::{ComponentError, ParseError, ReadError};
use crate::grammar;
use crate::query::QueryParams;

/// A parsed `path[#anchor][?params]` URI.
///
/// Values are immutable; the `with_*` methods build new values.
///
/// # Structure
///
/// ```text
/// <path>[#<anchor>][?<name>[=<value>](&<name>[=<value>])*]
/// ```
///
/// The path never contains `#` or `?`, the anchor never contains `?`, and
/// every parameter name is non-empty. An empty anchor means "no anchor".
///
/// # Examples
///
/// ```
/// use uri_grammar::StructuredUri;
///
/// let uri = StructuredUri::parse("docs/intro#setup?lang=en&draft").unwrap();
/// assert_eq!(uri.path(), "docs/intro");
/// assert_eq!(uri.anchor(), "setup");
/// assert_eq!(uri.params().get("lang"), Some("en"));
/// assert_eq!(uri.params().get("draft"), Some(""));
///
/// // Every serialized pair carries an '='
/// assert_eq!(uri.to_string(), "docs/intro#setup?lang=en&draft=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredUri {
    path: String,
    anchor: String,
    params: QueryParams,
}

impl StructuredUri {
    /// Parses a URI from a string.
    ///
    /// The grammar accepts every string, so this only fails if input is
    /// left unconsumed, which the current grammar never does.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` naming the expected production and the byte
    /// offset where parsing stopped.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let components = grammar::parse_uri(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })?;
        Ok(Self {
            path: components.path.to_string(),
            anchor: components.anchor.to_string(),
            params: components.params,
        })
    }

    /// Reads a file fully and parses its contents.
    ///
    /// The contents are used as-is; a trailing newline becomes part of the
    /// last component.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::Io` if the file cannot be read and
    /// `ReadError::Parse` if its contents fail to parse.
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Self, ReadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ReadError::io(path.display().to_string(), e))?;
        debug!(path = %path.display(), bytes = contents.len(), "read URI file");
        Self::parse(&contents).map_err(ReadError::from)
    }

    /// Creates a URI from its components.
    ///
    /// Parameters with empty names were already dropped by [`QueryParams`].
    /// The result always reparses to an equal value.
    ///
    /// # Errors
    ///
    /// Returns `ComponentError` if the path contains `#` or `?`, the anchor
    /// contains `?`, a parameter name contains `&` or `=`, or a parameter
    /// value contains `&`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_grammar::{QueryParams, StructuredUri};
    ///
    /// let params: QueryParams = [("x", "1")].into_iter().collect();
    /// let uri = StructuredUri::new("a", "", params).unwrap();
    /// assert_eq!(uri, StructuredUri::parse("a?x=1").unwrap());
    ///
    /// assert!(StructuredUri::new("a?b", "", QueryParams::new()).is_err());
    /// ```
    pub fn new(
        path: impl Into<String>,
        anchor: impl Into<String>,
        params: QueryParams,
    ) -> Result<Self, ComponentError> {
        let path = path.into();
        let anchor = anchor.into();
        Self::validate_path(&path)?;
        Self::validate_anchor(&anchor)?;
        params.validate()?;
        Ok(Self {
            path,
            anchor,
            params,
        })
    }

    /// Returns the path, possibly empty.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the anchor without its `#`; empty when there is none.
    #[must_use]
    pub fn anchor(&self) -> &str {
        &self.anchor
    }

    /// Returns true if the anchor is non-empty.
    #[must_use]
    pub fn has_anchor(&self) -> bool {
        !self.anchor.is_empty()
    }

    /// Returns the query parameters.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Returns a new URI with the given path.
    ///
    /// # Errors
    ///
    /// Returns `ComponentError` if the path contains `#` or `?`.
    pub fn with_path(&self, path: impl Into<String>) -> Result<Self, ComponentError> {
        Self::new(path, self.anchor.clone(), self.params.clone())
    }

    /// Returns a new URI with the given anchor.
    ///
    /// # Errors
    ///
    /// Returns `ComponentError` if the anchor contains `?`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_grammar::StructuredUri;
    ///
    /// let uri = StructuredUri::parse("page?x=1").unwrap();
    /// let updated = uri.with_anchor("top").unwrap();
    /// assert_eq!(updated.to_string(), "page#top?x=1");
    /// ```
    pub fn with_anchor(&self, anchor: impl Into<String>) -> Result<Self, ComponentError> {
        Self::new(self.path.clone(), anchor, self.params.clone())
    }

    /// Returns a new URI without an anchor.
    #[must_use]
    pub fn without_anchor(&self) -> Self {
        Self {
            path: self.path.clone(),
            anchor: String::new(),
            params: self.params.clone(),
        }
    }

    /// Returns a new URI with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `ComponentError` if a parameter name contains `&` or `=`, or
    /// a value contains `&`.
    pub fn with_params(&self, params: QueryParams) -> Result<Self, ComponentError> {
        params.validate()?;
        Ok(Self {
            path: self.path.clone(),
            anchor: self.anchor.clone(),
            params,
        })
    }

    /// Returns a new URI without parameters.
    #[must_use]
    pub fn without_params(&self) -> Self {
        Self {
            path: self.path.clone(),
            anchor: self.anchor.clone(),
            params: QueryParams::new(),
        }
    }

    fn validate_path(path: &str) -> Result<(), ComponentError> {
        match path.find([HASH, QUESTION_MARK]) {
            Some(position) => Err(ComponentError::InvalidPathChar {
                char: path[position..].chars().next().unwrap_or(HASH),
                position,
            }),
            None => Ok(()),
        }
    }

    fn validate_anchor(anchor: &str) -> Result<(), ComponentError> {
        match anchor.find(QUESTION_MARK) {
            Some(position) => Err(ComponentError::InvalidAnchorChar {
                char: QUESTION_MARK,
                position,
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for StructuredUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.anchor.is_empty() {
            write!(f, "{HASH}{}", self.anchor)?;
        }
        if !self.params.is_empty() {
            write!(f, "{QUESTION_MARK}{}", self.params)?;
        }
        Ok(())
    }
}

impl FromStr for StructuredUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for StructuredUri {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for StructuredUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for StructuredUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(entries: &[(&str, &str)]) -> QueryParams {
        entries.iter().copied().collect()
    }

    #[test]
    fn parse_path_only() {
        let uri = StructuredUri::parse("some/where").unwrap();
        assert_eq!(uri, StructuredUri::new("some/where", "", QueryParams::new()).unwrap());
        assert!(!uri.has_anchor());
    }

    #[test]
    fn parse_path_and_anchor() {
        let uri = StructuredUri::parse("p#section").unwrap();
        assert_eq!(uri.path(), "p");
        assert_eq!(uri.anchor(), "section");
        assert!(uri.has_anchor());
        assert!(uri.params().is_empty());
    }

    #[test]
    fn parse_with_params_and_display_roundtrip() {
        let uri = StructuredUri::parse("a?x=1&y=2").unwrap();
        assert_eq!(uri, StructuredUri::new("a", "", params(&[("x", "1"), ("y", "2")])).unwrap());
        assert_eq!(uri.to_string(), "a?x=1&y=2");
    }

    #[test]
    fn parse_valueless_params() {
        let uri = StructuredUri::parse("a?x&y=").unwrap();
        assert_eq!(uri.params(), &params(&[("x", ""), ("y", "")]));
        assert_eq!(uri.to_string(), "a?x=&y=");
    }

    #[test]
    fn parse_drops_empty_names() {
        let uri = StructuredUri::parse("a?=1&x=2").unwrap();
        assert_eq!(uri.params(), &params(&[("x", "2")]));
    }

    #[test]
    fn parse_anchor_then_params() {
        let uri = StructuredUri::parse("p#anchor?x=1").unwrap();
        assert_eq!(
            uri,
            StructuredUri::new("p", "anchor", params(&[("x", "1")])).unwrap()
        );
        assert_eq!(uri.to_string(), "p#anchor?x=1");
    }

    #[test]
    fn parse_duplicate_last_wins() {
        let uri = StructuredUri::parse("a?x=1&x=2").unwrap();
        assert_eq!(uri.params(), &params(&[("x", "2")]));
    }

    #[test]
    fn empty_anchor_is_not_serialized() {
        let uri = StructuredUri::parse("p#?x=1").unwrap();
        assert_eq!(uri.to_string(), "p?x=1");
    }

    #[test]
    fn empty_params_are_not_serialized() {
        let uri = StructuredUri::parse("p?&&").unwrap();
        assert_eq!(uri.to_string(), "p");
    }

    #[test]
    fn parse_empty_input() {
        let uri = StructuredUri::parse("").unwrap();
        assert_eq!(uri, StructuredUri::default());
        assert_eq!(uri.to_string(), "");
    }

    #[test]
    fn from_str_and_try_from() {
        let a: StructuredUri = "x#y".parse().unwrap();
        let b = StructuredUri::try_from("x#y").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn new_rejects_delimiters_in_path() {
        assert_eq!(
            StructuredUri::new("a#b", "", QueryParams::new()),
            Err(ComponentError::InvalidPathChar {
                char: '#',
                position: 1
            })
        );
        assert_eq!(
            StructuredUri::new("ab?", "", QueryParams::new()),
            Err(ComponentError::InvalidPathChar {
                char: '?',
                position: 2
            })
        );
    }

    #[test]
    fn new_rejects_question_mark_in_anchor() {
        assert_eq!(
            StructuredUri::new("a", "b?", QueryParams::new()),
            Err(ComponentError::InvalidAnchorChar {
                char: '?',
                position: 1
            })
        );
        assert!(StructuredUri::new("a", "b#c", QueryParams::new()).is_ok());
    }

    #[test]
    fn with_and_without_build_new_values() {
        let uri = StructuredUri::parse("a#b?x=1").unwrap();

        let moved = uri.with_path("c").unwrap();
        assert_eq!(moved.to_string(), "c#b?x=1");
        assert!(uri.with_path("c?").is_err());

        assert_eq!(uri.without_anchor().to_string(), "a?x=1");
        assert_eq!(uri.without_params().to_string(), "a#b");
        assert_eq!(
            uri.with_params(params(&[("y", "2")])).unwrap().to_string(),
            "a#b?y=2"
        );
        assert!(uri.with_anchor("c?d").is_err());

        // Original is untouched
        assert_eq!(uri.to_string(), "a#b?x=1");
    }

    #[test]
    fn new_rejects_params_that_would_reparse_differently() {
        let split_name = params(&[("x&y", "1")]);
        assert!(matches!(
            StructuredUri::new("p", "", split_name.clone()),
            Err(ComponentError::InvalidParamName { char: '&', .. })
        ));

        let split_value = params(&[("k", "a&b=c")]);
        assert_eq!(
            StructuredUri::new("p", "", split_value.clone()),
            Err(ComponentError::InvalidParamValue {
                name: "k".to_string(),
                position: 1
            })
        );

        let uri = StructuredUri::parse("p").unwrap();
        assert!(uri.with_params(split_name).is_err());
        assert!(uri.with_params(split_value).is_err());
        assert!(uri.with_params(params(&[("a=b", "")])).is_err());
    }

    #[test]
    fn caller_built_values_reparse_to_themselves() {
        let uri = StructuredUri::new("p", "a#b", params(&[("x#y", "1?=2"), ("k", "")])).unwrap();
        assert_eq!(StructuredUri::parse(&uri.to_string()).unwrap(), uri);
    }

    #[test]
    fn reparse_is_idempotent_for_valueless_forms() {
        let first = StructuredUri::parse("p?a&b=&c=3").unwrap();
        let second = StructuredUri::parse(&first.to_string()).unwrap();
        assert_eq!(first, second);
    }
}
