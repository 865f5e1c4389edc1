//! Query parameter types.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{AMPERSAND, EQUALS_SIGN};
use crate::error::{ComponentError, ParseError};
use crate::grammar;

/// Which alternative of the pair grammar produced a [`ParameterPair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairForm {
    /// `name=value`, including `name=` when the value run is empty
    WithValue,
    /// `name=` recognized by the valueless fallback
    WithoutValue,
    /// `name` with no `=` at all
    WithoutEqualsSign,
}

/// A single `name[=value]` unit from a parameter list.
///
/// Pairs are transient: they are folded into [`QueryParams`], which keeps
/// only the name and value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterPair {
    /// The parameter name, possibly empty
    pub name: String,
    /// The parameter value, empty when absent
    pub value: String,
    /// The alternative that matched
    pub form: PairForm,
}

impl ParameterPair {
    /// Creates a pair in `name=value` form.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            form: PairForm::WithValue,
        }
    }

    /// Parses exactly one pair.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if input remains after the pair, e.g. an `&`.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_grammar::{PairForm, ParameterPair};
    ///
    /// let pair = ParameterPair::parse("flag").unwrap();
    /// assert_eq!(pair.name, "flag");
    /// assert_eq!(pair.value, "");
    /// assert_eq!(pair.form, PairForm::WithoutEqualsSign);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        grammar::parse_pair(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }
}

impl fmt::Display for ParameterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Query parameters of a URI.
///
/// An insertion-ordered mapping with unique, non-empty names. Inserting a
/// name that is already present replaces its value in place, so the last
/// occurrence wins while the first occurrence fixes the position.
///
/// Equality ignores order. Lookups, inserts and per-key comparison are
/// constant time, so folding a parameter list is linear in its length.
///
/// Values collected from caller data are not checked against the grammar;
/// a name containing `&` or `=`, or a value containing `&`, does not survive
/// [`Display`](fmt::Display) followed by [`QueryParams::parse`].
/// [`StructuredUri::new`](crate::StructuredUri::new) rejects such parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: Vec<(String, String)>,
    /// Name to slot in `params`
    index: HashMap<String, usize>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a parameter list without its leading `?`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the input does not match the pair grammar.
    /// The pair grammar accepts every string, so this does not fail in
    /// practice.
    ///
    /// # Examples
    ///
    /// ```
    /// use uri_grammar::QueryParams;
    ///
    /// let params = QueryParams::parse("x=1&&=2&x=3&flag").unwrap();
    /// assert_eq!(params.get("x"), Some("3"));
    /// assert_eq!(params.get("flag"), Some(""));
    /// assert_eq!(params.len(), 2);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        grammar::parse_query(input).map_err(|kind| ParseError {
            input: input.to_string(),
            kind,
        })
    }

    /// Returns the value for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&slot| self.params[slot].1.as_str())
    }

    /// Returns true if a parameter with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns an iterator over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns an iterator over the parameter names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|(k, _)| k.as_str())
    }

    /// Checks that every parameter reparses to itself once serialized.
    pub(crate) fn validate(&self) -> Result<(), ComponentError> {
        for (name, value) in &self.params {
            if let Some(position) = name.find([AMPERSAND, EQUALS_SIGN]) {
                return Err(ComponentError::InvalidParamName {
                    name: name.clone(),
                    char: name[position..].chars().next().unwrap_or(AMPERSAND),
                    position,
                });
            }
            if let Some(position) = value.find(AMPERSAND) {
                return Err(ComponentError::InvalidParamValue {
                    name: name.clone(),
                    position,
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, name: String, value: String) {
        if name.is_empty() {
            return;
        }
        if let Some(&slot) = self.index.get(&name) {
            self.params[slot].1 = value;
        } else {
            self.index.insert(name.clone(), self.params.len());
            self.params.push((name, value));
        }
    }
}

impl PartialEq for QueryParams {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for QueryParams {}

impl FromIterator<ParameterPair> for QueryParams {
    fn from_iter<I: IntoIterator<Item = ParameterPair>>(iter: I) -> Self {
        let mut params = Self::new();
        for pair in iter {
            params.insert(pair.name, pair.value);
        }
        params
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name.into(), value.into());
        }
        params
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

impl FromStr for QueryParams {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ParamsVisitor;

        impl<'de> serde::de::Visitor<'de> for ParamsVisitor {
            type Value = QueryParams;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of parameter names to values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut params = QueryParams::new();
                while let Some((k, v)) = access.next_entry::<String, String>()? {
                    params.insert(k, v);
                }
                Ok(params)
            }
        }

        deserializer.deserialize_map(ParamsVisitor)
    }
}
