//! Parser for simple `path#anchor?params` URIs.
//!
//! This crate parses a URI-like string into a path, an optional anchor and an
//! ordered set of query parameters, and serializes the structured form back
//! to text.
//!
//! # Overview
//!
//! ```text
//! <path>[#<anchor>][?<name>[=<value>](&<name>[=<value>])*]
//! ```
//!
//! - The path runs up to the first `#` or `?`.
//! - The anchor runs from `#` up to the next `?`.
//! - Parameters are `&`-separated `name=value`, `name=` or `name` units.
//!   Pairs with empty names are dropped; a repeated name keeps its last value.
//!
//! # Quick Start
//!
//! ```rust
//! use uri_grammar::StructuredUri;
//!
//! let uri = StructuredUri::parse("p#anchor?x=1&y").unwrap();
//!
//! assert_eq!(uri.path(), "p");
//! assert_eq!(uri.anchor(), "anchor");
//! assert_eq!(uri.params().get("x"), Some("1"));
//! assert_eq!(uri.params().get("y"), Some(""));
//!
//! // Serialization always writes '=' for every pair
//! assert_eq!(uri.to_string(), "p#anchor?x=1&y=");
//! ```
//!
//! # Totality
//!
//! Every rule of the grammar is optional or repeats zero or more times, so
//! [`StructuredUri::parse`] accepts every string. It still returns a
//! `Result`: [`ParseError`] is raised when input is left unconsumed, naming
//! the production that was expected and the byte offset.
//!
//! No percent-decoding, scheme, host or port handling is performed.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod constants;
mod cursor;
mod error;
mod grammar;
#[cfg(kani)]
mod kani_impls;
pub mod prelude;
mod query;
mod uri;

pub use constants::{
    AMPERSAND, ANCHOR, END_OF_INPUT, EQUALS_SIGN, HASH, PARAMETERS, PARAMETER_NAME,
    PARAMETER_VALUE, PATH, QUESTION_MARK, URI,
};
pub use error::{ComponentError, ParseError, ParseErrorKind, ReadError};
pub use query::{PairForm, ParameterPair, QueryParams};
pub use uri::StructuredUri;
