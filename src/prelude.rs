//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use uri_grammar::prelude::*;
//!
//! let uri = StructuredUri::parse("a?x=1").unwrap();
//! assert_eq!(uri.params().get("x"), Some("1"));
//! ```
//!
//! Delimiter and production-name constants are left out; import them from
//! the crate root.

pub use crate::{
    // Core types
    PairForm, ParameterPair, QueryParams, StructuredUri,
    // Errors
    ComponentError, ParseError, ParseErrorKind, ReadError,
};
