//! Error types for URI parsing.

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur when parsing a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to parse
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the name of the production that was expected.
    #[must_use]
    pub const fn production(&self) -> &'static str {
        match self.kind {
            ParseErrorKind::Expected { production, .. } => production,
        }
    }

    /// Returns the byte offset at which parsing failed.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self.kind {
            ParseErrorKind::Expected { position, .. } => position,
        }
    }
}

/// Specific parsing error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A named production did not match at the given position
    Expected {
        /// Name of the innermost production that was expected
        production: &'static str,
        /// Byte offset in the input
        position: usize,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expected {
                production,
                position,
            } => write!(f, "expected {production} at position {position}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse URI '{}': {}", self.input, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Errors for building a URI from caller-supplied components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// The path contains `#` or `?`
    InvalidPathChar {
        /// The delimiter found
        char: char,
        /// Byte offset in the path
        position: usize,
    },
    /// The anchor contains `?`
    InvalidAnchorChar {
        /// The delimiter found
        char: char,
        /// Byte offset in the anchor
        position: usize,
    },
    /// A parameter name contains `&` or `=`
    InvalidParamName {
        /// The offending name
        name: String,
        /// The delimiter found
        char: char,
        /// Byte offset in the name
        position: usize,
    },
    /// A parameter value contains `&`
    InvalidParamValue {
        /// Name of the parameter
        name: String,
        /// Byte offset of the `&` in the value
        position: usize,
    },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathChar { char, position } => {
                write!(
                    f,
                    "path contains delimiter '{char}' at position {position}; path must not contain '#' or '?'"
                )
            }
            Self::InvalidAnchorChar { char, position } => {
                write!(
                    f,
                    "anchor contains delimiter '{char}' at position {position}; anchor must not contain '?'"
                )
            }
            Self::InvalidParamName {
                name,
                char,
                position,
            } => {
                write!(
                    f,
                    "parameter name '{name}' contains delimiter '{char}' at position {position}; names must not contain '&' or '='"
                )
            }
            Self::InvalidParamValue { name, position } => {
                write!(
                    f,
                    "value of parameter '{name}' contains '&' at position {position}"
                )
            }
        }
    }
}

impl std::error::Error for ComponentError {}

/// Errors for parsing a URI from a file.
#[derive(Debug, Clone)]
pub enum ReadError {
    /// The file could not be read
    Io {
        /// The file that was being read
        path: String,
        /// The underlying I/O error
        source: Arc<io::Error>,
    },
    /// The file contents did not parse
    Parse(ParseError),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read '{path}': {source}"),
            Self::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source.as_ref()),
            Self::Parse(e) => Some(e),
        }
    }
}

impl ReadError {
    /// Creates an I/O error for the file at `path`.
    #[must_use]
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(source),
        }
    }

    /// Returns the kind of the underlying I/O error, if this is one.
    #[must_use]
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. } => Some(source.kind()),
            Self::Parse(_) => None,
        }
    }
}

impl From<ParseError> for ReadError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}
