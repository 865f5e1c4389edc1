//! Delimiters and production names for the URI grammar.

/// Introduces the anchor.
pub const HASH: char = '#';

/// Introduces the parameter list.
pub const QUESTION_MARK: char = '?';

/// Separates parameter pairs.
pub const AMPERSAND: char = '&';

/// Separates a parameter name from its value.
pub const EQUALS_SIGN: char = '=';

/// Production name of the path.
pub const PATH: &str = "path";

/// Production name of the anchor.
pub const ANCHOR: &str = "anchor";

/// Production name of a parameter name.
pub const PARAMETER_NAME: &str = "parameter name";

/// Production name of a parameter value.
pub const PARAMETER_VALUE: &str = "parameter value";

/// Production name of the parameter list.
pub const PARAMETERS: &str = "parameters";

/// Production name of the whole URI.
pub const URI: &str = "URI";

/// Production name reported when trailing input remains.
pub const END_OF_INPUT: &str = "end of input";
