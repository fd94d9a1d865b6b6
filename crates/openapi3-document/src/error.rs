use thiserror::Error;

/// Failure to turn JSON or YAML text into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported mapping key: {key}")]
    UnsupportedKey { key: String },

    #[error("Duplicate mapping key: {key}")]
    DuplicateKey { key: String },

    #[error("Number cannot be represented: {0}")]
    UnsupportedNumber(String),
}

/// A malformed JSON pointer fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointerError {
    #[error("pointer '{pointer}' must be empty or start with '/'")]
    MissingLeadingSlash { pointer: String },

    #[error("pointer '{pointer}' contains an invalid escape sequence")]
    InvalidEscape { pointer: String },

    #[error("pointer '{pointer}' does not percent-decode to UTF-8")]
    InvalidPercentEncoding { pointer: String },
}
