//! Error types for descriptor and metadata document parsing.

use thiserror::Error;

/// Errors produced while parsing a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor text was empty.
    #[error("empty type descriptor")]
    Empty,

    /// The first token is not a known type tag.
    #[error("unknown type '{tag}'")]
    UnknownType { tag: String },

    /// Wrong number of parameters for a type.
    #[error("type '{tag}' expects {expected} parameter(s), got {actual}")]
    Arity {
        tag: &'static str,
        expected: &'static str,
        actual: usize,
    },

    /// A currency or percentage names a numeric type it cannot wrap.
    #[error("type '{tag}' cannot wrap '{nested}'")]
    UnsupportedNested { tag: &'static str, nested: String },

    /// The symbol position is neither `pre` nor `post`.
    #[error("type '{tag}' has invalid symbol position '{value}' (expected pre or post)")]
    Position { tag: &'static str, value: String },

    /// A thousands separator that overlaps the decimal mark.
    #[error("type '{tag}' has thousands separator '{thousands}' overlapping decimal separator '{decimal}'")]
    SeparatorClash {
        tag: &'static str,
        thousands: String,
        decimal: String,
    },

    /// A boolean descriptor with an empty true word.
    #[error("type 'boolean' requires a non-empty true word")]
    EmptyTrueWord,

    /// The locale tag cannot be parsed.
    #[error("invalid locale '{value}'")]
    Locale { value: String },

    /// The date pattern cannot be compiled.
    #[error("invalid date pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}

impl DescriptorError {
    pub(crate) fn arity(tag: &'static str, expected: &'static str, actual: usize) -> Self {
        Self::Arity {
            tag,
            expected,
            actual,
        }
    }

    pub(crate) fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors produced while parsing a metadata document.
///
/// Row numbers are 1-based and count the header row when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The first row is not `domain,key,value`.
    #[error("bad header: expected 'domain,key,value', got '{found}'")]
    BadHeader { found: String },

    /// A row without exactly three fields.
    #[error("row {row}: expected 3 fields (domain, key, value), got {fields}")]
    BadRow { row: usize, fields: usize },

    /// The domain is not one of meta, file, csv, data.
    #[error("row {row}: unknown domain '{domain}'")]
    UnknownDomain { row: usize, domain: String },

    /// The key is not known in its domain.
    #[error("row {row}: unknown key '{key}' in domain '{domain}'")]
    UnknownKey {
        row: usize,
        domain: String,
        key: String,
    },

    /// A boolean setting other than `true` or `false`.
    #[error("row {row}: '{key}' must be true or false, got '{value}'")]
    InvalidBoolean {
        row: usize,
        key: String,
        value: String,
    },

    /// A character setting that is not exactly one character.
    #[error("row {row}: '{key}' must be a single character, got '{value}'")]
    InvalidChar {
        row: usize,
        key: String,
        value: String,
    },

    /// An encoding label unknown to the encoding registry.
    #[error("row {row}: unknown encoding '{value}'")]
    UnknownEncoding { row: usize, value: String },

    /// A column key whose index is not a non-negative integer.
    #[error("row {row}: invalid column index '{value}'")]
    InvalidColumnIndex { row: usize, value: String },

    /// A column type that does not parse.
    #[error("row {row}: {source}")]
    Descriptor {
        row: usize,
        #[source]
        source: DescriptorError,
    },
}

impl DocumentError {
    /// The 1-based row the error was raised on.
    #[must_use]
    pub fn row(&self) -> usize {
        match self {
            Self::BadHeader { .. } => 1,
            Self::BadRow { row, .. }
            | Self::UnknownDomain { row, .. }
            | Self::UnknownKey { row, .. }
            | Self::InvalidBoolean { row, .. }
            | Self::InvalidChar { row, .. }
            | Self::UnknownEncoding { row, .. }
            | Self::InvalidColumnIndex { row, .. }
            | Self::Descriptor { row, .. } => *row,
        }
    }
}

/// Result type for descriptor parsing.
pub type Result<T> = std::result::Result<T, DescriptorError>;
