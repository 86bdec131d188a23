//! Error types for field decoding and encoding.

use thiserror::Error;

use metacsv_model::SymbolPosition;

/// Errors raised by a [`FieldCodec`](crate::FieldCodec).
///
/// Decode errors come from untrusted text and can be absorbed by an
/// [`OnError`](crate::OnError) policy. `ValueMismatch` and `Unrepresentable`
/// are encode errors: the caller handed the codec a value it cannot write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("'{text}' is not a boolean")]
    InvalidBoolean { text: String },

    #[error("'{text}' is not an integer")]
    InvalidInteger { text: String },

    #[error("'{text}' is not a float")]
    InvalidFloat { text: String },

    #[error("'{text}' is not a decimal")]
    InvalidDecimal { text: String },

    #[error("'{text}' does not match date pattern '{pattern}'")]
    InvalidDate { text: String, pattern: String },

    #[error("'{text}' does not match datetime pattern '{pattern}'")]
    InvalidDatetime { text: String, pattern: String },

    /// The currency or percentage symbol is not where the descriptor puts it.
    #[error("'{text}' lacks symbol '{symbol}' at {} position", .position.as_str())]
    MissingSymbol {
        text: String,
        symbol: String,
        position: SymbolPosition,
    },

    /// Encoding a value of the wrong shape for the column.
    #[error("cannot encode {found} value in {expected} column")]
    ValueMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Encoding a value the column format cannot express.
    #[error("cannot encode {value}: {reason}")]
    Unrepresentable { value: String, reason: &'static str },
}

impl CodecError {
    /// Whether the error comes from decoding untrusted text.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        !matches!(
            self,
            Self::ValueMismatch { .. } | Self::Unrepresentable { .. }
        )
    }
}

/// A codec error located at a column of a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("column {column}: {source}")]
pub struct ColumnError {
    pub column: usize,
    #[source]
    pub source: CodecError,
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
