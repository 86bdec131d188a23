//! Decode error policies.
//!
//! Only decoding reads untrusted text, so only decoding is wrapped. Encoding
//! through a [`PolicyCodec`] reports errors unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

use metacsv_model::render_descriptor;

use crate::codec::FieldCodec;
use crate::error::{CodecError, Result};
use crate::value::FieldValue;

/// What to do when a field does not parse as its column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Return the codec error.
    #[default]
    Fail,
    /// Read the field as null.
    SubstituteNull,
    /// Keep the original text.
    PassThroughText,
    /// Keep the original text together with the column type.
    WrapError,
}

/// A field whose text did not parse, kept under [`OnError::WrapError`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadError {
    text: String,
    descriptor: String,
}

impl ReadError {
    pub fn new(text: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            descriptor: descriptor.into(),
        }
    }

    /// The field text as read.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The rendered descriptor of the column.
    #[must_use]
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid {}", self.text, self.descriptor)
    }
}

/// Result of decoding one field under a policy.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Value(FieldValue),
    Null,
    RawText(String),
    Wrapped(ReadError),
}

impl DecodeOutcome {
    /// The decoded value, if the field parsed to a non-null value.
    #[must_use]
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Canonical text of a parsed value; unparsed fields keep their text.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Value(value) => value.to_canonical_string(),
            Self::Null => String::new(),
            Self::RawText(text) => text.clone(),
            Self::Wrapped(error) => error.text.clone(),
        }
    }
}

/// A [`FieldCodec`] whose decode errors are handled by an [`OnError`] policy.
#[derive(Debug, Clone)]
pub struct PolicyCodec {
    codec: FieldCodec,
    policy: OnError,
}

/// Wraps a codec with a decode error policy.
#[must_use]
pub fn wrap_with_policy(codec: FieldCodec, policy: OnError) -> PolicyCodec {
    PolicyCodec { codec, policy }
}

impl PolicyCodec {
    #[must_use]
    pub fn codec(&self) -> &FieldCodec {
        &self.codec
    }

    #[must_use]
    pub fn policy(&self) -> OnError {
        self.policy
    }

    /// Decodes a field. Only [`OnError::Fail`] ever returns an error.
    pub fn decode(&self, text: &str) -> Result<DecodeOutcome> {
        match self.codec.decode(text) {
            Ok(FieldValue::Null) => Ok(DecodeOutcome::Null),
            Ok(value) => Ok(DecodeOutcome::Value(value)),
            Err(error) => self.recover(text, error),
        }
    }

    fn recover(&self, text: &str, error: CodecError) -> Result<DecodeOutcome> {
        match self.policy {
            OnError::Fail => Err(error),
            OnError::SubstituteNull => Ok(DecodeOutcome::Null),
            OnError::PassThroughText => Ok(DecodeOutcome::RawText(text.to_string())),
            OnError::WrapError => Ok(DecodeOutcome::Wrapped(ReadError::new(
                text,
                render_descriptor(self.codec.descriptor()),
            ))),
        }
    }

    pub fn encode(&self, value: &FieldValue) -> Result<String> {
        self.codec.encode(value)
    }
}
