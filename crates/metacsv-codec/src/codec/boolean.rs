//! Boolean fields.

use metacsv_model::BooleanFormat;

use crate::error::{CodecError, Result};
use crate::value::FieldValue;

#[derive(Debug, Clone)]
pub(crate) struct BooleanCodec {
    true_word: String,
    false_word: String,
    true_folded: String,
    false_folded: String,
}

impl BooleanCodec {
    pub(crate) fn new(format: &BooleanFormat) -> Self {
        Self {
            true_word: format.true_word.clone(),
            false_word: format.false_word.clone(),
            true_folded: format.true_word.to_lowercase(),
            false_folded: format.false_word.to_lowercase(),
        }
    }

    /// Case-insensitive match against both words.
    pub(crate) fn decode(&self, text: &str) -> Result<bool> {
        let folded = text.to_lowercase();
        if folded == self.true_folded {
            Ok(true)
        } else if !self.false_folded.is_empty() && folded == self.false_folded {
            Ok(false)
        } else {
            Err(CodecError::InvalidBoolean {
                text: text.to_string(),
            })
        }
    }

    pub(crate) fn encode(&self, value: &FieldValue) -> Result<String> {
        match value {
            FieldValue::Boolean(true) => Ok(self.true_word.clone()),
            FieldValue::Boolean(false) if self.false_word.is_empty() => {
                Err(CodecError::Unrepresentable {
                    value: "false".to_string(),
                    reason: "the column declares no false word",
                })
            }
            FieldValue::Boolean(false) => Ok(self.false_word.clone()),
            other => Err(CodecError::ValueMismatch {
                expected: "boolean",
                found: other.type_name(),
            }),
        }
    }
}
