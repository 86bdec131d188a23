//! Field codecs.
//!
//! [`build_codec`] turns a [`Descriptor`] and the document null marker into a
//! [`FieldCodec`] that reads and writes the text of one column. A codec is
//! immutable once built and is reused for every row of a stream.

mod affix;
mod boolean;
mod date;
mod number;

use metacsv_model::Descriptor;

use crate::error::{CodecError, Result};
use crate::value::FieldValue;

use affix::AffixCodec;
use boolean::BooleanCodec;
use date::DateCodec;
use number::NumberCodec;

pub(crate) use date::{canonical_date, canonical_datetime};
pub(crate) use number::canonical_decimal;

#[derive(Debug, Clone)]
enum Inner {
    Boolean(BooleanCodec),
    Number(NumberCodec),
    Date(DateCodec),
    Datetime(DateCodec),
    Affixed(AffixCodec),
    Text,
    Object,
}

impl Inner {
    /// Whether surrounding whitespace is insignificant for the type.
    fn trims(&self) -> bool {
        matches!(
            self,
            Self::Number(_) | Self::Date(_) | Self::Datetime(_) | Self::Affixed(_)
        )
    }
}

/// The decode/encode pair of one column.
#[derive(Debug, Clone)]
pub struct FieldCodec {
    descriptor: Descriptor,
    null_value: String,
    inner: Inner,
}

/// Builds the codec of a column.
///
/// Never fails: every descriptor the parser accepts has a codec.
pub fn build_codec(descriptor: &Descriptor, null_value: &str) -> FieldCodec {
    let inner = match descriptor {
        Descriptor::Boolean(format) => Inner::Boolean(BooleanCodec::new(format)),
        Descriptor::Integer(format) => Inner::Number(NumberCodec::integer(format)),
        Descriptor::Float(format) => Inner::Number(NumberCodec::float(format)),
        Descriptor::Decimal(format) => Inner::Number(NumberCodec::decimal(format)),
        Descriptor::Date(format) => Inner::Date(DateCodec::date(format)),
        Descriptor::Datetime(format) => Inner::Datetime(DateCodec::datetime(format)),
        Descriptor::Currency(affixed) => Inner::Affixed(AffixCodec::currency(affixed)),
        Descriptor::Percentage(affixed) => Inner::Affixed(AffixCodec::percentage(affixed)),
        Descriptor::Text => Inner::Text,
        Descriptor::Object(_) => Inner::Object,
    };
    tracing::debug!(tag = descriptor.tag(), "built field codec");
    FieldCodec {
        descriptor: descriptor.clone(),
        null_value: null_value.to_string(),
        inner,
    }
}

impl FieldCodec {
    /// The descriptor the codec was built from.
    #[must_use]
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// The text standing for a missing value.
    #[must_use]
    pub fn null_value(&self) -> &str {
        &self.null_value
    }

    fn is_null(&self, text: &str) -> bool {
        if self.inner.trims() {
            text.trim() == self.null_value
        } else {
            text == self.null_value
        }
    }

    /// Reads the text of a field.
    ///
    /// The null marker decodes to [`FieldValue::Null`]. Text and object
    /// columns never fail.
    pub fn decode(&self, text: &str) -> Result<FieldValue> {
        if self.is_null(text) {
            return Ok(FieldValue::Null);
        }
        match &self.inner {
            Inner::Boolean(codec) => codec.decode(text).map(FieldValue::Boolean),
            Inner::Number(codec) => codec.decode(text, false),
            Inner::Date(codec) => codec.decode_date(text.trim()).map(FieldValue::Date),
            Inner::Datetime(codec) => codec
                .decode_datetime(text.trim())
                .map(FieldValue::Datetime),
            Inner::Affixed(codec) => codec.decode(text),
            Inner::Text => Ok(FieldValue::Text(text.to_string())),
            Inner::Object => Ok(FieldValue::Object(text.to_string())),
        }
    }

    /// Writes a value; [`FieldValue::Null`] becomes the null marker.
    ///
    /// A text value equal to the null marker is written as is and reads
    /// back as null.
    pub fn encode(&self, value: &FieldValue) -> Result<String> {
        if value.is_null() {
            return Ok(self.null_value.clone());
        }
        match (&self.inner, value) {
            (Inner::Boolean(codec), _) => codec.encode(value),
            (Inner::Number(codec), _) => codec.encode(value, false),
            (Inner::Date(codec) | Inner::Datetime(codec), _) => codec.encode(value),
            (Inner::Affixed(codec), _) => codec.encode(value),
            (Inner::Text, FieldValue::Text(text))
            | (Inner::Object, FieldValue::Object(text) | FieldValue::Text(text)) => {
                Ok(text.clone())
            }
            (Inner::Text | Inner::Object, other) => Err(CodecError::ValueMismatch {
                expected: self.descriptor.tag(),
                found: other.type_name(),
            }),
        }
    }

    /// Re-expresses the text of a field in its canonical form.
    ///
    /// The null marker maps to the empty string.
    pub fn to_canonical_string(&self, text: &str) -> Result<String> {
        self.decode(text).map(|value| value.to_canonical_string())
    }
}
