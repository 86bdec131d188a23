//! Whole-record decoding and encoding.

use std::collections::BTreeMap;

use metacsv_model::{Descriptor, Document};

use crate::codec::build_codec;
use crate::error::ColumnError;
use crate::policy::{DecodeOutcome, OnError, PolicyCodec, wrap_with_policy};
use crate::value::FieldValue;

/// Per-column codecs of a document, built on first use of each column.
///
/// Records may be wider than the declared columns; extra columns are read
/// as text. The cache only grows, so each column's codec is built once.
#[derive(Debug, Clone)]
pub struct RowCodec {
    columns: BTreeMap<usize, Descriptor>,
    declared: usize,
    null_value: String,
    policy: OnError,
    codecs: Vec<PolicyCodec>,
}

impl RowCodec {
    #[must_use]
    pub fn new(document: &Document, policy: OnError) -> Self {
        Self {
            columns: document
                .columns()
                .map(|(index, descriptor)| (index, descriptor.clone()))
                .collect(),
            declared: document.column_count(),
            null_value: document.null_value().to_string(),
            policy,
            codecs: Vec::new(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> OnError {
        self.policy
    }

    /// Number of codecs built so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.codecs.len()
    }

    /// The codec of a column, if a record has reached that column yet.
    #[must_use]
    pub fn codec(&self, index: usize) -> Option<&PolicyCodec> {
        self.codecs.get(index)
    }

    /// Builds the codecs of every column up to `width`.
    ///
    /// Only record widths reach here, so the cache never outgrows the
    /// widest record seen.
    fn extend_to(&mut self, width: usize) {
        while self.codecs.len() < width {
            let column = self.codecs.len();
            let descriptor = match self.columns.get(&column) {
                Some(descriptor) => descriptor.clone(),
                None => {
                    if column >= self.declared {
                        tracing::warn!(
                            column,
                            declared = self.declared,
                            "Record is wider than the declared columns, reading as text"
                        );
                    }
                    Descriptor::Text
                }
            };
            self.codecs
                .push(wrap_with_policy(build_codec(&descriptor, &self.null_value), self.policy));
        }
    }

    /// Decodes every field of a record.
    pub fn decode_record<S: AsRef<str>>(
        &mut self,
        fields: &[S],
    ) -> Result<Vec<DecodeOutcome>, ColumnError> {
        self.extend_to(fields.len());
        self.codecs
            .iter()
            .zip(fields)
            .enumerate()
            .map(|(column, (codec, field))| {
                codec
                    .decode(field.as_ref())
                    .map_err(|source| ColumnError { column, source })
            })
            .collect()
    }

    /// Encodes a row of values.
    pub fn encode_record(&mut self, values: &[FieldValue]) -> Result<Vec<String>, ColumnError> {
        self.extend_to(values.len());
        self.codecs
            .iter()
            .zip(values)
            .enumerate()
            .map(|(column, (codec, value))| {
                codec
                    .encode(value)
                    .map_err(|source| ColumnError { column, source })
            })
            .collect()
    }

    /// Re-expresses every field of a record in canonical form.
    ///
    /// Fields the policy absorbs keep their original text; null fields are
    /// empty.
    pub fn canonical_record<S: AsRef<str>>(
        &mut self,
        fields: &[S],
    ) -> Result<Vec<String>, ColumnError> {
        Ok(self
            .decode_record(fields)?
            .iter()
            .map(DecodeOutcome::to_canonical_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;
    use metacsv_model::DecimalFormat;

    fn document() -> Document {
        Document::builder()
            .null_value("NA")
            .column(0, Descriptor::integer(""))
            .column(2, Descriptor::Decimal(DecimalFormat::new(" ", ",")))
            .build()
    }

    #[test]
    fn builds_codecs_lazily() {
        let mut row = RowCodec::new(&document(), OnError::Fail);
        assert_eq!(row.cached(), 0);
        row.decode_record(&["1"]).expect("decode");
        assert_eq!(row.cached(), 1);
        row.decode_record(&["1", "a", "1 000,5", "extra"]).expect("decode");
        assert_eq!(row.cached(), 4);
        let descriptor =
            |row: &RowCodec, index: usize| row.codec(index).map(|c| c.codec().descriptor().clone());
        assert_eq!(descriptor(&row, 1), Some(Descriptor::Text));
        assert_eq!(descriptor(&row, 3), Some(Descriptor::Text));
    }

    #[test]
    fn lookup_never_builds_codecs() {
        let mut row = RowCodec::new(&document(), OnError::Fail);
        assert!(row.codec(usize::MAX).is_none());
        assert!(row.codec(0).is_none());
        assert_eq!(row.cached(), 0);
        row.decode_record(&["1", "a"]).expect("decode");
        assert_eq!(row.cached(), 2);
        assert!(row.codec(2).is_none());
    }

    #[test]
    fn decodes_and_encodes_records() {
        let mut row = RowCodec::new(&document(), OnError::Fail);
        let outcomes = row
            .decode_record(&["7", "NA", "NA"])
            .expect("decode");
        assert_eq!(
            outcomes,
            vec![
                DecodeOutcome::Value(FieldValue::Integer(7)),
                DecodeOutcome::Null,
                DecodeOutcome::Null,
            ]
        );
        let encoded = row
            .encode_record(&[
                FieldValue::Integer(1234),
                FieldValue::from("x"),
                FieldValue::Null,
            ])
            .expect("encode");
        assert_eq!(encoded, vec!["1234", "x", "NA"]);
    }

    #[test]
    fn error_names_the_column() {
        let mut row = RowCodec::new(&document(), OnError::Fail);
        let err = row.decode_record(&["1", "a", "x"]).expect_err("invalid decimal");
        assert_eq!(err.column, 2);
        assert_eq!(
            err.source,
            CodecError::InvalidDecimal {
                text: "x".to_string()
            }
        );
        assert_eq!(err.to_string(), "column 2: 'x' is not a decimal");
    }

    #[test]
    fn canonical_record_keeps_absorbed_text() {
        let mut row = RowCodec::new(&document(), OnError::PassThroughText);
        assert_eq!(
            row.canonical_record(&["x", "NA", "1 000,50"]).expect("canonical"),
            vec!["x", "", "1000.5"]
        );
    }
}
