//! Typed record reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use metacsv_codec::{DecodeOutcome, OnError, RowCodec};
use metacsv_model::Document;

use crate::dialect::Dialect;
use crate::encoding::{Source, decode_field, open_source};
use crate::error::{IngestError, Result};

/// Options for reading a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Decode error policy applied to every column.
    pub on_error: OnError,
    /// Whether the first record holds column names.
    pub has_headers: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            on_error: OnError::Fail,
            has_headers: true,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    #[must_use]
    pub fn has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

/// Reads a data file record by record, decoding fields with the column
/// codecs of its metadata document.
#[derive(Debug)]
pub struct TypedReader<R> {
    records: csv::Reader<Source<R>>,
    encoding: &'static Encoding,
    skip_initial_space: bool,
    row: RowCodec,
    record: csv::ByteRecord,
    headers: Option<Vec<String>>,
}

impl TypedReader<File> {
    /// Opens a data file described by `document`.
    pub fn from_path(path: &Path, document: &Document, options: ReadOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
        Self::from_reader(file, document, options)
    }
}

impl<R: Read> TypedReader<R> {
    /// Wraps a byte stream in the document's encoding and dialect.
    ///
    /// With `has_headers`, the first record is read here and kept as column
    /// names.
    pub fn from_reader(reader: R, document: &Document, options: ReadOptions) -> Result<Self> {
        let dialect = Dialect::from_document(document)?;
        let (source, encoding) = open_source(reader, document.file().encoding)?;
        tracing::debug!(
            encoding = document.file().encoding.name(),
            delimiter = %char::from(dialect.delimiter).escape_default(),
            policy = ?options.on_error,
            "Opened typed reader"
        );
        let mut reader = Self {
            records: dialect.reader_builder().from_reader(source),
            encoding,
            skip_initial_space: dialect.skip_initial_space,
            row: RowCodec::new(document, options.on_error),
            record: csv::ByteRecord::new(),
            headers: None,
        };
        if options.has_headers {
            reader.headers = reader.read_text()?;
        }
        Ok(reader)
    }

    /// Column names, when the file has a header record.
    #[must_use]
    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Line of the record read last.
    fn line(&self) -> u64 {
        self.record.position().map_or(0, csv::Position::line)
    }

    /// Next record as text, or `None` at the end of input.
    fn read_text(&mut self) -> Result<Option<Vec<String>>> {
        if !self.records.read_byte_record(&mut self.record)? {
            return Ok(None);
        }
        let line = self.line();
        let mut fields = Vec::with_capacity(self.record.len());
        for (column, bytes) in self.record.iter().enumerate() {
            let decoded = decode_field(bytes, self.encoding).ok_or_else(|| IngestError::Decode {
                line,
                column,
                encoding: self.encoding.name(),
            })?;
            let text: &str = if self.skip_initial_space {
                decoded.trim_start_matches(' ')
            } else {
                &decoded
            };
            fields.push(text.to_string());
        }
        Ok(Some(fields))
    }

    /// Decodes the next record, or returns `None` at the end of input.
    pub fn read_record(&mut self) -> Result<Option<Vec<DecodeOutcome>>> {
        let Some(fields) = self.read_text()? else {
            return Ok(None);
        };
        let line = self.line();
        self.row
            .decode_record(fields.as_slice())
            .map(Some)
            .map_err(|e| IngestError::Field {
                line,
                column: e.column,
                source: e.source,
            })
    }

    /// Re-expresses the next record in canonical form.
    pub fn read_canonical(&mut self) -> Result<Option<Vec<String>>> {
        let Some(fields) = self.read_text()? else {
            return Ok(None);
        };
        let line = self.line();
        self.row
            .canonical_record(fields.as_slice())
            .map(Some)
            .map_err(|e| IngestError::Field {
                line,
                column: e.column,
                source: e.source,
            })
    }
}

impl<R: Read> Iterator for TypedReader<R> {
    type Item = Result<Vec<DecodeOutcome>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metacsv_codec::FieldValue;
    use metacsv_model::{Descriptor, DocumentBuilder};

    fn document() -> DocumentBuilder {
        Document::builder()
            .null_value("NA")
            .column(0, Descriptor::integer(""))
            .column(1, Descriptor::boolean("yes", "no"))
    }

    #[test]
    fn reads_headers_and_records() {
        let data = "id,flag,note\r\n1,YES,a\r\nNA,no,b,extra\r\n";
        let mut reader =
            TypedReader::from_reader(data.as_bytes(), &document().build(), ReadOptions::new())
                .expect("open");
        assert_eq!(
            reader.headers(),
            Some(&["id".to_string(), "flag".to_string(), "note".to_string()][..])
        );
        let records: Vec<_> = reader.by_ref().collect::<Result<_>>().expect("records");
        assert_eq!(
            records,
            vec![
                vec![
                    DecodeOutcome::Value(FieldValue::Integer(1)),
                    DecodeOutcome::Value(FieldValue::Boolean(true)),
                    DecodeOutcome::Value(FieldValue::Text("a".to_string())),
                ],
                vec![
                    DecodeOutcome::Null,
                    DecodeOutcome::Value(FieldValue::Boolean(false)),
                    DecodeOutcome::Value(FieldValue::Text("b".to_string())),
                    DecodeOutcome::Value(FieldValue::Text("extra".to_string())),
                ],
            ]
        );
    }

    #[test]
    fn field_error_names_line_and_column() {
        let data = "1,yes\n2,maybe\n";
        let mut reader = TypedReader::from_reader(
            data.as_bytes(),
            &document().line_terminator("\n").build(),
            ReadOptions::new().has_headers(false),
        )
        .expect("open");
        assert!(reader.read_record().expect("first").is_some());
        let err = reader.read_record().expect_err("invalid boolean");
        assert!(matches!(err, IngestError::Field { line: 2, column: 1, .. }));
    }

    #[test]
    fn skips_initial_space() {
        let data = "1, yes\n";
        let document = document()
            .line_terminator("\n")
            .skip_initial_space(true)
            .build();
        let mut reader = TypedReader::from_reader(
            data.as_bytes(),
            &document,
            ReadOptions::new().has_headers(false),
        )
        .expect("open");
        assert_eq!(
            reader.read_canonical().expect("read"),
            Some(vec!["1".to_string(), "true".to_string()])
        );
        assert_eq!(reader.read_canonical().expect("end"), None);
    }

    #[test]
    fn quote_after_skipped_space_is_literal() {
        let document = Document::builder()
            .line_terminator("\n")
            .skip_initial_space(true)
            .build();
        let mut reader = TypedReader::from_reader(
            "a, \"b,c\"\n".as_bytes(),
            &document,
            ReadOptions::new().has_headers(false),
        )
        .expect("open");
        assert_eq!(
            reader.read_canonical().expect("read"),
            Some(vec!["a".to_string(), "\"b".to_string(), "c\"".to_string()])
        );
    }
}
