//! Typed record writing.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use metacsv_codec::{FieldValue, OnError, RowCodec};
use metacsv_model::Document;

use crate::dialect::Dialect;
use crate::encoding::{bom, encode_text};
use crate::error::{IngestError, Result};

/// Writes records of values with the column codecs of a metadata document,
/// in its encoding and dialect.
///
/// Each record is printed to a buffer and transcoded before it reaches the
/// underlying writer.
#[derive(Debug)]
pub struct TypedWriter<W: Write> {
    inner: W,
    printer: csv::WriterBuilder,
    encoding: &'static Encoding,
    row: RowCodec,
    written: u64,
}

impl TypedWriter<File> {
    /// Creates (or truncates) a data file described by `document`.
    pub fn create(path: &Path, document: &Document) -> Result<Self> {
        let file = File::create(path).map_err(|source| IngestError::FileCreate {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_writer(file, document)
    }
}

impl<W: Write> TypedWriter<W> {
    /// Starts a data stream, writing the BOM first when the document asks
    /// for one.
    pub fn from_writer(mut writer: W, document: &Document) -> Result<Self> {
        let dialect = Dialect::from_document(document)?;
        let encoding = document.file().encoding;
        if document.file().bom {
            writer.write_all(bom(encoding))?;
        }
        tracing::debug!(
            encoding = encoding.name(),
            bom = document.file().bom,
            "Opened typed writer"
        );
        Ok(Self {
            inner: writer,
            printer: dialect.writer_builder(),
            encoding,
            row: RowCodec::new(document, OnError::Fail),
            written: 0,
        })
    }

    /// Writes a record of column names.
    pub fn write_headers<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        self.write_text(&names)
    }

    /// Encodes and writes a record of values.
    pub fn write_values(&mut self, values: &[FieldValue]) -> Result<()> {
        let record = self.written + 1;
        let fields = self
            .row
            .encode_record(values)
            .map_err(|e| IngestError::Encode {
                record,
                column: e.column,
                source: e.source,
            })?;
        let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
        self.write_text(&fields)
    }

    fn write_text(&mut self, fields: &[&str]) -> Result<()> {
        self.written += 1;
        let mut printer = self.printer.from_writer(Vec::new());
        printer.write_record(fields)?;
        let printed = printer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        if self.encoding == UTF_8 {
            self.inner.write_all(&printed)?;
            return Ok(());
        }
        let unencodable = || IngestError::Unencodable {
            record: self.written,
            encoding: self.encoding.name(),
        };
        let text = std::str::from_utf8(&printed).map_err(|_| unencodable())?;
        let bytes = encode_text(text, self.encoding).ok_or_else(unencodable)?;
        self.inner.write_all(&bytes)?;
        Ok(())
    }

    /// Number of records written, headers included.
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }
}
