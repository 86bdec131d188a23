//! Metadata documents.
//!
//! A metadata document is the sidecar of a CSV file: a list of
//! `domain,key,value` rows declaring the file encoding, the CSV dialect,
//! the null marker and one type descriptor per column.
//!
//! ```text
//! domain,key,value
//! file,encoding,utf-8
//! csv,delimiter,;
//! data,null_value,NULL
//! data,col/1/type,currency/pre/$/decimal/,/.
//! ```
//!
//! Documents are built by folding rows into a [`DocumentBuilder`] (see
//! [`parse_document`]) and are immutable once built.

mod parser;
mod render;
mod value;

use std::collections::BTreeMap;

use encoding_rs::{Encoding, UTF_8};

use crate::descriptor::Descriptor;

pub use parser::{DocumentParser, HeaderMode, parse_document};
pub use render::{HEADER, Verbosity, render_document};

pub const DEFAULT_LINE_TERMINATOR: &str = "\r\n";
pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_QUOTE_CHAR: char = '"';

/// Settings of the `file` domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettings {
    pub encoding: &'static Encoding,
    pub bom: bool,
    pub line_terminator: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            encoding: UTF_8,
            bom: false,
            line_terminator: DEFAULT_LINE_TERMINATOR.to_string(),
        }
    }
}

/// Settings of the `csv` domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvSettings {
    pub delimiter: char,
    pub quote_char: char,
    pub escape_char: Option<char>,
    pub double_quote: bool,
    pub skip_initial_space: bool,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            quote_char: DEFAULT_QUOTE_CHAR,
            escape_char: None,
            double_quote: true,
            skip_initial_space: false,
        }
    }
}

/// A parsed metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    meta: BTreeMap<String, String>,
    file: FileSettings,
    csv: CsvSettings,
    null_value: String,
    columns: BTreeMap<usize, Descriptor>,
}

impl Document {
    #[must_use]
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Free-form `meta` entries such as the format version.
    #[must_use]
    pub fn meta(&self) -> &BTreeMap<String, String> {
        &self.meta
    }

    #[must_use]
    pub fn file(&self) -> &FileSettings {
        &self.file
    }

    #[must_use]
    pub fn csv(&self) -> &CsvSettings {
        &self.csv
    }

    /// Text that stands for a missing value in every column.
    #[must_use]
    pub fn null_value(&self) -> &str {
        &self.null_value
    }

    /// Declared column types in ascending index order.
    pub fn columns(&self) -> impl Iterator<Item = (usize, &Descriptor)> {
        self.columns.iter().map(|(index, descriptor)| (*index, descriptor))
    }

    /// The declared type of a column, if any.
    #[must_use]
    pub fn column_type(&self, index: usize) -> Option<&Descriptor> {
        self.columns.get(&index)
    }

    /// The type of a column, falling back to text for undeclared columns.
    #[must_use]
    pub fn descriptor_or_text(&self, index: usize) -> Descriptor {
        self.columns.get(&index).cloned().unwrap_or_default()
    }

    /// One past the highest declared column index.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
            .last_key_value()
            .map_or(0, |(index, _)| index + 1)
    }
}

/// Mutable accumulator for a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_meta(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.document.file.encoding = encoding;
        self
    }

    #[must_use]
    pub fn bom(mut self, bom: bool) -> Self {
        self.document.file.bom = bom;
        self
    }

    #[must_use]
    pub fn line_terminator(mut self, terminator: impl Into<String>) -> Self {
        self.document.file.line_terminator = terminator.into();
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.document.csv.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.document.csv.quote_char = quote_char;
        self
    }

    #[must_use]
    pub fn escape_char(mut self, escape_char: Option<char>) -> Self {
        self.document.csv.escape_char = escape_char;
        self
    }

    #[must_use]
    pub fn double_quote(mut self, double_quote: bool) -> Self {
        self.document.csv.double_quote = double_quote;
        self
    }

    #[must_use]
    pub fn skip_initial_space(mut self, skip: bool) -> Self {
        self.document.csv.skip_initial_space = skip;
        self
    }

    #[must_use]
    pub fn null_value(mut self, null_value: impl Into<String>) -> Self {
        self.document.null_value = null_value.into();
        self
    }

    #[must_use]
    pub fn column(mut self, index: usize, descriptor: Descriptor) -> Self {
        self.set_column(index, descriptor);
        self
    }

    fn set_meta(&mut self, key: String, value: String) {
        self.document.meta.insert(key, value);
    }

    fn set_column(&mut self, index: usize, descriptor: Descriptor) {
        self.document.columns.insert(index, descriptor);
    }

    /// Freezes the accumulated settings.
    #[must_use]
    pub fn build(self) -> Document {
        let document = self.document;
        tracing::debug!(
            columns = document.columns.len(),
            encoding = document.file.encoding.name(),
            delimiter = %document.csv.delimiter.escape_default(),
            "built metadata document"
        );
        document
    }
}
