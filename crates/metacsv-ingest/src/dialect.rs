//! CSV dialect taken from a metadata document.

use csv::{ReaderBuilder, Terminator, WriterBuilder};

use metacsv_model::Document;

use crate::error::{IngestError, Result};

/// The tokenizer settings of a document, in the form the `csv` crate takes.
#[derive(Debug, Clone, Copy)]
pub struct Dialect {
    pub delimiter: u8,
    pub quote: u8,
    pub escape: Option<u8>,
    pub double_quote: bool,
    pub terminator: Terminator,
    /// Leading spaces of each field are dropped on read.
    ///
    /// The `csv` crate has no such option, so spaces are trimmed after the
    /// record is split. A quote that follows the spaces is therefore not an
    /// opening quote: `a, "b,c"` reads as three fields, `a`, `"b` and `c"`.
    /// Quote such fields without the leading space.
    pub skip_initial_space: bool,
}

// `csv::Terminator` does not implement `PartialEq`, so equality is spelled out.
impl PartialEq for Dialect {
    fn eq(&self, other: &Self) -> bool {
        let same_terminator = match (self.terminator, other.terminator) {
            (Terminator::CRLF, Terminator::CRLF) => true,
            (Terminator::Any(a), Terminator::Any(b)) => a == b,
            _ => false,
        };
        self.delimiter == other.delimiter
            && self.quote == other.quote
            && self.escape == other.escape
            && self.double_quote == other.double_quote
            && same_terminator
            && self.skip_initial_space == other.skip_initial_space
    }
}

impl Eq for Dialect {}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            escape: None,
            double_quote: true,
            terminator: Terminator::CRLF,
            skip_initial_space: false,
        }
    }
}

impl Dialect {
    /// Checks that every setting fits the byte-oriented tokenizer.
    pub fn from_document(document: &Document) -> Result<Self> {
        let csv = document.csv();
        Ok(Self {
            delimiter: ascii_byte("delimiter", csv.delimiter)?,
            quote: ascii_byte("quote_char", csv.quote_char)?,
            escape: csv
                .escape_char
                .map(|ch| ascii_byte("escape_char", ch))
                .transpose()?,
            double_quote: csv.double_quote,
            terminator: terminator(&document.file().line_terminator)?,
            skip_initial_space: csv.skip_initial_space,
        })
    }

    /// A reader builder for this dialect. Records may vary in width.
    #[must_use]
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .escape(self.escape)
            .double_quote(self.double_quote)
            .terminator(self.terminator);
        builder
    }

    /// A writer builder for this dialect.
    #[must_use]
    pub fn writer_builder(&self) -> WriterBuilder {
        let mut builder = WriterBuilder::new();
        builder
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .quote(self.quote)
            .double_quote(self.double_quote)
            .terminator(self.terminator);
        if let Some(escape) = self.escape {
            builder.escape(escape);
        }
        builder
    }
}

fn ascii_byte(setting: &'static str, ch: char) -> Result<u8> {
    if ch.is_ascii() {
        Ok(ch as u8)
    } else {
        Err(IngestError::UnsupportedDialect {
            setting,
            value: ch.to_string(),
        })
    }
}

/// `\r\n` is the CRLF terminator; any other terminator is a single byte.
fn terminator(text: &str) -> Result<Terminator> {
    match text.as_bytes() {
        b"\r\n" => Ok(Terminator::CRLF),
        [byte] if byte.is_ascii() => Ok(Terminator::Any(*byte)),
        _ => Err(IngestError::UnsupportedDialect {
            setting: "line_terminator",
            value: text.escape_default().to_string(),
        }),
    }
}
