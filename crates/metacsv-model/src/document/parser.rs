//! Row-by-row metadata parsing.

use serde::{Deserialize, Serialize};

use super::value::{parse_bool, parse_char, parse_optional_char, unescape};
use super::{Document, DocumentBuilder, HEADER};
use crate::descriptor::parse_descriptor;
use crate::error::DocumentError;
use crate::escape;

/// Whether the row stream starts with a `domain,key,value` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeaderMode {
    #[default]
    Present,
    Absent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectHeader,
    Rows,
}

/// Incremental metadata parser.
///
/// Rows are fed one at a time; the first error is fatal and the parser must
/// be discarded. [`DocumentParser::finish`] freezes the document.
#[derive(Debug)]
pub struct DocumentParser {
    state: State,
    row: usize,
    builder: DocumentBuilder,
}

impl DocumentParser {
    #[must_use]
    pub fn new(header: HeaderMode) -> Self {
        let state = match header {
            HeaderMode::Present => State::ExpectHeader,
            HeaderMode::Absent => State::Rows,
        };
        Self {
            state,
            row: 0,
            builder: DocumentBuilder::new(),
        }
    }

    /// Consumes one row.
    pub fn feed<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), DocumentError> {
        self.row += 1;
        let row = self.row;
        match self.state {
            State::ExpectHeader => {
                let found: Vec<&str> = fields.iter().map(AsRef::as_ref).collect();
                if found != HEADER {
                    return Err(DocumentError::BadHeader {
                        found: found.join(","),
                    });
                }
                self.state = State::Rows;
                Ok(())
            }
            State::Rows => {
                let [domain, key, value] = fields else {
                    return Err(DocumentError::BadRow {
                        row,
                        fields: fields.len(),
                    });
                };
                let (domain, key, value) = (domain.as_ref(), key.as_ref(), value.as_ref());
                tracing::trace!(row, domain, key, "metadata row");
                match domain {
                    "meta" => {
                        self.builder.set_meta(key.to_string(), value.to_string());
                        Ok(())
                    }
                    "file" => self.file_setting(row, key, value),
                    "csv" => self.csv_setting(row, key, value),
                    "data" => self.data_setting(row, key, value),
                    other => Err(DocumentError::UnknownDomain {
                        row,
                        domain: other.to_string(),
                    }),
                }
            }
        }
    }

    /// Freezes the accumulated settings.
    ///
    /// Fails with [`DocumentError::BadHeader`] if a header was expected and
    /// no row arrived.
    pub fn finish(self) -> Result<Document, DocumentError> {
        if self.state == State::ExpectHeader {
            return Err(DocumentError::BadHeader {
                found: String::new(),
            });
        }
        Ok(self.builder.build())
    }

    fn file_setting(&mut self, row: usize, key: &str, value: &str) -> Result<(), DocumentError> {
        let file = &mut self.builder.document.file;
        match key {
            "encoding" => {
                file.encoding = encoding_rs::Encoding::for_label(value.as_bytes()).ok_or_else(
                    || DocumentError::UnknownEncoding {
                        row,
                        value: value.to_string(),
                    },
                )?;
            }
            "bom" => file.bom = parse_bool(row, key, value)?,
            "line_terminator" => file.line_terminator = unescape(value),
            _ => return Err(unknown_key(row, "file", key)),
        }
        Ok(())
    }

    fn csv_setting(&mut self, row: usize, key: &str, value: &str) -> Result<(), DocumentError> {
        let csv = &mut self.builder.document.csv;
        match key {
            "delimiter" => csv.delimiter = parse_char(row, key, value)?,
            "quote_char" => csv.quote_char = parse_char(row, key, value)?,
            "escape_char" => csv.escape_char = parse_optional_char(row, key, value)?,
            "double_quote" => csv.double_quote = parse_bool(row, key, value)?,
            "skip_initial_space" => csv.skip_initial_space = parse_bool(row, key, value)?,
            _ => return Err(unknown_key(row, "csv", key)),
        }
        Ok(())
    }

    fn data_setting(&mut self, row: usize, key: &str, value: &str) -> Result<(), DocumentError> {
        if key == "null_value" {
            self.builder.document.null_value = value.to_string();
            return Ok(());
        }
        let tokens = escape::split(key);
        let [col, index, attribute] = tokens.as_slice() else {
            return Err(unknown_key(row, "data", key));
        };
        if col != "col" || attribute != "type" {
            return Err(unknown_key(row, "data", key));
        }
        let index = parse_index(index).ok_or_else(|| DocumentError::InvalidColumnIndex {
            row,
            value: index.clone(),
        })?;
        let descriptor =
            parse_descriptor(value).map_err(|source| DocumentError::Descriptor { row, source })?;
        self.builder.set_column(index, descriptor);
        Ok(())
    }
}

/// Accepts plain ASCII digits only (no sign, no whitespace).
fn parse_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn unknown_key(row: usize, domain: &str, key: &str) -> DocumentError {
    DocumentError::UnknownKey {
        row,
        domain: domain.to_string(),
        key: key.to_string(),
    }
}

/// Parses a whole row stream into a document.
///
/// Any row-level error aborts the parse.
pub fn parse_document<I, R, S>(rows: I, header: HeaderMode) -> Result<Document, DocumentError>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DocumentParser::new(header);
    for row in rows {
        let fields: Vec<S> = row.into_iter().collect();
        parser.feed(&fields)?;
    }
    parser.finish()
}
