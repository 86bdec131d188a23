//! Metadata rendering.

use serde::{Deserialize, Serialize};

use super::value::{escape, render_bool};
use super::{CsvSettings, Document, FileSettings};
use crate::descriptor::render_descriptor;

/// Header row of a metadata document.
pub const HEADER: [&str; 3] = ["domain", "key", "value"];

/// How much of a document to write out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Omit every setting equal to its default, and text columns.
    #[default]
    Minimal,
    /// Write every setting and every declared column.
    Verbose,
}

/// Renders a document to rows, header first.
///
/// Order is stable: `meta` entries, `file` settings, `csv` settings, the
/// null marker, then columns by ascending index.
#[must_use]
pub fn render_document(document: &Document, verbosity: Verbosity) -> Vec<[String; 3]> {
    let verbose = verbosity == Verbosity::Verbose;
    let file_defaults = FileSettings::default();
    let csv_defaults = CsvSettings::default();
    let file = document.file();
    let csv = document.csv();

    let mut rows = vec![HEADER.map(String::from)];
    let mut push = |domain: &str, key: &str, value: String| {
        rows.push([domain.to_string(), key.to_string(), value]);
    };

    for (key, value) in document.meta() {
        push("meta", key, value.clone());
    }

    if verbose || file.encoding != file_defaults.encoding {
        push("file", "encoding", file.encoding.name().to_ascii_lowercase());
    }
    if verbose || file.bom != file_defaults.bom {
        push("file", "bom", render_bool(file.bom));
    }
    if verbose || file.line_terminator != file_defaults.line_terminator {
        push("file", "line_terminator", escape(&file.line_terminator));
    }

    if verbose || csv.delimiter != csv_defaults.delimiter {
        push("csv", "delimiter", escape(&csv.delimiter.to_string()));
    }
    if verbose || csv.double_quote != csv_defaults.double_quote {
        push("csv", "double_quote", render_bool(csv.double_quote));
    }
    if verbose || csv.escape_char != csv_defaults.escape_char {
        let value = csv
            .escape_char
            .map(|ch| escape(&ch.to_string()))
            .unwrap_or_default();
        push("csv", "escape_char", value);
    }
    if verbose || csv.quote_char != csv_defaults.quote_char {
        push("csv", "quote_char", escape(&csv.quote_char.to_string()));
    }
    if verbose || csv.skip_initial_space != csv_defaults.skip_initial_space {
        push("csv", "skip_initial_space", render_bool(csv.skip_initial_space));
    }

    if verbose || !document.null_value().is_empty() {
        push("data", "null_value", document.null_value().to_string());
    }
    for (index, descriptor) in document.columns() {
        if verbose || !descriptor.is_text() {
            push("data", &format!("col/{index}/type"), render_descriptor(descriptor));
        }
    }
    rows
}
