//! Reading and writing the metadata sidecar file.
//!
//! The sidecar is itself a plain UTF-8 CSV file with the default dialect;
//! only the data file it describes uses the declared settings.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use encoding_rs::UTF_8;

use metacsv_model::{Document, DocumentParser, HeaderMode, Verbosity, render_document};

use crate::encoding::{decode_field, open_source};
use crate::error::{IngestError, Result};

/// Parses a metadata stream.
///
/// The first malformed row aborts the read; the error names the row.
pub fn read_metadata<R: Read>(reader: R, header: HeaderMode) -> Result<Document> {
    let (source, encoding) = open_source(reader, UTF_8)?;
    let mut rows = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);
    let mut parser = DocumentParser::new(header);
    let mut record = csv::ByteRecord::new();
    while rows.read_byte_record(&mut record)? {
        let line = record.position().map_or(0, csv::Position::line);
        let fields = record
            .iter()
            .enumerate()
            .map(|(column, bytes)| {
                decode_field(bytes, encoding).ok_or_else(|| IngestError::Decode {
                    line,
                    column,
                    encoding: encoding.name(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        parser.feed(fields.as_slice())?;
    }
    parser.finish().map_err(IngestError::from)
}

/// Reads a metadata file that starts with the `domain,key,value` header.
pub fn read_metadata_path(path: &Path) -> Result<Document> {
    let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
    let document = read_metadata(file, HeaderMode::Present)?;
    tracing::debug!(
        path = %path.display(),
        columns = document.column_count(),
        "Loaded metadata document"
    );
    Ok(document)
}

/// Writes a document, header row first, with CRLF line endings.
pub fn write_metadata<W: Write>(writer: W, document: &Document, verbosity: Verbosity) -> Result<()> {
    let mut rows = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_writer(writer);
    for row in render_document(document, verbosity) {
        rows.write_record(&row)?;
    }
    rows.flush()?;
    Ok(())
}

/// Writes a document to a new file.
pub fn write_metadata_path(path: &Path, document: &Document, verbosity: Verbosity) -> Result<()> {
    let file = File::create(path).map_err(|source| IngestError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    write_metadata(file, document, verbosity)
}
