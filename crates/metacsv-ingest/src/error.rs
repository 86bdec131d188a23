//! Error types for reading and writing typed CSV files.

use std::path::PathBuf;

use thiserror::Error;

use metacsv_codec::CodecError;
use metacsv_model::DocumentError;

/// Errors that can occur while reading or writing metadata and data files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a file.
    #[error("failed to create file {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read from or write to a stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === CSV Errors ===
    /// The CSV tokenizer or printer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A document setting the CSV dialect cannot express.
    #[error("unsupported {setting} '{value}': the CSV dialect needs a single ASCII character")]
    UnsupportedDialect {
        setting: &'static str,
        value: String,
    },

    // === Encoding Errors ===
    /// Bytes that are not valid in the declared encoding.
    #[error("line {line}, column {column}: invalid {encoding} text")]
    Decode {
        line: u64,
        column: usize,
        encoding: &'static str,
    },

    /// A whole stream that is not valid in the declared encoding.
    #[error("input is not valid {encoding} text")]
    Transcode { encoding: &'static str },

    /// Text with characters the declared encoding cannot represent.
    #[error("record {record}: text cannot be written as {encoding}")]
    Unencodable { record: u64, encoding: &'static str },

    // === Metadata and Field Errors ===
    /// The metadata document is malformed.
    #[error("invalid metadata: {0}")]
    Metadata(#[from] DocumentError),

    /// A field does not parse as its column type.
    #[error("line {line}, column {column}: {source}")]
    Field {
        line: u64,
        column: usize,
        #[source]
        source: CodecError,
    },

    /// A value cannot be written in its column.
    #[error("record {record}, column {column}: {source}")]
    Encode {
        record: u64,
        column: usize,
        #[source]
        source: CodecError,
    },
}

impl IngestError {
    pub(crate) fn file_read(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

/// Result type for ingest operations.
pub type Result<T> = std::result::Result<T, IngestError>;
