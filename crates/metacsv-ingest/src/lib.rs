//! Reading and writing CSV files described by a typed metadata sidecar.
//!
//! This crate is the boundary between the codec framework and the `csv`
//! crate: it tokenizes the metadata file into a [`Document`](metacsv_model::Document),
//! configures the tokenizer from the document settings, and decodes or
//! encodes data records column by column.
//!
//! # Features
//!
//! - **Metadata files**: [`read_metadata`] / [`write_metadata`] for the `domain,key,value` sidecar
//! - **Dialect**: [`Dialect`] maps delimiter, quoting and line terminator onto `csv` builders
//! - **Encodings**: any WHATWG encoding through `encoding_rs`, with optional BOM
//! - **Typed records**: [`TypedReader`] and [`TypedWriter`] apply the column codecs
//!
//! # Example
//!
//! ```
//! use metacsv_codec::{DecodeOutcome, FieldValue, OnError};
//! use metacsv_ingest::{ReadOptions, TypedReader, read_metadata};
//! use metacsv_model::HeaderMode;
//!
//! let metadata = "domain,key,value\n\
//!                 csv,delimiter,;\n\
//!                 data,col/1/type,\"decimal/ /,\"\n";
//! let document = read_metadata(metadata.as_bytes(), HeaderMode::Present)?;
//!
//! let data = "item;price\nbook;1 250,5\npen;?\n";
//! let options = ReadOptions::new().on_error(OnError::PassThroughText);
//! let mut reader = TypedReader::from_reader(data.as_bytes(), &document, options)?;
//! assert_eq!(reader.read_canonical()?, Some(vec!["book".to_string(), "1250.5".to_string()]));
//! let record = reader.read_record()?.unwrap();
//! assert_eq!(record[1], DecodeOutcome::RawText("?".to_string()));
//! assert_eq!(record[0], DecodeOutcome::Value(FieldValue::Text("pen".to_string())));
//! # Ok::<(), metacsv_ingest::IngestError>(())
//! ```

mod dialect;
mod encoding;
mod error;
mod metadata;
mod reader;
mod writer;

// === Error Types ===
pub use error::{IngestError, Result};

// === Metadata Files ===
pub use metadata::{read_metadata, read_metadata_path, write_metadata, write_metadata_path};

// === Dialect and Encoding ===
pub use dialect::Dialect;
pub use encoding::bom;

// === Typed Records ===
pub use reader::{ReadOptions, TypedReader};
pub use writer::TypedWriter;
