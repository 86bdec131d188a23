//! Type descriptors and metadata documents for CSV files with a typed sidecar.
//!
//! A plain CSV file is paired with a metadata document that declares, per
//! column, a logical type (`integer/ `, `date/dd\/MM\/yyyy`,
//! `currency/post/€/decimal/ /,`, ...) together with the file encoding and
//! CSV dialect.
//!
//! # Example
//!
//! ```
//! use metacsv_model::{Descriptor, HeaderMode, parse_descriptor, parse_document};
//!
//! let descriptor = parse_descriptor("currency/pre/$/decimal/,/.").unwrap();
//! assert_eq!(descriptor.to_string(), "currency/pre/$/decimal/,/.");
//!
//! let rows = [
//!     ["domain", "key", "value"],
//!     ["data", "null_value", "NULL"],
//!     ["data", "col/1/type", "integer"],
//! ];
//! let document = parse_document(rows, HeaderMode::Present).unwrap();
//! assert_eq!(document.null_value(), "NULL");
//! assert_eq!(document.descriptor_or_text(0), Descriptor::Text);
//! ```

pub mod descriptor;
pub mod document;
pub mod error;
pub mod escape;
pub mod locale;
pub mod pattern;

pub use descriptor::{
    Affixed, BooleanFormat, CurrencyAmount, DateFormat, DecimalFormat, Descriptor, IntegerFormat,
    PercentageAmount, SymbolPosition, parse_descriptor, render_descriptor,
};
pub use document::{
    CsvSettings, Document, DocumentBuilder, DocumentParser, FileSettings, HEADER, HeaderMode,
    Verbosity, parse_document, render_document,
};
pub use error::{DescriptorError, DocumentError, Result};
pub use locale::Locale;
pub use pattern::{DatePattern, PatternFields};
