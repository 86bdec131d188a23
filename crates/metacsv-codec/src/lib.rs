//! Field codecs for typed CSV columns.
//!
//! A [`FieldCodec`] is built from a column [`Descriptor`](metacsv_model::Descriptor)
//! and the document null marker. It reads field text into a [`FieldValue`],
//! writes values back, and re-expresses text in a canonical form. Decoding
//! can be wrapped in an [`OnError`] policy, and a [`RowCodec`] holds the
//! codecs of every column of a document.
//!
//! # Example
//!
//! ```
//! use metacsv_codec::{DecodeOutcome, FieldValue, OnError, build_codec, wrap_with_policy};
//! use metacsv_model::parse_descriptor;
//!
//! let descriptor = parse_descriptor("percentage/post/%/float/./,").unwrap();
//! let codec = build_codec(&descriptor, "NULL");
//! assert_eq!(codec.decode("56,5%").unwrap(), FieldValue::Float(0.565));
//! assert_eq!(codec.encode(&FieldValue::Float(0.565)).unwrap(), "56,5%");
//! assert_eq!(codec.decode("NULL").unwrap(), FieldValue::Null);
//!
//! let codec = wrap_with_policy(codec, OnError::SubstituteNull);
//! assert_eq!(codec.decode("n/a").unwrap(), DecodeOutcome::Null);
//! ```

pub mod codec;
pub mod error;
pub mod policy;
pub mod row;
pub mod value;

pub use codec::{FieldCodec, build_codec};
pub use error::{CodecError, ColumnError, Result};
pub use policy::{DecodeOutcome, OnError, PolicyCodec, ReadError, wrap_with_policy};
pub use row::RowCodec;
pub use value::FieldValue;
