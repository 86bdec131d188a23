//! Byte-level text handling: BOMs, transcoding, per-field decoding.
//!
//! ASCII-compatible encodings are tokenized on the raw bytes and decoded one
//! field at a time, so the stream is never buffered whole. UTF-16 inputs are
//! transcoded to UTF-8 up front, because the tokenizer works on single bytes.

use std::borrow::Cow;
use std::io::{self, BufRead, BufReader, Cursor, Read};

use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};

use crate::error::{IngestError, Result};

/// Byte order mark of an encoding; empty for encodings without one.
#[must_use]
pub fn bom(encoding: &'static Encoding) -> &'static [u8] {
    if encoding == UTF_8 {
        b"\xEF\xBB\xBF"
    } else if encoding == UTF_16LE {
        b"\xFF\xFE"
    } else if encoding == UTF_16BE {
        b"\xFE\xFF"
    } else {
        b""
    }
}

/// A byte stream ready for the tokenizer.
#[derive(Debug)]
pub(crate) enum Source<R> {
    Direct(BufReader<R>),
    Transcoded(Cursor<Vec<u8>>),
}

impl<R: Read> Read for Source<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Direct(reader) => reader.read(buf),
            Self::Transcoded(reader) => reader.read(buf),
        }
    }
}

/// Opens a stream in `encoding`, dropping a leading BOM.
///
/// Returns the stream and the encoding its fields are in.
pub(crate) fn open_source<R: Read>(
    reader: R,
    encoding: &'static Encoding,
) -> Result<(Source<R>, &'static Encoding)> {
    let mut reader = BufReader::new(reader);
    if encoding.is_ascii_compatible() {
        let mark = bom(encoding);
        if !mark.is_empty() && reader.fill_buf()?.starts_with(mark) {
            reader.consume(mark.len());
        }
        return Ok((Source::Direct(reader), encoding));
    }
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let (text, had_errors) = encoding.decode_with_bom_removal(&bytes);
    if had_errors {
        return Err(IngestError::Transcode {
            encoding: encoding.name(),
        });
    }
    tracing::debug!(
        encoding = encoding.name(),
        bytes = bytes.len(),
        "Transcoded input to UTF-8"
    );
    Ok((
        Source::Transcoded(Cursor::new(text.into_owned().into_bytes())),
        UTF_8,
    ))
}

/// Decodes the bytes of one field; `None` for malformed input.
pub(crate) fn decode_field<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Option<Cow<'a, str>> {
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Encodes text; `None` when a character has no representation.
pub(crate) fn encode_text<'a>(text: &'a str, encoding: &'static Encoding) -> Option<Cow<'a, [u8]>> {
    if encoding == UTF_16LE {
        return Some(Cow::Owned(
            text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
        ));
    }
    if encoding == UTF_16BE {
        return Some(Cow::Owned(
            text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
        ));
    }
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors { None } else { Some(bytes) }
}
