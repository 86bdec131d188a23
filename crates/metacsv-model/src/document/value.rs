//! Setting value literals.

use crate::error::DocumentError;

/// Parses a strict `true`/`false` setting.
pub(super) fn parse_bool(row: usize, key: &str, value: &str) -> Result<bool, DocumentError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(DocumentError::InvalidBoolean {
            row,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Parses a setting that must be exactly one character after unescaping.
pub(super) fn parse_char(row: usize, key: &str, value: &str) -> Result<char, DocumentError> {
    let unescaped = unescape(value);
    let mut chars = unescaped.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(DocumentError::InvalidChar {
            row,
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// Like [`parse_char`], but an empty value means "no character".
pub(super) fn parse_optional_char(
    row: usize,
    key: &str,
    value: &str,
) -> Result<Option<char>, DocumentError> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse_char(row, key, value).map(Some)
    }
}

pub(super) fn render_bool(value: bool) -> String {
    String::from(if value { "true" } else { "false" })
}

/// Decodes `\r`, `\n`, `\t` and `\\`; other backslashes are kept.
pub(super) fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('r') => unescaped.push('\r'),
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('\\') => unescaped.push('\\'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            }
            None => unescaped.push('\\'),
        }
    }
    unescaped
}

pub(super) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\r' => escaped.push_str("\\r"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    escaped
}
