//! Slash-delimited token grammar.
//!
//! Type descriptors (`currency/pre/$/decimal/,/.`) and compound metadata keys
//! (`col/3/type`) share one grammar: tokens are separated by `/`, a literal
//! slash is written `\/` and a literal backslash `\\`. Any other backslash is
//! kept as is, so hand-written values with stray backslashes still split.

const SEPARATOR: char = '/';
const ESCAPE: char = '\\';

/// Splits `text` on unescaped slashes.
///
/// Always yields at least one token; an empty input yields `[""]`.
#[must_use]
pub fn split(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            if ch != SEPARATOR && ch != ESCAPE {
                current.push(ESCAPE);
            }
            current.push(ch);
            escaped = false;
        } else if ch == ESCAPE {
            escaped = true;
        } else if ch == SEPARATOR {
            tokens.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if escaped {
        current.push(ESCAPE);
    }
    tokens.push(current);
    tokens
}

/// Escapes a single token so that [`split`] returns it unchanged.
#[must_use]
pub fn escape(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len());
    for ch in token.chars() {
        if ch == SEPARATOR || ch == ESCAPE {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Escapes every token and joins them with `/`.
#[must_use]
pub fn join<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|token| escape(token.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Like [`join`], but drops the empty tokens after the last non-empty one.
///
/// The first token is always kept, so a lone empty tag still renders.
#[must_use]
pub fn join_trimmed<S: AsRef<str>>(tokens: &[S]) -> String {
    let keep = tokens
        .iter()
        .rposition(|token| !token.as_ref().is_empty())
        .map_or(tokens.len().min(1), |last| last + 1);
    join(&tokens[..keep])
}
