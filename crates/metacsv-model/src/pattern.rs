//! Date pattern compilation.
//!
//! Descriptors carry patterns in the familiar letter grammar (`dd/MM/yyyy`,
//! `yyyy-MM-dd'T'HH:mm:ssXXX`). A pattern is compiled once into a `chrono`
//! strftime string, so parsing and formatting never depend on a platform
//! locale database.
//!
//! | letters        | meaning                  | strftime |
//! |----------------|--------------------------|----------|
//! | `yy` / `yyyy`  | year (2 / 4 digits)      | `%y` / `%Y` |
//! | `M` / `MM`     | month number             | `%-m` / `%m` |
//! | `MMM` / `MMMM` | month name (short/long)  | `%b` / `%B` |
//! | `d` / `dd`     | day of month             | `%-d` / `%d` |
//! | `H` / `HH`     | hour 0-23                | `%-H` / `%H` |
//! | `h` / `hh`     | hour 1-12                | `%-I` / `%I` |
//! | `m` / `mm`     | minute                   | `%-M` / `%M` |
//! | `s` / `ss`     | second                   | `%-S` / `%S` |
//! | `S`..`SSSSSSSSS` | fraction (3, 6 or 9 digits) | `%3f` / `%6f` / `%9f` |
//! | `a`            | AM/PM marker             | `%p` |
//! | `E` / `EEEE`   | day name (short/long)    | `%a` / `%A` |
//! | `Z`, `X`, `XX` | zone offset `+hhmm`      | `%z` |
//! | `XXX`          | zone offset `+hh:mm`     | `%:z` |
//!
//! A pattern may leave fields out (`MM/yyyy`, `HH:mm`). Readers fill the
//! missing ones from 1970-01-01 00:00:00. `h` needs an `a` marker, `a` needs
//! `h`, and day names need a day of month.

use std::fmt;

use chrono::format::{Item, StrftimeItems};

use crate::error::DescriptorError;

/// Which calendar and clock fields a pattern carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PatternFields {
    pub year: bool,
    pub month: bool,
    pub day: bool,
    pub weekday: bool,
    /// `H` or `h`.
    pub hour: bool,
    /// `h` only.
    pub hour12: bool,
    pub am_pm: bool,
    pub minute: bool,
    pub second: bool,
    pub fraction: bool,
    pub zone: bool,
}

impl PatternFields {
    /// Whether any time-of-day field is present.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.hour || self.am_pm || self.minute || self.second || self.fraction
    }

    fn mark(&mut self, letter: char) {
        match letter {
            'y' => self.year = true,
            'M' => self.month = true,
            'd' => self.day = true,
            'E' => self.weekday = true,
            'H' => self.hour = true,
            'h' => {
                self.hour = true;
                self.hour12 = true;
            }
            'a' => self.am_pm = true,
            'm' => self.minute = true,
            's' => self.second = true,
            'S' => self.fraction = true,
            'Z' | 'X' => self.zone = true,
            _ => {}
        }
    }

    fn check(&self, pattern: &str) -> Result<(), DescriptorError> {
        if self.hour12 && !self.am_pm {
            return Err(DescriptorError::pattern(pattern, "'h' requires an 'a' marker"));
        }
        if self.am_pm && !self.hour12 {
            return Err(DescriptorError::pattern(pattern, "'a' requires an 'h' hour"));
        }
        if self.weekday && !self.day {
            return Err(DescriptorError::pattern(pattern, "day name requires a day of month"));
        }
        Ok(())
    }
}

/// A date pattern together with its compiled strftime form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatePattern {
    source: String,
    format: String,
    fields: PatternFields,
}

impl DatePattern {
    /// Compiles a pattern, rejecting unknown letters, unterminated quotes
    /// and ambiguous field combinations.
    pub fn compile(pattern: &str) -> Result<Self, DescriptorError> {
        if pattern.is_empty() {
            return Err(DescriptorError::pattern(pattern, "pattern is empty"));
        }
        let chars: Vec<char> = pattern.chars().collect();
        let mut format = String::with_capacity(pattern.len() * 2);
        let mut fields = PatternFields::default();
        let mut idx = 0;
        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '\'' {
                idx = compile_quoted(pattern, &chars, idx, &mut format)?;
                continue;
            }
            if !ch.is_ascii_alphabetic() {
                push_literal(&mut format, ch);
                idx += 1;
                continue;
            }
            let run = chars[idx..].iter().take_while(|&&c| c == ch).count();
            let directive = match (ch, run) {
                ('y', 2) => "%y",
                ('y', _) => "%Y",
                ('M', 1) => "%-m",
                ('M', 2) => "%m",
                ('M', 3) => "%b",
                ('M', _) => "%B",
                ('d', 1) => "%-d",
                ('d', _) => "%d",
                ('E', 1..=3) => "%a",
                ('E', _) => "%A",
                ('H', 1) => "%-H",
                ('H', _) => "%H",
                ('h', 1) => "%-I",
                ('h', _) => "%I",
                ('m', 1) => "%-M",
                ('m', _) => "%M",
                ('s', 1) => "%-S",
                ('s', _) => "%S",
                ('S', 1..=3) => "%3f",
                ('S', 4..=6) => "%6f",
                ('S', 7..=9) => "%9f",
                ('a', _) => "%p",
                ('Z', _) | ('X', 1..=2) => "%z",
                ('X', 3) => "%:z",
                _ => {
                    return Err(DescriptorError::pattern(
                        pattern,
                        format!("unsupported pattern letter '{ch}' (x{run})"),
                    ));
                }
            };
            fields.mark(ch);
            format.push_str(directive);
            idx += run;
        }
        if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
            return Err(DescriptorError::pattern(pattern, "cannot compile pattern"));
        }
        fields.check(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            format,
            fields,
        })
    }

    /// The pattern as written in the descriptor.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled strftime string.
    #[must_use]
    pub fn format(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub fn fields(&self) -> PatternFields {
        self.fields
    }

    /// Whether the pattern carries a zone offset.
    #[must_use]
    pub fn has_zone(&self) -> bool {
        self.fields.zone
    }

    /// Whether the pattern carries any time-of-day field.
    #[must_use]
    pub fn has_time(&self) -> bool {
        self.fields.has_time()
    }
}

impl fmt::Display for DatePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Copies a quoted literal starting at `start` (the opening quote); returns
/// the index after the closing quote. `''` is a literal quote both inside
/// and outside a quoted section.
fn compile_quoted(
    pattern: &str,
    chars: &[char],
    start: usize,
    format: &mut String,
) -> Result<usize, DescriptorError> {
    if chars.get(start + 1) == Some(&'\'') {
        format.push('\'');
        return Ok(start + 2);
    }
    let mut idx = start + 1;
    while idx < chars.len() {
        if chars[idx] == '\'' {
            if chars.get(idx + 1) == Some(&'\'') {
                format.push('\'');
                idx += 2;
                continue;
            }
            return Ok(idx + 1);
        }
        push_literal(format, chars[idx]);
        idx += 1;
    }
    Err(DescriptorError::pattern(pattern, "unterminated quote"))
}

fn push_literal(format: &mut String, ch: char) {
    if ch == '%' {
        format.push_str("%%");
    } else {
        format.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_common_patterns() {
        let pattern = DatePattern::compile("dd/MM/yyyy").expect("compile");
        assert_eq!(pattern.format(), "%d/%m/%Y");
        assert!(!pattern.has_time());
        assert!(!pattern.has_zone());

        let pattern = DatePattern::compile("yyyy-MM-dd'T'HH:mm:ss.SSSXXX").expect("compile");
        assert_eq!(pattern.format(), "%Y-%m-%dT%H:%M:%S.%3f%:z");
        assert!(pattern.has_time());
        assert!(pattern.has_zone());
    }

    #[test]
    fn compiles_names_and_short_fields() {
        let pattern = DatePattern::compile("EEE d MMM yy h:mm a").expect("compile");
        assert_eq!(pattern.format(), "%a %-d %b %y %-I:%M %p");
        let pattern = DatePattern::compile("EEEE, MMMM d").expect("compile");
        assert_eq!(pattern.format(), "%A, %B %-d");
    }

    #[test]
    fn handles_quotes_and_percent() {
        let pattern = DatePattern::compile("yyyy 'at' HH'h' '' 'o''clock' 100%").expect("compile");
        assert_eq!(pattern.format(), "%Y at %Hh ' o'clock 100%%");
    }

    #[test]
    fn rejects_bad_patterns() {
        assert!(DatePattern::compile("").is_err());
        assert!(DatePattern::compile("yyyy-QQ").is_err());
        assert!(DatePattern::compile("HH:mm z").is_err());
        assert!(DatePattern::compile("yyyy 'open").is_err());
    }

    #[test]
    fn partial_patterns_record_their_fields() {
        let fields = DatePattern::compile("MM/yyyy").expect("compile").fields();
        assert!(fields.year && fields.month);
        assert!(!fields.day && !fields.has_time());

        let fields = DatePattern::compile("HH:mm").expect("compile").fields();
        assert!(fields.hour && fields.minute && !fields.second);
        assert!(!fields.year);
    }

    #[test]
    fn rejects_ambiguous_fields() {
        let reason = |pattern: &str| match DatePattern::compile(pattern) {
            Err(DescriptorError::Pattern { reason, .. }) => reason,
            other => panic!("expected pattern error for {pattern}, got {other:?}"),
        };
        assert_eq!(reason("yyyy-MM-dd hh:mm"), "'h' requires an 'a' marker");
        assert_eq!(reason("HH:mm a"), "'a' requires an 'h' hour");
        assert_eq!(reason("EEEE MMMM yyyy"), "day name requires a day of month");
        assert!(DatePattern::compile("yyyy-MM-dd hh:mm a").is_ok());
    }

    #[test]
    fn displays_source() {
        let pattern = DatePattern::compile("yyyy-MM-dd").expect("compile");
        assert_eq!(pattern.to_string(), "yyyy-MM-dd");
        assert_eq!(pattern.source(), "yyyy-MM-dd");
    }
}
