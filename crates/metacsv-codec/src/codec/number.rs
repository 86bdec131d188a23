//! Integer, float and decimal fields.
//!
//! Numbers are read by removing the thousands separator (literal substring,
//! not a pattern) and turning the decimal separator into `.`. They are
//! written with grouping every three digits left of the decimal point.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;

use metacsv_model::{DecimalFormat, IntegerFormat};

use crate::error::{CodecError, Result};
use crate::value::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NumberKind {
    Integer,
    Float,
    Decimal,
}

impl NumberKind {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
        }
    }

    fn invalid(self, text: &str) -> CodecError {
        let text = text.to_string();
        match self {
            Self::Integer => CodecError::InvalidInteger { text },
            Self::Float => CodecError::InvalidFloat { text },
            Self::Decimal => CodecError::InvalidDecimal { text },
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NumberCodec {
    kind: NumberKind,
    thousands_separator: String,
    decimal_separator: String,
}

impl NumberCodec {
    pub(crate) fn integer(format: &IntegerFormat) -> Self {
        Self {
            kind: NumberKind::Integer,
            thousands_separator: format.thousands_separator.clone(),
            decimal_separator: ".".to_string(),
        }
    }

    pub(crate) fn float(format: &DecimalFormat) -> Self {
        Self::fractional(NumberKind::Float, format)
    }

    pub(crate) fn decimal(format: &DecimalFormat) -> Self {
        Self::fractional(NumberKind::Decimal, format)
    }

    fn fractional(kind: NumberKind, format: &DecimalFormat) -> Self {
        Self {
            kind,
            thousands_separator: format.thousands_separator.clone(),
            decimal_separator: format.effective_decimal_separator().to_string(),
        }
    }

    /// Reads a number; `percent` divides it by 100.
    pub(crate) fn decode(&self, text: &str, percent: bool) -> Result<FieldValue> {
        let normalized = self.normalize(text);
        if normalized.is_empty() {
            return Err(self.kind.invalid(text));
        }
        match self.kind {
            NumberKind::Integer => normalized
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| self.kind.invalid(text)),
            NumberKind::Float => {
                let value = if percent {
                    match shift_point(&normalized, -2) {
                        Some(shifted) => shifted.parse::<f64>(),
                        None => normalized.parse::<f64>().map(|v| v / 100.0),
                    }
                } else {
                    normalized.parse::<f64>()
                };
                value
                    .map(FieldValue::Float)
                    .map_err(|_| self.kind.invalid(text))
            }
            NumberKind::Decimal => {
                let value =
                    BigDecimal::from_str(&normalized).map_err(|_| self.kind.invalid(text))?;
                Ok(FieldValue::Decimal(if percent {
                    scale_by_hundred(&value, -1)
                } else {
                    value
                }))
            }
        }
    }

    /// Writes a number; `percent` multiplies it by 100.
    pub(crate) fn encode(&self, value: &FieldValue, percent: bool) -> Result<String> {
        let plain = match (self.kind, value) {
            (NumberKind::Integer, FieldValue::Integer(v)) => v.to_string(),
            (NumberKind::Float, FieldValue::Float(v)) => {
                if !v.is_finite() {
                    return Ok(v.to_string());
                }
                let plain = v.to_string();
                if percent {
                    shift_point(&plain, 2).unwrap_or_else(|| (v * 100.0).to_string())
                } else {
                    plain
                }
            }
            (NumberKind::Decimal, FieldValue::Decimal(v)) => {
                if percent {
                    plain_decimal(&scale_by_hundred(v, 1))
                } else {
                    plain_decimal(v)
                }
            }
            (kind, other) => {
                return Err(CodecError::ValueMismatch {
                    expected: kind.name(),
                    found: other.type_name(),
                });
            }
        };
        Ok(self.group(&plain))
    }

    /// Separator-free text with `.` as decimal point.
    fn normalize(&self, text: &str) -> String {
        let mut normalized = text.trim().to_string();
        if !self.thousands_separator.is_empty() {
            normalized = normalized.replace(&self.thousands_separator, "");
        }
        if self.decimal_separator != "." {
            normalized = normalized.replace(&self.decimal_separator, ".");
        }
        normalized
    }

    /// Applies the separators to a plain `-?digits[.digits]` string.
    fn group(&self, plain: &str) -> String {
        let (sign, unsigned) = match plain.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", plain),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (unsigned, None),
        };
        let mut out = String::with_capacity(plain.len() + plain.len() / 3);
        out.push_str(sign);
        out.push_str(&group_thousands(int_part, &self.thousands_separator));
        if let Some(frac_part) = frac_part {
            out.push_str(&self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

/// Inserts `separator` every three digits from the right.
pub(crate) fn group_thousands(digits: &str, separator: &str) -> String {
    if separator.is_empty() || digits.len() <= 3 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + separator.len() * (digits.len() / 3));
    let lead = digits.len() % 3;
    for (idx, ch) in digits.chars().enumerate() {
        if idx != 0 && (idx + 3 - lead) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Moves the decimal point of a plain decimal string by `places` (positive
/// is to the right). Returns `None` for anything but `[+-]digits[.digits]`.
///
/// The result has no redundant leading or trailing zeros.
pub(crate) fn shift_point(text: &str, places: i32) -> Option<String> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let digits = format!("{int_part}{frac_part}");
    let point = i64::try_from(int_part.len()).ok()? + i64::from(places);
    let len = i64::try_from(digits.len()).ok()?;
    let (int_digits, frac_digits) = if point <= 0 {
        let zeros = usize::try_from(-point).ok()?;
        (String::new(), format!("{}{digits}", "0".repeat(zeros)))
    } else if point >= len {
        let zeros = usize::try_from(point - len).ok()?;
        (format!("{digits}{}", "0".repeat(zeros)), String::new())
    } else {
        let split = usize::try_from(point).ok()?;
        (digits[..split].to_string(), digits[split..].to_string())
    };
    let int_digits = int_digits.trim_start_matches('0');
    let frac_digits = frac_digits.trim_end_matches('0');
    let mut out = String::new();
    if negative && !(int_digits.is_empty() && frac_digits.is_empty()) {
        out.push('-');
    }
    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    Some(out)
}

/// Multiplies (`direction = 1`) or divides (`-1`) by 100 without rounding.
fn scale_by_hundred(value: &BigDecimal, direction: i64) -> BigDecimal {
    let (digits, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(digits, scale - 2 * direction)
}

/// Renders a decimal without exponent, keeping its scale.
pub(crate) fn plain_decimal(value: &BigDecimal) -> String {
    let (digits, scale) = value.as_bigint_and_exponent();
    let negative = digits < BigInt::from(0);
    let magnitude = digits.magnitude().to_string();
    let body = if scale <= 0 {
        if magnitude == "0" {
            magnitude
        } else {
            let zeros = usize::try_from(-scale).unwrap_or_default();
            format!("{magnitude}{}", "0".repeat(zeros))
        }
    } else {
        let scale = usize::try_from(scale).unwrap_or_default();
        if magnitude.len() > scale {
            let split = magnitude.len() - scale;
            format!("{}.{}", &magnitude[..split], &magnitude[split..])
        } else {
            format!("0.{}{magnitude}", "0".repeat(scale - magnitude.len()))
        }
    };
    if negative { format!("-{body}") } else { body }
}

/// Canonical text of a decimal: plain, trailing zeros removed.
pub(crate) fn canonical_decimal(value: &BigDecimal) -> String {
    let plain = plain_decimal(value);
    shift_point(&plain, 0).unwrap_or(plain)
}
