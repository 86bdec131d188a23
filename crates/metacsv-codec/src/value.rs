//! Typed field values.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};

use crate::codec::{canonical_date, canonical_datetime, canonical_decimal};

/// A decoded CSV field.
///
/// Currency columns decode to `Integer` or `Decimal`, percentage columns to
/// `Float` or `Decimal` holding the fraction (`56,5%` is `0.565`).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    /// Arbitrary precision; equality ignores trailing zeros.
    Decimal(BigDecimal),
    /// A calendar day, taken as midnight UTC.
    Date(NaiveDate),
    Datetime(DateTime<Utc>),
    Text(String),
    /// Text of an `object` column, never interpreted.
    Object(String),
}

impl FieldValue {
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::Date(_) => "date",
            Self::Datetime(_) => "datetime",
            Self::Text(_) => "text",
            Self::Object(_) => "object",
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Type-independent text of the value, for diffing and export.
    ///
    /// Null is the empty string, dates are ISO 8601 in UTC, decimals carry
    /// no exponent and no trailing zeros.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Boolean(value) => value.to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Float(value) => value.to_string(),
            Self::Decimal(value) => canonical_decimal(value),
            Self::Date(value) => canonical_date(value),
            Self::Datetime(value) => canonical_datetime(value),
            Self::Text(value) | Self::Object(value) => value.clone(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<BigDecimal> for FieldValue {
    fn from(value: BigDecimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Datetime(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
