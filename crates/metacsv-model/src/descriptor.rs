//! Column type descriptors.
//!
//! A descriptor is the structured form of a column type such as
//! `currency/pre/$/decimal/,/.`. The text grammar is a tag followed by
//! slash-separated parameters (see [`crate::escape`]); currency and
//! percentage embed a nested numeric descriptor after their own parameters.
//!
//! | tag          | parameters                                       |
//! |--------------|--------------------------------------------------|
//! | `text`       | none                                             |
//! | `object`     | any number, opaque                               |
//! | `boolean`    | true word, \[false word\]                        |
//! | `integer`    | \[thousands separator\]                          |
//! | `float`      | \[thousands separator\], \[decimal separator\]   |
//! | `decimal`    | \[thousands separator\], \[decimal separator\]   |
//! | `date`       | pattern, \[locale\]                              |
//! | `datetime`   | pattern, \[locale\]                              |
//! | `currency`   | `pre`/`post`, symbol, `integer`/`decimal`, ...   |
//! | `percentage` | `pre`/`post`, symbol, `float`/`decimal`, ...     |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::error::{DescriptorError, Result};
use crate::escape;
use crate::locale::Locale;
use crate::pattern::DatePattern;

pub const TEXT: &str = "text";
pub const OBJECT: &str = "object";
pub const BOOLEAN: &str = "boolean";
pub const INTEGER: &str = "integer";
pub const FLOAT: &str = "float";
pub const DECIMAL: &str = "decimal";
pub const DATE: &str = "date";
pub const DATETIME: &str = "datetime";
pub const CURRENCY: &str = "currency";
pub const PERCENTAGE: &str = "percentage";

/// The declared logical type of a column and its formatting parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Descriptor {
    Boolean(BooleanFormat),
    Integer(IntegerFormat),
    Float(DecimalFormat),
    Decimal(DecimalFormat),
    Date(DateFormat),
    Datetime(DateFormat),
    Currency(Affixed<CurrencyAmount>),
    Percentage(Affixed<PercentageAmount>),
    /// Default type of any column without a declaration.
    #[default]
    Text,
    /// Opaque parameters, passed through untouched.
    Object(Vec<String>),
}

/// Words used for a boolean column. An empty false word means any text
/// that is not the true word (nor the null marker) is an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BooleanFormat {
    pub true_word: String,
    pub false_word: String,
}

/// Integer grouping. An empty separator disables grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IntegerFormat {
    pub thousands_separator: String,
}

/// Float and decimal grouping and decimal mark.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DecimalFormat {
    pub thousands_separator: String,
    /// Empty means `.`.
    pub decimal_separator: String,
}

impl DecimalFormat {
    #[must_use]
    pub fn new(thousands_separator: impl Into<String>, decimal_separator: impl Into<String>) -> Self {
        Self {
            thousands_separator: thousands_separator.into(),
            decimal_separator: decimal_separator.into(),
        }
    }

    /// The decimal mark actually used to read and write numbers.
    #[must_use]
    pub fn effective_decimal_separator(&self) -> &str {
        if self.decimal_separator.is_empty() {
            "."
        } else {
            &self.decimal_separator
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateFormat {
    pub pattern: DatePattern,
    pub locale: Option<Locale>,
}

/// Where the symbol of a currency or percentage sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Pre,
    Post,
}

impl SymbolPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pre => "pre",
            Self::Post => "post",
        }
    }
}

/// A number decorated with a fixed symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Affixed<N> {
    pub position: SymbolPosition,
    pub symbol: String,
    pub number: N,
}

/// Numeric types a currency can wrap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CurrencyAmount {
    Integer(IntegerFormat),
    Decimal(DecimalFormat),
}

/// Numeric types a percentage can wrap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PercentageAmount {
    Float(DecimalFormat),
    Decimal(DecimalFormat),
}

impl CurrencyAmount {
    /// The equivalent standalone descriptor.
    #[must_use]
    pub fn to_descriptor(&self) -> Descriptor {
        match self {
            Self::Integer(format) => Descriptor::Integer(format.clone()),
            Self::Decimal(format) => Descriptor::Decimal(format.clone()),
        }
    }
}

impl PercentageAmount {
    /// The equivalent standalone descriptor.
    #[must_use]
    pub fn to_descriptor(&self) -> Descriptor {
        match self {
            Self::Float(format) => Descriptor::Float(format.clone()),
            Self::Decimal(format) => Descriptor::Decimal(format.clone()),
        }
    }
}

impl Descriptor {
    /// The type tag, first token of the rendered form.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Boolean(_) => BOOLEAN,
            Self::Integer(_) => INTEGER,
            Self::Float(_) => FLOAT,
            Self::Decimal(_) => DECIMAL,
            Self::Date(_) => DATE,
            Self::Datetime(_) => DATETIME,
            Self::Currency(_) => CURRENCY,
            Self::Percentage(_) => PERCENTAGE,
            Self::Text => TEXT,
            Self::Object(_) => OBJECT,
        }
    }

    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text)
    }

    /// Shorthand for a boolean descriptor.
    #[must_use]
    pub fn boolean(true_word: impl Into<String>, false_word: impl Into<String>) -> Self {
        Self::Boolean(BooleanFormat {
            true_word: true_word.into(),
            false_word: false_word.into(),
        })
    }

    /// Shorthand for an integer descriptor.
    #[must_use]
    pub fn integer(thousands_separator: impl Into<String>) -> Self {
        Self::Integer(IntegerFormat {
            thousands_separator: thousands_separator.into(),
        })
    }

    /// Renders the token sequence, tag first.
    #[must_use]
    pub fn to_tokens(&self) -> Vec<String> {
        let mut tokens = vec![self.tag().to_string()];
        self.push_parameters(&mut tokens);
        tokens
    }

    fn push_parameters(&self, tokens: &mut Vec<String>) {
        match self {
            Self::Boolean(format) => {
                tokens.push(format.true_word.clone());
                tokens.push(format.false_word.clone());
            }
            Self::Integer(format) => tokens.push(format.thousands_separator.clone()),
            Self::Float(format) | Self::Decimal(format) => {
                tokens.push(format.thousands_separator.clone());
                tokens.push(format.decimal_separator.clone());
            }
            Self::Date(format) | Self::Datetime(format) => {
                tokens.push(format.pattern.source().to_string());
                tokens.push(
                    format
                        .locale
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_default(),
                );
            }
            Self::Currency(affixed) => {
                tokens.push(affixed.position.as_str().to_string());
                tokens.push(affixed.symbol.clone());
                tokens.extend(affixed.number.to_descriptor().to_tokens());
            }
            Self::Percentage(affixed) => {
                tokens.push(affixed.position.as_str().to_string());
                tokens.push(affixed.symbol.clone());
                tokens.extend(affixed.number.to_descriptor().to_tokens());
            }
            Self::Text => {}
            Self::Object(parameters) => tokens.extend(parameters.iter().cloned()),
        }
    }
}

/// Parses a descriptor from its text form.
pub fn parse_descriptor(text: &str) -> Result<Descriptor> {
    parse_tokens(&escape::split(text))
}

/// Renders a descriptor to its canonical text form.
///
/// Trailing empty parameters are omitted, except for objects whose
/// parameters are opaque and kept verbatim.
#[must_use]
pub fn render_descriptor(descriptor: &Descriptor) -> String {
    let tokens = descriptor.to_tokens();
    match descriptor {
        Descriptor::Object(_) => escape::join(&tokens),
        _ => escape::join_trimmed(&tokens),
    }
}

/// Parses an already split token sequence.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Descriptor> {
    let Some((tag, parameters)) = tokens.split_first() else {
        return Err(DescriptorError::Empty);
    };
    let parameters: Vec<&str> = parameters.iter().map(AsRef::as_ref).collect();
    match tag.as_ref() {
        "" => Err(DescriptorError::Empty),
        TEXT => {
            expect_arity(TEXT, "0", 0..=0, &parameters)?;
            Ok(Descriptor::Text)
        }
        OBJECT => Ok(Descriptor::Object(
            parameters.iter().map(ToString::to_string).collect(),
        )),
        BOOLEAN => parse_boolean(&parameters),
        INTEGER => parse_integer(INTEGER, &parameters).map(Descriptor::Integer),
        FLOAT => parse_decimal_format(FLOAT, &parameters).map(Descriptor::Float),
        DECIMAL => parse_decimal_format(DECIMAL, &parameters).map(Descriptor::Decimal),
        DATE => parse_date(DATE, &parameters).map(Descriptor::Date),
        DATETIME => parse_date(DATETIME, &parameters).map(Descriptor::Datetime),
        CURRENCY => parse_currency(&parameters),
        PERCENTAGE => parse_percentage(&parameters),
        other => Err(DescriptorError::UnknownType {
            tag: other.to_string(),
        }),
    }
}

fn expect_arity(
    tag: &'static str,
    expected: &'static str,
    range: std::ops::RangeInclusive<usize>,
    parameters: &[&str],
) -> Result<()> {
    if range.contains(&parameters.len()) {
        Ok(())
    } else {
        Err(DescriptorError::arity(tag, expected, parameters.len()))
    }
}

fn parse_boolean(parameters: &[&str]) -> Result<Descriptor> {
    expect_arity(BOOLEAN, "1..=2", 1..=2, parameters)?;
    let true_word = parameters[0];
    if true_word.is_empty() {
        return Err(DescriptorError::EmptyTrueWord);
    }
    let false_word = parameters.get(1).copied().unwrap_or_default();
    Ok(Descriptor::boolean(true_word, false_word))
}

fn parse_integer(tag: &'static str, parameters: &[&str]) -> Result<IntegerFormat> {
    expect_arity(tag, "0..=1", 0..=1, parameters)?;
    Ok(IntegerFormat {
        thousands_separator: parameters.first().copied().unwrap_or_default().to_string(),
    })
}

/// Grouping stripped from a number must never touch its decimal mark.
fn parse_decimal_format(tag: &'static str, parameters: &[&str]) -> Result<DecimalFormat> {
    expect_arity(tag, "0..=2", 0..=2, parameters)?;
    let format = DecimalFormat::new(
        parameters.first().copied().unwrap_or_default(),
        parameters.get(1).copied().unwrap_or_default(),
    );
    let thousands = format.thousands_separator.as_str();
    let decimal = format.effective_decimal_separator();
    if !thousands.is_empty() && (decimal.contains(thousands) || thousands.contains(decimal)) {
        return Err(DescriptorError::SeparatorClash {
            tag,
            thousands: thousands.to_string(),
            decimal: decimal.to_string(),
        });
    }
    Ok(format)
}

fn parse_date(tag: &'static str, parameters: &[&str]) -> Result<DateFormat> {
    expect_arity(tag, "1..=2", 1..=2, parameters)?;
    let pattern = DatePattern::compile(parameters[0])?;
    let locale = match parameters.get(1) {
        None | Some(&"") => None,
        Some(locale) => Some(locale.parse::<Locale>()?),
    };
    Ok(DateFormat { pattern, locale })
}

/// Splits the fixed `position/symbol/nested-tag` prefix of an affixed type.
fn parse_affix<'a>(
    tag: &'static str,
    parameters: &'a [&'a str],
) -> Result<(SymbolPosition, String, &'a str, &'a [&'a str])> {
    if parameters.len() < 3 {
        return Err(DescriptorError::arity(tag, "at least 3", parameters.len()));
    }
    let position = match parameters[0] {
        "pre" => SymbolPosition::Pre,
        "post" => SymbolPosition::Post,
        other => {
            return Err(DescriptorError::Position {
                tag,
                value: other.to_string(),
            });
        }
    };
    Ok((
        position,
        parameters[1].to_string(),
        parameters[2],
        &parameters[3..],
    ))
}

fn parse_currency(parameters: &[&str]) -> Result<Descriptor> {
    let (position, symbol, nested, rest) = parse_affix(CURRENCY, parameters)?;
    let number = match nested {
        INTEGER => CurrencyAmount::Integer(parse_integer(INTEGER, rest)?),
        DECIMAL => CurrencyAmount::Decimal(parse_decimal_format(DECIMAL, rest)?),
        other => {
            return Err(DescriptorError::UnsupportedNested {
                tag: CURRENCY,
                nested: other.to_string(),
            });
        }
    };
    Ok(Descriptor::Currency(Affixed {
        position,
        symbol,
        number,
    }))
}

fn parse_percentage(parameters: &[&str]) -> Result<Descriptor> {
    let (position, symbol, nested, rest) = parse_affix(PERCENTAGE, parameters)?;
    let number = match nested {
        FLOAT => PercentageAmount::Float(parse_decimal_format(FLOAT, rest)?),
        DECIMAL => PercentageAmount::Decimal(parse_decimal_format(DECIMAL, rest)?),
        other => {
            return Err(DescriptorError::UnsupportedNested {
                tag: PERCENTAGE,
                nested: other.to_string(),
            });
        }
    };
    Ok(Descriptor::Percentage(Affixed {
        position,
        symbol,
        number,
    }))
}

impl FromStr for Descriptor {
    type Err = DescriptorError;

    fn from_str(text: &str) -> Result<Self> {
        parse_descriptor(text)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_descriptor(self))
    }
}

impl Serialize for Descriptor {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&render_descriptor(self))
    }
}

impl<'de> Deserialize<'de> for Descriptor {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        parse_descriptor(&text).map_err(de::Error::custom)
    }
}
