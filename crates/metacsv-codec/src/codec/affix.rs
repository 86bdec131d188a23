//! Currency and percentage fields: a number with a fixed symbol glued to
//! one side.

use metacsv_model::{Affixed, CurrencyAmount, PercentageAmount, SymbolPosition};

use super::number::NumberCodec;
use crate::error::{CodecError, Result};
use crate::value::FieldValue;

#[derive(Debug, Clone)]
pub(crate) struct AffixCodec {
    position: SymbolPosition,
    symbol: String,
    number: NumberCodec,
    percent: bool,
}

impl AffixCodec {
    pub(crate) fn currency(affixed: &Affixed<CurrencyAmount>) -> Self {
        let number = match &affixed.number {
            CurrencyAmount::Integer(format) => NumberCodec::integer(format),
            CurrencyAmount::Decimal(format) => NumberCodec::decimal(format),
        };
        Self {
            position: affixed.position,
            symbol: affixed.symbol.clone(),
            number,
            percent: false,
        }
    }

    pub(crate) fn percentage(affixed: &Affixed<PercentageAmount>) -> Self {
        let number = match &affixed.number {
            PercentageAmount::Float(format) => NumberCodec::float(format),
            PercentageAmount::Decimal(format) => NumberCodec::decimal(format),
        };
        Self {
            position: affixed.position,
            symbol: affixed.symbol.clone(),
            number,
            percent: true,
        }
    }

    pub(crate) fn decode(&self, text: &str) -> Result<FieldValue> {
        let trimmed = text.trim();
        let stripped = match self.position {
            SymbolPosition::Pre => trimmed.strip_prefix(self.symbol.as_str()),
            SymbolPosition::Post => trimmed.strip_suffix(self.symbol.as_str()),
        };
        let number = stripped.ok_or_else(|| CodecError::MissingSymbol {
            text: text.to_string(),
            symbol: self.symbol.clone(),
            position: self.position,
        })?;
        self.number.decode(number, self.percent)
    }

    pub(crate) fn encode(&self, value: &FieldValue) -> Result<String> {
        let number = self.number.encode(value, self.percent)?;
        Ok(match self.position {
            SymbolPosition::Pre => format!("{}{number}", self.symbol),
            SymbolPosition::Post => format!("{number}{}", self.symbol),
        })
    }
}
