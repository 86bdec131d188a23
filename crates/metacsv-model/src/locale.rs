//! Locale tags attached to date and datetime descriptors.

use std::fmt;
use std::str::FromStr;

use crate::error::DescriptorError;

/// A validated `language[_COUNTRY[_variant]]` tag.
///
/// Both `_` and `-` are accepted as separators; the tag always renders with
/// `_`. Language is lowercased and country uppercased on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
    variant: Option<String>,
}

impl Locale {
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }
}

impl FromStr for Locale {
    type Err = DescriptorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || DescriptorError::Locale {
            value: value.to_string(),
        };
        let mut parts = value.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        let country = match parts.next() {
            None => None,
            Some(country) if is_country(country) => Some(country.to_ascii_uppercase()),
            Some(_) => return Err(invalid()),
        };
        let variant = match parts.next() {
            None => None,
            Some(variant)
                if !variant.is_empty() && variant.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Some(variant.to_string())
            }
            Some(_) => return Err(invalid()),
        };
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self {
            language: language.to_ascii_lowercase(),
            country,
            variant,
        })
    }
}

fn is_country(code: &str) -> bool {
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        || (code.len() == 3 && code.chars().all(|c| c.is_ascii_digit()))
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(country) = &self.country {
            write!(f, "_{country}")?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "_{variant}")?;
        }
        Ok(())
    }
}
