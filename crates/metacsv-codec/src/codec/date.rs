//! Date and datetime fields.
//!
//! UTC is the reference zone. A date is a calendar day taken as midnight
//! UTC. A datetime keeps full precision and is stored in UTC: a pattern
//! without zone letters reads wall-clock UTC, a pattern with an offset is
//! converted to UTC. Dates are truncated to the day, datetimes are not.
//!
//! Fields a pattern leaves out are read as 1970-01-01 00:00:00, so `MM/yyyy`
//! reads the first of the month and `HH:mm` a time on 1970-01-01.

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

use metacsv_model::DateFormat;

use crate::error::{CodecError, Result};
use crate::value::FieldValue;

#[derive(Debug, Clone)]
pub(crate) struct DateCodec {
    tag: &'static str,
    format: DateFormat,
}

impl DateCodec {
    pub(crate) fn date(format: &DateFormat) -> Self {
        Self {
            tag: "date",
            format: format.clone(),
        }
    }

    pub(crate) fn datetime(format: &DateFormat) -> Self {
        Self {
            tag: "datetime",
            format: format.clone(),
        }
    }

    fn parse_fields(&self, text: &str) -> Option<Parsed> {
        let mut parsed = Parsed::default();
        parse(
            &mut parsed,
            text,
            StrftimeItems::new(self.format.pattern.format()),
        )
        .ok()?;
        self.fill_missing(&mut parsed)?;
        Some(parsed)
    }

    fn fill_missing(&self, parsed: &mut Parsed) -> Option<()> {
        let fields = self.format.pattern.fields();
        if !fields.year {
            parsed.set_year(1970).ok()?;
        }
        if !fields.month {
            parsed.set_month(1).ok()?;
        }
        if !fields.day {
            parsed.set_day(1).ok()?;
        }
        if fields.has_time() {
            if !fields.hour {
                parsed.set_hour(0).ok()?;
            }
            if !fields.minute {
                parsed.set_minute(0).ok()?;
            }
        }
        Some(())
    }

    /// Wall-clock fields converted to UTC.
    fn to_utc(&self, parsed: &Parsed) -> Option<DateTime<Utc>> {
        let date = parsed.to_naive_date().ok()?;
        let time = if self.format.pattern.has_time() {
            parsed.to_naive_time().ok()?
        } else {
            NaiveTime::MIN
        };
        let local = date.and_time(time);
        if self.format.pattern.has_zone() {
            let offset = parsed.to_fixed_offset().ok()?;
            offset
                .from_local_datetime(&local)
                .single()
                .map(|dt| dt.with_timezone(&Utc))
        } else {
            Some(local.and_utc())
        }
    }

    pub(crate) fn decode_date(&self, text: &str) -> Result<NaiveDate> {
        let invalid = || CodecError::InvalidDate {
            text: text.to_string(),
            pattern: self.format.pattern.source().to_string(),
        };
        let parsed = self.parse_fields(text).ok_or_else(invalid)?;
        if self.format.pattern.has_zone() && self.format.pattern.has_time() {
            self.to_utc(&parsed)
                .map(|dt| dt.date_naive())
                .ok_or_else(invalid)
        } else {
            parsed.to_naive_date().map_err(|_| invalid())
        }
    }

    pub(crate) fn decode_datetime(&self, text: &str) -> Result<DateTime<Utc>> {
        self.parse_fields(text)
            .and_then(|parsed| self.to_utc(&parsed))
            .ok_or_else(|| CodecError::InvalidDatetime {
                text: text.to_string(),
                pattern: self.format.pattern.source().to_string(),
            })
    }

    pub(crate) fn encode(&self, value: &FieldValue) -> Result<String> {
        let instant = match value {
            FieldValue::Date(date) => date.and_time(NaiveTime::MIN).and_utc(),
            FieldValue::Datetime(datetime) => *datetime,
            other => {
                return Err(CodecError::ValueMismatch {
                    expected: self.tag,
                    found: other.type_name(),
                });
            }
        };
        Ok(instant.format(self.format.pattern.format()).to_string())
    }
}

pub(crate) fn canonical_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn canonical_datetime(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
