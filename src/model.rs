//! Read-only data returned by the Spark API.
//!
//! Public types are the shapes callers work with. The `*Wire` types mirror the JSON envelopes
//! and stay crate-private; conversions flatten them into the public model.

pub mod contract;
pub mod netback;
pub mod price;
pub mod route;

pub use contract::*;
pub use netback::*;
pub use price::*;
pub use route::*;

// crates.io
use serde::{Deserializer, de::Error as DeError};
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, error::ConfigError};

/// Every Spark response wraps its payload in `{"data": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
	pub(crate) data: T,
}

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses `YYYY-MM-DD`, ignoring any time suffix (`2024-05-01T00:00:00Z`).
pub(crate) fn parse_date(raw: &str) -> Option<Date> {
	let day = raw.trim().get(..10)?;

	Date::parse(day, DAY_FORMAT).ok()
}

/// Formats a date the way query parameters such as `release-date` expect it.
pub(crate) fn format_date(date: Date) -> Result<String, ConfigError> {
	date.format(DAY_FORMAT).map_err(|source| ConfigError::InvalidDate { source })
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<Date, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse_date(&raw).ok_or_else(|| DeError::custom(format!("invalid date `{raw}`")))
}

pub(crate) fn deserialize_dates<'de, D>(deserializer: D) -> Result<Vec<Date>, D::Error>
where
	D: Deserializer<'de>,
{
	<Vec<String>>::deserialize(deserializer)?
		.iter()
		.map(|raw| parse_date(raw).ok_or_else(|| DeError::custom(format!("invalid date `{raw}`"))))
		.collect()
}

/// The API sends assessments as decimal strings (`"73250.00"`); plain numbers are accepted too.
pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Raw {
		Number(f64),
		Text(String),
	}

	match Raw::deserialize(deserializer)? {
		Raw::Number(value) => Ok(value),
		Raw::Text(text) =>
			text.trim().parse().map_err(|_| DeError::custom(format!("invalid price `{text}`"))),
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn dates_drop_time_suffixes() {
		assert_eq!(parse_date("2024-05-01"), Some(macros::date!(2024 - 05 - 01)));
		assert_eq!(parse_date("2024-05-01T06:30:00Z"), Some(macros::date!(2024 - 05 - 01)));
		assert_eq!(parse_date("2024-5-1"), None);
		assert_eq!(parse_date("yesterday"), None);
	}

	#[test]
	fn query_dates_are_zero_padded() {
		assert_eq!(
			format_date(macros::date!(2024 - 05 - 01)).expect("Dates should format."),
			"2024-05-01"
		);
	}
}
