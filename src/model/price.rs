//! Price releases, their delivery periods, and the Spark price per unit.

// self
use crate::{_prelude::*, model};

/// A dated publication of prices for future delivery periods of one contract.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRelease {
	/// Contract ticker the release belongs to.
	pub ticker: String,
	/// Publication date.
	pub release_date: Date,
	/// Delivery periods in server order.
	pub periods: Vec<PricePeriod>,
}
impl PriceRelease {
	pub(crate) fn from_wire(ticker: &str, wire: PriceReleaseWire) -> Self {
		let periods = wire
			.data
			.into_iter()
			.next()
			.map(|series| series.data_points.into_iter().map(PricePeriod::from_wire).collect())
			.unwrap_or_default();

		Self { ticker: ticker.to_owned(), release_date: wire.release_date, periods }
	}
}

/// Prices for one delivery period.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePeriod {
	/// First day of the delivery period.
	pub period_start: Date,
	/// One entry per derived-price unit, ordered by unit name.
	pub prices: Vec<Price>,
}
impl PricePeriod {
	fn from_wire(wire: DataPointWire) -> Self {
		let prices = wire
			.derived_prices
			.into_iter()
			.map(|(unit, derived)| Price {
				currency: currency_of(&unit),
				unit,
				price: derived.spark,
			})
			.collect();

		Self { period_start: wire.delivery_period.start_at, prices }
	}
}

/// One Spark price figure.
#[derive(Clone, Debug, PartialEq)]
pub struct Price {
	/// Derived-price key as sent by the API (e.g. `usdPerDay`).
	pub unit: String,
	/// Upper-cased currency prefix of `unit` (e.g. `USD`).
	pub currency: String,
	/// The `spark` assessment.
	pub price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceReleaseWire {
	#[serde(deserialize_with = "model::deserialize_date")]
	release_date: Date,
	#[serde(default)]
	data: Vec<PriceSeriesWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceSeriesWire {
	#[serde(default)]
	data_points: Vec<DataPointWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataPointWire {
	delivery_period: DeliveryPeriodWire,
	#[serde(default)]
	derived_prices: BTreeMap<String, DerivedPriceWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeliveryPeriodWire {
	#[serde(deserialize_with = "model::deserialize_date")]
	start_at: Date,
}

#[derive(Debug, Deserialize)]
struct DerivedPriceWire {
	#[serde(deserialize_with = "model::deserialize_price")]
	spark: f64,
}

fn currency_of(unit: &str) -> String {
	let prefix = unit.chars().take_while(char::is_ascii_lowercase).collect::<String>();

	if prefix.is_empty() { unit.to_ascii_uppercase() } else { prefix.to_ascii_uppercase() }
}
