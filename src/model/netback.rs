//! Netbacks: the value of a cargo at its FOB port once freight to a destination region is
//! deducted, quoted for NEA (North-East Asia) and NWE (North-West Europe).

// self
use crate::{_prelude::*, model};

/// A FOB port with netback coverage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetbackPort {
	/// Port identifier passed as `fob-port`.
	pub uuid: String,
	/// Port name.
	pub name: String,
	/// Passages accepted as `via-point` for this port (e.g. `suez`, `panama`, `cogh`).
	///
	/// Empty when the port has no netback data to request.
	pub via_points: Vec<String>,
}

/// Netback reference data: covered ports and the release dates netbacks exist for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetbackCatalog {
	/// Ports in server order.
	pub ports: Vec<NetbackPort>,
	/// Spark release dates, newest first as the server sends them.
	pub release_dates: Vec<Date>,
}
impl NetbackCatalog {
	/// Looks a port up by identifier.
	pub fn port(&self, uuid: &str) -> Option<&NetbackPort> {
		self.ports.iter().find(|port| port.uuid == uuid)
	}

	pub(crate) fn from_wire(wire: NetbackCatalogWire) -> Self {
		let ports = wire
			.static_data
			.fob_ports
			.into_iter()
			.map(|port| NetbackPort {
				uuid: port.uuid,
				name: port.name,
				via_points: port.available_via_points.unwrap_or_default(),
			})
			.collect();

		Self { ports, release_dates: wire.static_data.spark_releases }
	}
}

/// Netback series for one FOB port, release, and passage.
#[derive(Clone, Debug, PartialEq)]
pub struct Netback {
	/// FOB port identifier the series was requested for.
	pub fob_port: String,
	/// Port name as labeled by the API (e.g. `Sabine Pass`).
	pub name: String,
	/// Requested release date; the server picks the latest one when unset.
	pub release_date: Option<Date>,
	/// Requested passage; the server picks its default when unset.
	pub via: Option<String>,
	/// One entry per load month, in server order.
	pub months: Vec<NetbackMonth>,
}
impl Netback {
	pub(crate) fn from_wire(
		fob_port: &str,
		release_date: Option<Date>,
		via: Option<&str>,
		wire: NetbackWire,
	) -> Self {
		Self {
			fob_port: fob_port.to_owned(),
			name: wire.name,
			release_date,
			via: via.map(str::to_owned),
			months: wire.netbacks.into_iter().map(NetbackMonth::from_wire).collect(),
		}
	}
}

/// Netbacks for one load month.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetbackMonth {
	/// Load month as sent by the API.
	pub month: LoadMonth,
	/// Delivered to North-East Asia.
	pub nea: NetbackValue,
	/// Delivered to North-West Europe.
	pub nwe: NetbackValue,
	/// NEA minus NWE spread.
	pub nea_minus_nwe: NetbackValue,
}
impl NetbackMonth {
	fn from_wire(wire: NetbackMonthWire) -> Self {
		Self {
			month: wire.load.month,
			nea: NetbackValue::from_wire(wire.nea),
			nwe: NetbackValue::from_wire(wire.nwe),
			nea_minus_nwe: NetbackValue::from_wire(wire.nea_minus_nwe),
		}
	}
}

/// Load month as `(year, month)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadMonth {
	/// Calendar year.
	pub year: i32,
	/// Month of the year.
	pub month: time::Month,
}
impl Display for LoadMonth {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{:04}-{:02}", self.year, u8::from(self.month))
	}
}

/// A netback in USD per MMBtu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetbackValue {
	/// Outright price.
	pub outright: f64,
	/// Spread to the TTF hub.
	pub ttf_basis: f64,
}
impl NetbackValue {
	fn from_wire(wire: NetbackValueWire) -> Self {
		Self { outright: wire.outright.value, ttf_basis: wire.ttf_basis.value }
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NetbackCatalogWire {
	static_data: StaticDataWire,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaticDataWire {
	fob_ports: Vec<FobPortWire>,
	#[serde(default, deserialize_with = "model::deserialize_dates")]
	spark_releases: Vec<Date>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FobPortWire {
	uuid: String,
	name: String,
	#[serde(default)]
	available_via_points: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetbackWire {
	name: String,
	#[serde(default)]
	netbacks: Vec<NetbackMonthWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetbackMonthWire {
	load: LoadWire,
	nea: NetbackValueWire,
	nwe: NetbackValueWire,
	nea_minus_nwe: NetbackValueWire,
}

#[derive(Debug, Deserialize)]
struct LoadWire {
	#[serde(deserialize_with = "deserialize_month")]
	month: LoadMonth,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetbackValueWire {
	outright: UsdPerMmbtuWire,
	ttf_basis: UsdPerMmbtuWire,
}

#[derive(Debug, Deserialize)]
struct UsdPerMmbtuWire {
	#[serde(rename = "usdPerMMBtu", deserialize_with = "model::deserialize_price")]
	value: f64,
}

/// Accepts `YYYY-MM` and any longer date-like string starting with it (`2024-06-01`).
fn deserialize_month<'de, D>(deserializer: D) -> Result<LoadMonth, D::Error>
where
	D: serde::Deserializer<'de>,
{
	use serde::de::Error as DeError;

	let raw = String::deserialize(deserializer)?;
	let invalid = || D::Error::custom(format!("invalid month `{raw}`"));
	let (year, month) = raw.trim().get(..7).and_then(|head| head.split_once('-')).ok_or_else(invalid)?;
	let year = year.parse::<i32>().map_err(|_| invalid())?;
	let month = month
		.parse::<u8>()
		.ok()
		.and_then(|month| time::Month::try_from(month).ok())
		.ok_or_else(invalid)?;

	Ok(LoadMonth { year, month })
}
