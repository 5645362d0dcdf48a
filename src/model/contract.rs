//! Contract listing entries.

// self
use crate::_prelude::*;

/// A named freight/pricing product offered by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
	/// Ticker symbol used in price-release paths (e.g. `spark25s`).
	pub id: String,
	/// Human-readable contract name (e.g. `Spark25S Pacific 160 TFDE`).
	pub full_name: String,
}
