//! Freight routes and per-route cost lookups.

// self
use crate::{_prelude::*, model};

/// A freight route between a load port and a discharge port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
	/// Route identifier used by [`RouteCosts`] lookups.
	pub uuid: String,
	/// Load port name.
	pub load_port: String,
	/// Discharge port name.
	pub discharge_port: String,
	/// Canal or passage, when the route specifies one.
	pub via: Option<String>,
}

/// Available routes plus the release dates costs can be requested for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteCatalog {
	/// Routes in server order.
	pub routes: Vec<Route>,
	/// Spark release dates, newest first as the server sends them.
	pub release_dates: Vec<Date>,
}
impl RouteCatalog {
	pub(crate) fn from_wire(wire: RouteCatalogWire) -> Self {
		let routes = wire
			.routes
			.into_iter()
			.map(|route| Route {
				uuid: route.uuid,
				load_port: route.load_port.name,
				discharge_port: route.discharge_port.name,
				via: route.via,
			})
			.collect();

		Self { routes, release_dates: wire.spark_release_dates }
	}
}

/// Cost breakdown for one route on one release date.
///
/// The payload is kept as raw JSON; its schema varies by route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteCosts {
	/// Route identifier.
	pub uuid: String,
	/// Release date the costs were requested for.
	pub release_date: Date,
	/// Raw `data` payload.
	pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RouteCatalogWire {
	routes: Vec<RouteWire>,
	#[serde(default, deserialize_with = "model::deserialize_dates")]
	spark_release_dates: Vec<Date>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteWire {
	uuid: String,
	load_port: PortWire,
	discharge_port: PortWire,
	#[serde(default)]
	via: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PortWire {
	name: String,
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn catalog_flattens_ports() {
		let wire: RouteCatalogWire = serde_json::from_str(
			r#"{
				"routes": [{
					"uuid": "003dec0a-ce8f-41db-8c24-4d7ef6addf70",
					"loadPort": {"name": "Sabine Pass", "uuid": "p1"},
					"dischargePort": {"name": "Futtsu", "uuid": "p2"},
					"via": "panama"
				}, {
					"uuid": "0045ae3d-6bb4-4b53-a4f6-b2cf6a4a5d2c",
					"loadPort": {"name": "Bonny LNG"},
					"dischargePort": {"name": "Gate"},
					"via": null
				}],
				"sparkReleaseDates": ["2024-05-01", "2024-04-30"]
			}"#,
		)
		.expect("Route catalog fixture should deserialize.");
		let catalog = RouteCatalog::from_wire(wire);

		assert_eq!(catalog.routes.len(), 2);
		assert_eq!(catalog.routes[0].load_port, "Sabine Pass");
		assert_eq!(catalog.routes[0].via.as_deref(), Some("panama"));
		assert_eq!(catalog.routes[1].via, None);
		assert_eq!(
			catalog.release_dates,
			vec![macros::date!(2024 - 05 - 01), macros::date!(2024 - 04 - 30)]
		);
	}
}
