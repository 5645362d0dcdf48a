// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::SparkClient,
	http::{SparkHttpClient, TransportErrorMapper},
	model::{self, Envelope, Netback, NetbackCatalog, NetbackCatalogWire, NetbackWire},
	obs::{self, Operation},
};

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /v1.0/netbacks/reference-data/`. The token must carry the `read:netbacks` scope.
	pub async fn list_netbacks(&self, token: &AccessToken) -> Result<NetbackCatalog> {
		const OPERATION: Operation = Operation::ListNetbacks;

		obs::observe(OPERATION, "list_netbacks", async move {
			let url = self.config.api_endpoint(&["v1.0", "netbacks", "reference-data"])?;
			let envelope: Envelope<NetbackCatalogWire> =
				self.get_json(token, OPERATION, url).await?;

			Ok(NetbackCatalog::from_wire(envelope.data))
		})
		.await
	}

	/// `GET /v1.0/netbacks/?fob-port=..&release-date=..&via-point=..`.
	///
	/// Unset `release_date` and `via` are left out of the query so the server applies its
	/// defaults (latest release, default passage).
	pub async fn netback(
		&self,
		token: &AccessToken,
		fob_port: &str,
		release_date: Option<Date>,
		via: Option<&str>,
	) -> Result<Netback> {
		const OPERATION: Operation = Operation::Netback;

		obs::observe(OPERATION, "netback", async move {
			let mut url = self.config.api_endpoint(&["v1.0", "netbacks"])?;

			{
				let mut query = url.query_pairs_mut();

				query.append_pair("fob-port", fob_port);

				if let Some(release_date) = release_date {
					query.append_pair("release-date", &model::format_date(release_date)?);
				}
				if let Some(via) = via {
					query.append_pair("via-point", via);
				}
			}

			let envelope: Envelope<NetbackWire> = self.get_json(token, OPERATION, url).await?;

			Ok(Netback::from_wire(fob_port, release_date, via, envelope.data))
		})
		.await
	}
}
