// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::SparkClient,
	http::{SparkHttpClient, TransportErrorMapper},
	model::{self, Envelope, RouteCatalog, RouteCatalogWire, RouteCosts},
	obs::{self, Operation},
};

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /v1.0/routes/`. The token must carry the `read:routes` scope.
	pub async fn list_routes(&self, token: &AccessToken) -> Result<RouteCatalog> {
		const OPERATION: Operation = Operation::ListRoutes;

		obs::observe(OPERATION, "list_routes", async move {
			let url = self.config.api_endpoint(&["v1.0", "routes"])?;
			let envelope: Envelope<RouteCatalogWire> = self.get_json(token, OPERATION, url).await?;

			Ok(RouteCatalog::from_wire(envelope.data))
		})
		.await
	}

	/// `GET /v1.0/routes/{uuid}/?release-date=YYYY-MM-DD`.
	pub async fn route_costs(
		&self,
		token: &AccessToken,
		uuid: &str,
		release_date: Date,
	) -> Result<RouteCosts> {
		const OPERATION: Operation = Operation::RouteCosts;

		obs::observe(OPERATION, "route_costs", async move {
			let mut url = self.config.api_endpoint(&["v1.0", "routes", uuid])?;
			url.query_pairs_mut().append_pair("release-date", &model::format_date(release_date)?);

			let envelope: Envelope<serde_json::Value> =
				self.get_json(token, OPERATION, url).await?;

			Ok(RouteCosts { uuid: uuid.to_owned(), release_date, data: envelope.data })
		})
		.await
	}
}
