// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::SparkClient,
	http::{SparkHttpClient, TransportErrorMapper},
	model::{Envelope, PriceRelease, PriceReleaseWire},
	obs::{self, Operation},
};

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /v1.0/contracts/{ticker}/price-releases/latest/`.
	pub async fn latest_price_release(
		&self,
		token: &AccessToken,
		ticker: &str,
	) -> Result<PriceRelease> {
		const OPERATION: Operation = Operation::LatestPriceRelease;

		obs::observe(OPERATION, "latest_price_release", async move {
			let url = self.config.api_endpoint(&[
				"v1.0",
				"contracts",
				ticker,
				"price-releases",
				"latest",
			])?;
			let envelope: Envelope<PriceReleaseWire> = self.get_json(token, OPERATION, url).await?;

			Ok(PriceRelease::from_wire(ticker, envelope.data))
		})
		.await
	}

	/// `GET /v1.0/contracts/{ticker}/price-releases/?limit=N[&offset=M]`.
	///
	/// Releases come back newest first, in the order the server sends them.
	pub async fn price_releases(
		&self,
		token: &AccessToken,
		ticker: &str,
		limit: u32,
		offset: Option<u32>,
	) -> Result<Vec<PriceRelease>> {
		const OPERATION: Operation = Operation::PriceReleases;

		obs::observe(OPERATION, "price_releases", async move {
			let mut url =
				self.config.api_endpoint(&["v1.0", "contracts", ticker, "price-releases"])?;

			{
				let mut query = url.query_pairs_mut();

				query.append_pair("limit", &limit.to_string());

				if let Some(offset) = offset {
					query.append_pair("offset", &offset.to_string());
				}
			}

			let envelope: Envelope<Vec<PriceReleaseWire>> =
				self.get_json(token, OPERATION, url).await?;

			Ok(envelope
				.data
				.into_iter()
				.map(|release| PriceRelease::from_wire(ticker, release))
				.collect())
		})
		.await
	}
}
