// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::SparkClient,
	http::{SparkHttpClient, TransportErrorMapper},
	model::{Contract, Envelope},
	obs::{self, Operation},
};

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// `GET /v1.0/contracts/`; contracts keep the server's order.
	pub async fn list_contracts(&self, token: &AccessToken) -> Result<Vec<Contract>> {
		const OPERATION: Operation = Operation::ListContracts;

		obs::observe(OPERATION, "list_contracts", async move {
			let url = self.config.api_endpoint(&["v1.0", "contracts"])?;
			let envelope: Envelope<Vec<Contract>> = self.get_json(token, OPERATION, url).await?;

			Ok(envelope.data)
		})
		.await
	}
}
