//! Spark API client facade.
//!
//! [`SparkClient`] owns the shared transport, the transport error mapper, the validated
//! configuration, and the resolved credentials. Each operation lives in its own submodule and
//! runs inside an observation span (see [`crate::obs`]).

pub mod common;

mod contracts;
mod netbacks;
mod prices;
mod routes;
mod token;

// self
use crate::{
	_prelude::*,
	auth::Credentials,
	config::SparkConfig,
	http::{SparkHttpClient, TransportErrorMapper},
};
#[cfg(feature = "reqwest")]
use crate::http::{ReqwestHttpClient, ReqwestTransportErrorMapper};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport stack.
pub type ReqwestSparkClient = SparkClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Authenticated reader for the Spark API.
///
/// Build one per process: the transport is shared behind an `Arc` so every call reuses the
/// same connection pool. The client holds no token; callers pass the [`AccessToken`] returned
/// by [`SparkClient::authenticate`] to each read operation.
///
/// [`AccessToken`]: crate::auth::AccessToken
#[derive(Clone)]
pub struct SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Endpoint and scope configuration.
	pub config: SparkConfig,
	credentials: Credentials,
}
impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		config: SparkConfig,
		credentials: Credentials,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config,
			credentials,
		}
	}

	/// Credentials presented to the token endpoint.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}
}
#[cfg(feature = "reqwest")]
impl SparkClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by a freshly built reqwest transport.
	pub fn new(config: SparkConfig, credentials: Credentials) -> Result<Self> {
		Ok(Self::with_http_client(
			config,
			credentials,
			ReqwestHttpClient::try_new()?,
			ReqwestTransportErrorMapper,
		))
	}
}
impl<C, M> Debug for SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SparkClient")
			.field("config", &self.config)
			.field("credentials", &self.credentials)
			.finish()
	}
}
