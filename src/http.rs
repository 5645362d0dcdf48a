//! Transport primitives for Spark API calls.
//!
//! The module exposes [`SparkHttpClient`], the client's only dependency on an HTTP stack, and
//! [`TransportErrorMapper`], which classifies transport failures into the crate's
//! [`Error`] taxonomy. Requests and responses use the `http` crate's types with buffered
//! bodies so custom transports (fakes in tests, alternative stacks) need nothing from reqwest.

// crates.io
use http::header::{HeaderMap, RETRY_AFTER};
use time::format_description::well_known::Rfc2822;
// self
use crate::{_prelude::*, obs::Operation};
#[cfg(feature = "reqwest")] use crate::error::{ConfigError, TransportError};

/// Buffered HTTP request handed to a transport.
pub type HttpRequest = http::Request<Vec<u8>>;
/// Buffered HTTP response returned by a transport.
pub type HttpResponse = http::Response<Vec<u8>>;
/// Boxed future returned by [`SparkHttpClient::execute`].
pub type TransportFuture<'a, E> = Pin<Box<dyn Future<Output = Result<HttpResponse, E>> + 'a + Send>>;

/// Abstraction over HTTP transports able to execute Spark API requests.
///
/// Implementations must be `Send + Sync + 'static` so one instance can be shared behind an
/// `Arc` for the lifetime of the process. Non-2xx statuses are not transport errors: return
/// them as ordinary responses and let the client classify them.
pub trait SparkHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `request` and buffers the full response body.
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Maps transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an error emitted by the transport during `operation` into a client error.
	fn map_transport_error(&self, operation: Operation, error: E) -> Error;
}

/// Status and Retry-After hint of a response, copied into [`Error::ApiRequest`] on failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code.
	pub status: u16,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}
impl ResponseMetadata {
	/// Captures metadata from a buffered response.
	pub fn from_response(response: &HttpResponse) -> Self {
		Self {
			status: response.status().as_u16(),
			retry_after: parse_retry_after(response.headers()),
		}
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Build one per process and share it; the wrapped client pools connections across calls.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds the default client, surfacing TLS backend initialization failures.
	pub fn try_new() -> Result<Self, ConfigError> {
		Ok(Self(ReqwestClient::builder().build()?))
	}
}
#[cfg(feature = "reqwest")]
impl SparkHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: HttpRequest) -> TransportFuture<'_, Self::TransportError> {
		Box::pin(async move {
			let request = reqwest::Request::try_from(request)?;
			let response = self.0.execute(request).await?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new = HttpResponse::new(response.bytes().await?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok::<_, ReqwestError>(response_new)
		})
	}
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, operation: Operation, err: ReqwestError) -> Error {
		if err.is_builder() {
			return ConfigError::from(err).into();
		}
		if err.is_timeout() {
			return TransportError::timeout(operation, err).into();
		}

		TransportError::from(err).into()
	}
}

const BODY_PREVIEW_LIMIT: usize = 256;

/// Lossy, trimmed, length-capped view of a response body for error reports.
pub(crate) fn body_preview(body: &[u8]) -> Option<String> {
	let text = String::from_utf8_lossy(body);
	let text = text.trim();

	if text.is_empty() {
		return None;
	}
	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return Some(text.to_owned());
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	Some(buf)
}

fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u32>() {
		return Some(Duration::seconds(secs.into()));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
