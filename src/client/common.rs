//! Request plumbing shared by every operation: dispatch, status classification, decoding.

// crates.io
use ::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION},
};
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::SparkClient,
	error::ConfigError,
	http::{HttpRequest, HttpResponse, ResponseMetadata, SparkHttpClient, TransportErrorMapper},
	obs::Operation,
};

/// Media type sent in `Accept` and `Content-Type` headers.
pub const JSON_MEDIA_TYPE: &str = "application/json";

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Sends `request`, routing transport failures through the configured mapper.
	pub(crate) async fn dispatch(
		&self,
		operation: Operation,
		request: HttpRequest,
	) -> Result<HttpResponse> {
		#[cfg(feature = "tracing")]
		tracing::debug!(method = %request.method(), uri = %request.uri(), "Sending Spark API request.");

		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| self.transport_mapper.map_transport_error(operation, e))?;

		#[cfg(feature = "tracing")]
		tracing::debug!(status = response.status().as_u16(), "Spark API responded.");

		Ok(response)
	}

	/// Authenticated `GET` decoding a 2xx JSON body into `T`.
	pub(crate) async fn get_json<T>(
		&self,
		token: &AccessToken,
		operation: Operation,
		url: Url,
	) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(AUTHORIZATION, token.bearer_authorization())
			.header(ACCEPT, JSON_MEDIA_TYPE)
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let response = self.dispatch(operation, request).await?;

		if !response.status().is_success() {
			let meta = ResponseMetadata::from_response(&response);

			return Err(Error::ApiRequest {
				operation,
				status: meta.status,
				body: crate::http::body_preview(response.body()),
				retry_after: meta.retry_after,
			});
		}

		decode(operation, response.body())
	}
}

/// Decodes `body`, reporting the JSON path of the first mismatch.
pub(crate) fn decode<T>(operation: Operation, body: &[u8]) -> Result<T>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| Error::MalformedResponse { operation, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::{Contract, Envelope};

	#[test]
	fn decode_reports_json_path() {
		let err = decode::<Envelope<Vec<Contract>>>(
			Operation::ListContracts,
			br#"{"data":[{"id":"spark25s","fullName":"Spark25S Pacific 160 TFDE"},{"id":"spark30s"}]}"#,
		)
		.expect_err("Contracts without fullName must be rejected.");

		match err {
			Error::MalformedResponse { operation, source } => {
				assert_eq!(operation, Operation::ListContracts);
				assert!(source.path().to_string().starts_with("data[1]"));
			},
			other => panic!("Unexpected error: {other:?}."),
		}
	}

	#[test]
	fn decode_rejects_non_json() {
		assert!(matches!(
			decode::<Envelope<Vec<Contract>>>(Operation::ListContracts, b"<html>"),
			Err(Error::MalformedResponse { .. })
		));
	}
}
