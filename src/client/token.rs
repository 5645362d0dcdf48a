//! Client-credentials token exchange.
//!
//! The Spark token endpoint speaks JSON rather than the form encoding of RFC 6749: the grant
//! and scopes travel in a camel-case JSON body and the response carries `accessToken` and
//! `expiresIn`. Client authentication uses HTTP Basic.

// crates.io
use ::http::{
	Method, Request,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	client::{SparkClient, common::JSON_MEDIA_TYPE},
	error::{AuthenticationError, ConfigError},
	http::{SparkHttpClient, TransportErrorMapper},
	obs::{self, Operation},
};

const GRANT_TYPE: &str = "clientCredentials";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
	access_token: String,
	expires_in: i64,
}

impl<C, M> SparkClient<C, M>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges the client credentials for a bearer token with a single `POST`.
	///
	/// There is no retry and no refresh; callers acquire one token per run.
	pub async fn authenticate(&self) -> Result<AccessToken> {
		const OPERATION: Operation = Operation::Authenticate;

		obs::observe(OPERATION, "authenticate", async move {
			let body = serde_json::json!({
				"grantType": GRANT_TYPE,
				"scopes": self.config.scopes.to_request_value(),
			});
			let request = Request::builder()
				.method(Method::POST)
				.uri(self.config.token_endpoint()?.as_str())
				.header(AUTHORIZATION, self.credentials().basic_authorization())
				.header(ACCEPT, JSON_MEDIA_TYPE)
				.header(CONTENT_TYPE, JSON_MEDIA_TYPE)
				.body(body.to_string().into_bytes())
				.map_err(ConfigError::from)?;
			let response = self.dispatch(OPERATION, request).await?;
			let status = response.status().as_u16();

			if !response.status().is_success() {
				return Err(AuthenticationError::Rejected {
					status,
					body: crate::http::body_preview(response.body()),
				}
				.into());
			}

			let mut deserializer = serde_json::Deserializer::from_slice(response.body());
			let token: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
				.map_err(|source| AuthenticationError::MalformedToken { status, source })?;

			if token.access_token.trim().is_empty() {
				return Err(AuthenticationError::InvalidToken { reason: "accessToken is empty" }.into());
			}
			if token.expires_in <= 0 {
				return Err(
					AuthenticationError::InvalidToken { reason: "expiresIn is not positive" }.into()
				);
			}

			let token = AccessToken::new(token.access_token, token.expires_in);

			if token.expires_at().is_none() {
				return Err(
					AuthenticationError::InvalidToken { reason: "expiresIn is out of range" }.into()
				);
			}

			#[cfg(feature = "tracing")]
			tracing::debug!(expires_in = token.expires_in_seconds, "Access token acquired.");

			Ok(token)
		})
		.await
	}
}
