//! Client-level error types shared across credentials, token exchange, and API calls.

// self
use crate::{_prelude::*, auth::CredentialsError, obs::Operation};

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical error exposed by public APIs.
///
/// Every variant is fatal for a run; nothing in the crate retries.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Neither the credentials file nor the environment yielded a usable pair.
	#[error(transparent)]
	CredentialsNotFound(#[from] CredentialsError),
	/// The token endpoint refused the exchange or answered with an unusable token.
	#[error(transparent)]
	Authentication(#[from] AuthenticationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, timeout).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// An authenticated API call returned a non-2xx status.
	#[error("The {operation} request failed with HTTP {status}.")]
	ApiRequest {
		/// Operation that issued the request.
		operation: Operation,
		/// HTTP status code returned by the API.
		status: u16,
		/// Truncated response body, when the API sent one.
		body: Option<String>,
		/// Retry-After hint from upstream, reported but never acted upon.
		retry_after: Option<Duration>,
	},
	/// An API response did not match the expected JSON shape.
	#[error("The {operation} response is malformed.")]
	MalformedResponse {
		/// Operation that issued the request.
		operation: Operation,
		/// Structured parsing failure, including the JSON path that failed.
		#[source]
		source: JsonPathError,
	},
	/// Writing progress output failed.
	#[error("Failed to write output.")]
	Output(#[from] std::io::Error),
}

/// Token endpoint failures.
#[derive(Debug, ThisError)]
pub enum AuthenticationError {
	/// The token endpoint answered with a non-2xx status.
	#[error("Token endpoint rejected the client credentials with HTTP {status}.")]
	Rejected {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Truncated response body, when the endpoint sent one.
		body: Option<String>,
	},
	/// The token endpoint answered 2xx but the JSON lacked `accessToken`/`expiresIn`.
	#[error("Token endpoint returned a malformed token response.")]
	MalformedToken {
		/// HTTP status code returned by the token endpoint.
		status: u16,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// The token endpoint answered with fields that cannot be used.
	#[error("Token endpoint returned an unusable token: {reason}.")]
	InvalidToken {
		/// Which invariant the token violated.
		reason: &'static str,
	},
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] http::Error),
	/// Base URL cannot be parsed.
	#[error("Base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL must use HTTPS unless it targets a loopback host.
	#[error("Base URL must use HTTPS: {url}.")]
	InsecureBaseUrl {
		/// Base URL that failed validation.
		url: String,
	},
	/// Base URL cannot carry relative paths (e.g. `mailto:` or `data:` URLs).
	#[error("Base URL cannot be used as a base: {url}.")]
	CannotBeABase {
		/// Base URL that failed validation.
		url: String,
	},
	/// A date query parameter cannot be rendered as `YYYY-MM-DD`.
	#[error("Date cannot be formatted for a query parameter.")]
	InvalidDate {
		/// Underlying formatting failure.
		#[source]
		source: time::error::Format,
	},
	/// At least one scope must be requested.
	#[error("At least one scope must be requested.")]
	EmptyScopes,
	/// Configured scopes cannot be normalized.
	#[error("Configured scopes are invalid.")]
	InvalidScope(#[from] crate::auth::ScopeValidationError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Spark API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The request did not complete before the transport's timeout.
	#[error("Request timed out during the {operation} call.")]
	Timeout {
		/// Operation that issued the request.
		operation: Operation,
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Spark API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(
		operation: Operation,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Timeout { operation, source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
