//! Endpoint and scope configuration shared by every request.
//!
//! `SparkConfig` replaces hard-coded literals so the client can target mock servers in tests.
//! Endpoint URLs are derived from the base URL with relative joins; the base URL path always
//! ends with `/` so joins append instead of replacing the last segment.

pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	auth::{LNG_FREIGHT_PRICES_SCOPE, ScopeSet},
	error::ConfigError,
};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.sparkcommodities.com";
/// Environment variable overriding [`SparkConfig::base_url`].
pub const BASE_URL_VAR: &str = "SPARK_API_BASE_URL";
/// Environment variable overriding [`SparkConfig::scopes`] (comma or whitespace separated).
pub const SCOPES_VAR: &str = "SPARK_API_SCOPES";

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SparkConfig {
	/// API root; every endpoint is resolved relative to it.
	pub base_url: Url,
	/// Scopes requested during the token exchange.
	pub scopes: ScopeSet,
}
impl SparkConfig {
	/// Creates a new builder seeded with the production defaults.
	pub fn builder() -> SparkConfigBuilder {
		SparkConfigBuilder::new()
	}

	/// Builds the default configuration, applying `SPARK_API_BASE_URL` and `SPARK_API_SCOPES`
	/// when set.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_with(|key| std::env::var(key).ok())
	}

	/// Same as [`SparkConfig::from_env`] but reads variables through `lookup`.
	///
	/// Blank values count as unset for both variables.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let mut builder = Self::builder();

		if let Some(raw) = lookup(BASE_URL_VAR).filter(|value| !value.trim().is_empty()) {
			let url = Url::parse(raw.trim())
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?;

			builder = builder.base_url(url);
		}
		if let Some(raw) = lookup(SCOPES_VAR).filter(|value| !value.trim().is_empty()) {
			builder = builder.scopes(ScopeSet::from_str(&raw)?);
		}

		builder.build()
	}

	/// Default scope set (`read:lng-freight-prices`).
	pub fn default_scopes() -> ScopeSet {
		ScopeSet::new([LNG_FREIGHT_PRICES_SCOPE]).unwrap_or_default()
	}

	/// Resolves `path` (no leading slash) against the base URL.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		self.base_url.join(path).map_err(|source| ConfigError::InvalidBaseUrl { source })
	}

	/// `POST /oauth/token/`.
	pub fn token_endpoint(&self) -> Result<Url, ConfigError> {
		self.endpoint("oauth/token/")
	}

	/// Appends percent-encoded `segments` plus a trailing slash to the base URL path.
	///
	/// Used for paths that embed caller-supplied identifiers such as tickers or route UUIDs.
	pub fn api_endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
		let mut url = self.base_url.clone();

		match url.path_segments_mut() {
			Ok(mut path) => {
				path.pop_if_empty().extend(segments).push("");
			},
			Err(()) => return Err(ConfigError::CannotBeABase { url: self.base_url.to_string() }),
		}

		Ok(url)
	}
}
