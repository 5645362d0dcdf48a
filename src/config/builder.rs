//! Validating builder for [`SparkConfig`].

// self
use crate::{
	_prelude::*,
	auth::ScopeSet,
	config::{DEFAULT_BASE_URL, SparkConfig},
	error::ConfigError,
};

const LOOPBACK_HOSTS: [&str; 3] = ["localhost", "127.0.0.1", "[::1]"];

/// Builder for [`SparkConfig`] values.
#[derive(Debug)]
pub struct SparkConfigBuilder {
	/// API root override; the production root is used when unset.
	pub base_url: Option<Url>,
	/// Requested scopes.
	pub scopes: ScopeSet,
}
impl SparkConfigBuilder {
	/// Creates a builder with the default scope and no base URL override.
	pub fn new() -> Self {
		Self { base_url: None, scopes: SparkConfig::default_scopes() }
	}

	/// Overrides the API root.
	pub fn base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the requested scopes.
	pub fn scopes(mut self, scopes: ScopeSet) -> Self {
		self.scopes = scopes;

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	pub fn build(self) -> Result<SparkConfig, ConfigError> {
		let mut base_url = match self.base_url {
			Some(url) => url,
			None => Url::parse(DEFAULT_BASE_URL)
				.map_err(|source| ConfigError::InvalidBaseUrl { source })?,
		};

		validate_base_url(&base_url)?;

		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}
		if self.scopes.is_empty() {
			return Err(ConfigError::EmptyScopes);
		}

		Ok(SparkConfig { base_url, scopes: self.scopes })
	}
}
impl Default for SparkConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_base_url(url: &Url) -> Result<(), ConfigError> {
	if url.cannot_be_a_base() {
		return Err(ConfigError::CannotBeABase { url: url.to_string() });
	}

	let loopback = url.host_str().is_some_and(|host| LOOPBACK_HOSTS.contains(&host));

	if url.scheme() == "https" || (url.scheme() == "http" && loopback) {
		Ok(())
	} else {
		Err(ConfigError::InsecureBaseUrl { url: url.to_string() })
	}
}
