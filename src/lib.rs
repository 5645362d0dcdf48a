//! Spark commodities API client: resolve client credentials, mint a bearer token with the
//! client-credentials grant, and read contracts, price releases, and freight routes.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
#[cfg(feature = "cli")] pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Credentials,
		client::SparkClient,
		config::SparkConfig,
		http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = SparkClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Builds a configuration pointing at a mock server base URL with the default scopes.
	pub fn test_config(base_url: &str) -> SparkConfig {
		SparkConfig::builder()
			.base_url(Url::parse(base_url).expect("Mock server base URL should parse."))
			.build()
			.expect("Mock server configuration should be valid.")
	}

	/// Constructs a [`SparkClient`] for the provided mock server base URL and credentials,
	/// backed by the insecure reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		client_id: &str,
		client_secret: &str,
	) -> ReqwestTestClient {
		let credentials = Credentials::new(client_id, client_secret)
			.expect("Test credentials should be non-empty.");

		SparkClient::with_http_client(
			test_config(base_url),
			credentials,
			test_reqwest_http_client(),
			ReqwestTransportErrorMapper,
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Date, Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, parking_lot as _, tokio as _};
