//! Client credential resolution from a CSV file or the process environment.
//!
//! A credentials file, when supplied, is authoritative: an unreadable or malformed file is an
//! error and the environment is not consulted as a fallback.

// std
use std::{
	fs::File,
	io::Read,
	path::{Path, PathBuf},
};
// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
// self
use crate::{_prelude::*, auth::Secret};

/// Environment variable holding the OAuth client identifier.
pub const CLIENT_ID_VAR: &str = "SPARK_CLIENT_ID";
/// Environment variable holding the OAuth client secret.
pub const CLIENT_SECRET_VAR: &str = "SPARK_CLIENT_SECRET";

/// Reasons credential resolution can fail.
#[derive(Debug, ThisError)]
pub enum CredentialsError {
	/// The credentials file could not be opened or read.
	#[error("Credentials file {} could not be read.", .path.display())]
	ReadFile {
		/// Path supplied by the caller.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
	/// The file is not a `client_id,client_secret` CSV.
	#[error("Credentials file {} does not look like a Spark client credentials file.", .path.display())]
	NotCredentialsFile {
		/// Path supplied by the caller.
		path: PathBuf,
		/// Underlying CSV failure.
		#[source]
		source: csv::Error,
	},
	/// The file has a header row but no data row.
	#[error("Credentials file {} has no client_id/client_secret row.", .path.display())]
	MissingRow {
		/// Path supplied by the caller.
		path: PathBuf,
	},
	/// One of the two values is empty.
	#[error("The {field} value is empty.")]
	EmptyField {
		/// Name of the empty field.
		field: &'static str,
	},
	/// Neither environment variable pair is populated.
	#[error("{CLIENT_ID_VAR} and {CLIENT_SECRET_VAR} environment variables are required.")]
	MissingEnvironment,
}

/// Where a [`Credentials`] value was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialSource {
	/// A CSV credentials file.
	File(PathBuf),
	/// The `SPARK_CLIENT_ID`/`SPARK_CLIENT_SECRET` environment variables.
	Environment,
}
impl Display for CredentialSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::File(path) => write!(f, "file {}", path.display()),
			Self::Environment => f.write_str("environment"),
		}
	}
}

/// OAuth client identifier + secret pair. Immutable once built.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	client_id: String,
	client_secret: Secret,
}
impl Credentials {
	/// Builds credentials, rejecting empty values.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
	) -> Result<Self, CredentialsError> {
		let client_id = client_id.into();
		let client_secret = client_secret.into();

		if client_id.trim().is_empty() {
			return Err(CredentialsError::EmptyField { field: "client_id" });
		}
		if client_secret.trim().is_empty() {
			return Err(CredentialsError::EmptyField { field: "client_secret" });
		}

		Ok(Self { client_id, client_secret: Secret::new(client_secret) })
	}

	/// Resolves credentials from `path` when supplied, otherwise from the process environment.
	pub fn resolve(path: Option<&Path>) -> Result<(Self, CredentialSource), CredentialsError> {
		Self::resolve_with(path, |key| std::env::var(key).ok())
	}

	/// Same as [`Credentials::resolve`] but reads variables through `lookup`.
	pub fn resolve_with<F>(
		path: Option<&Path>,
		lookup: F,
	) -> Result<(Self, CredentialSource), CredentialsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		match path {
			Some(path) =>
				Self::from_csv_file(path).map(|creds| (creds, CredentialSource::File(path.into()))),
			None => Self::from_env_with(lookup).map(|creds| (creds, CredentialSource::Environment)),
		}
	}

	/// Reads the first data row of a `client_id,client_secret` CSV file.
	///
	/// The camel-case header `clientId,clientSecret` is accepted too. Fields are trimmed.
	pub fn from_csv_file(path: &Path) -> Result<Self, CredentialsError> {
		let file = File::open(path)
			.map_err(|source| CredentialsError::ReadFile { path: path.into(), source })?;

		Self::from_csv_reader(file, path)
	}

	fn from_csv_reader<R>(reader: R, path: &Path) -> Result<Self, CredentialsError>
	where
		R: Read,
	{
		#[derive(Deserialize)]
		struct CredentialsRow {
			#[serde(alias = "clientId")]
			client_id: String,
			#[serde(alias = "clientSecret")]
			client_secret: String,
		}

		let mut reader =
			csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_reader(reader);
		let row = reader
			.deserialize::<CredentialsRow>()
			.next()
			.ok_or_else(|| CredentialsError::MissingRow { path: path.into() })?
			.map_err(|source| CredentialsError::NotCredentialsFile { path: path.into(), source })?;

		Self::new(row.client_id, row.client_secret)
	}

	/// Reads `SPARK_CLIENT_ID` and `SPARK_CLIENT_SECRET` from the process environment.
	pub fn from_env() -> Result<Self, CredentialsError> {
		Self::from_env_with(|key| std::env::var(key).ok())
	}

	/// Reads the credential variables through `lookup`; values are returned unmodified.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, CredentialsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let populated = |key: &str| lookup(key).filter(|value: &String| !value.is_empty());

		match (populated(CLIENT_ID_VAR), populated(CLIENT_SECRET_VAR)) {
			(Some(id), Some(secret)) => Self::new(id, secret),
			_ => Err(CredentialsError::MissingEnvironment),
		}
	}

	/// OAuth client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth client secret; callers must avoid logging the exposed value.
	pub fn client_secret(&self) -> &Secret {
		&self.client_secret
	}

	/// RFC 7617 `Basic` authorization header value for the pair.
	pub fn basic_authorization(&self) -> String {
		let pair = format!("{}:{}", self.client_id, self.client_secret.expose());

		format!("Basic {}", STANDARD.encode(pair))
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.finish()
	}
}
