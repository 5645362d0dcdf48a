//! Command-line driver: resolve credentials, authenticate, then print contracts and prices.
//! Freight routes and netbacks follow when the `read:routes` and `read:netbacks` scopes are
//! configured.
//!
//! The run is a linear state machine. Each successful step advances [`RunStage`]; the first
//! failure stops the run and is reported together with the last stage reached.

// std
use std::{io::Write, path::PathBuf, process::ExitCode};
// crates.io
use clap::Parser;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, Credentials, NETBACKS_SCOPE, ROUTES_SCOPE},
	client::SparkClient,
	config::SparkConfig,
	http::{SparkHttpClient, TransportErrorMapper},
	model::{PricePeriod, PriceRelease},
};

/// Number of historical releases requested for the first contract.
pub const HISTORY_LIMIT: u32 = 4;
/// Number of routes listed before fetching costs for the first one.
pub const ROUTE_LISTING_LIMIT: usize = 10;
/// Number of FOB ports listed before fetching netbacks for one of them.
pub const NETBACK_LISTING_LIMIT: usize = 10;

/// Spark commodities API sample client.
#[derive(Debug, Parser)]
#[command(name = "spark-api", version, about)]
pub struct Cli {
	/// CSV file with a `client_id,client_secret` header and one data row.
	///
	/// When omitted, `SPARK_CLIENT_ID` and `SPARK_CLIENT_SECRET` are read instead.
	pub credentials: Option<PathBuf>,
}

/// Progress of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStage {
	/// No token yet; credential resolution and the token exchange happen here.
	Unauthenticated,
	/// A bearer token was minted.
	TokenAcquired,
	/// The contract list was printed.
	ContractsListed,
	/// Latest and historical prices were printed.
	PricesFetched,
	/// Every step completed.
	Done,
}
impl RunStage {
	/// Returns a stable label for messages and logs.
	pub const fn as_str(self) -> &'static str {
		match self {
			RunStage::Unauthenticated => "unauthenticated",
			RunStage::TokenAcquired => "token_acquired",
			RunStage::ContractsListed => "contracts_listed",
			RunStage::PricesFetched => "prices_fetched",
			RunStage::Done => "done",
		}
	}
}
impl Display for RunStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A fatal error plus the stage the run had reached when it happened.
#[derive(Debug, ThisError)]
#[error("Run failed after stage `{stage}`: {error}")]
pub struct RunFailure {
	/// Last stage completed before the failure.
	pub stage: RunStage,
	/// The error that stopped the run.
	#[source]
	pub error: Error,
}

/// Parses arguments, drives the run on a current-thread runtime, and maps the outcome to an
/// exit code.
pub fn main() -> ExitCode {
	let cli = Cli::parse();
	let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
		Ok(runtime) => runtime,
		Err(e) => {
			eprintln!("Error: failed to start the async runtime: {e}");

			return ExitCode::FAILURE;
		},
	};
	let mut stdout = std::io::stdout().lock();

	exit_code(runtime.block_on(execute(&cli, &mut stdout)))
}

/// Resolves credentials and configuration from `cli` and the environment, then calls [`run`].
pub async fn execute<W>(cli: &Cli, out: &mut W) -> Result<(), RunFailure>
where
	W: Write,
{
	let unauthenticated = |error: Error| RunFailure { stage: RunStage::Unauthenticated, error };
	let (credentials, source) =
		Credentials::resolve(cli.credentials.as_deref()).map_err(|e| unauthenticated(e.into()))?;

	tracing::info!(%source, "Resolved client credentials.");

	let config = SparkConfig::from_env().map_err(|e| unauthenticated(e.into()))?;
	let client = SparkClient::new(config, credentials).map_err(unauthenticated)?;

	run(&client, out).await
}

/// Runs the full sequence against `client`, writing progress lines to `out`.
pub async fn run<C, M, W>(client: &SparkClient<C, M>, out: &mut W) -> Result<(), RunFailure>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	W: Write,
{
	let mut stage = RunStage::Unauthenticated;

	match drive(client, out, &mut stage).await {
		Ok(()) => Ok(()),
		Err(error) => {
			tracing::error!(stage = stage.as_str(), error = %error, "Run failed.");

			Err(RunFailure { stage, error })
		},
	}
}

/// Maps a run outcome to the process exit code, printing failures to stderr.
pub fn exit_code(outcome: Result<(), RunFailure>) -> ExitCode {
	if let Err(failure) = &outcome {
		eprintln!("Error: {failure}");

		let mut source = StdError::source(&failure.error);

		while let Some(cause) = source {
			eprintln!("  caused by: {cause}");

			source = cause.source();
		}
	}

	ExitCode::from(exit_status(&outcome))
}

/// Numeric status behind [`exit_code`]: `0` on success, `1` on any failure.
pub fn exit_status(outcome: &Result<(), RunFailure>) -> u8 {
	match outcome {
		Ok(()) => 0,
		Err(_) => 1,
	}
}

async fn drive<C, M, W>(client: &SparkClient<C, M>, out: &mut W, stage: &mut RunStage) -> Result<()>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	W: Write,
{
	let credentials = client.credentials();

	writeln!(out, ">>>> Running Spark API client...")?;
	writeln!(
		out,
		">>>> Found credentials: client_id={}, client_secret={}",
		credentials.client_id(),
		credentials.client_secret().preview()
	)?;

	let token = client.authenticate().await?;

	*stage = RunStage::TokenAcquired;

	writeln!(
		out,
		">>>> Fetched an access token {}, valid {} seconds.",
		token.token.preview(),
		token.expires_in_seconds
	)?;

	let contracts = client.list_contracts(&token).await?;

	*stage = RunStage::ContractsListed;

	writeln!(out, ">>>> Contracts:")?;

	for contract in &contracts {
		writeln!(out, "{}", contract.full_name)?;
	}
	for contract in &contracts {
		let release = client.latest_price_release(&token, &contract.id).await?;

		writeln!(out, ">>>> Latest price release for {}", contract.id)?;
		write_release(out, &release)?;
	}

	if let Some(first) = contracts.first() {
		let releases = client.price_releases(&token, &first.id, HISTORY_LIMIT, None).await?;

		writeln!(out, ">>>> Price releases for {}", first.id)?;

		for release in &releases {
			write_release(out, release)?;
		}
	}

	*stage = RunStage::PricesFetched;

	if client.config.scopes.contains(ROUTES_SCOPE) {
		write_routes(client, &token, out).await?;
	}
	if client.config.scopes.contains(NETBACKS_SCOPE) {
		write_netbacks(client, &token, out).await?;
	}

	*stage = RunStage::Done;

	writeln!(out, ">>>> Done.")?;

	Ok(())
}

async fn write_routes<C, M, W>(
	client: &SparkClient<C, M>,
	token: &AccessToken,
	out: &mut W,
) -> Result<()>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	W: Write,
{
	let catalog = client.list_routes(token).await?;

	writeln!(out, ">>>> Routes:")?;

	for route in catalog.routes.iter().take(ROUTE_LISTING_LIMIT) {
		writeln!(
			out,
			"uuid={}, {} to {} via={}",
			route.uuid,
			route.load_port,
			route.discharge_port,
			route.via.as_deref().unwrap_or("-")
		)?;
	}

	let (Some(route), Some(release_date)) = (catalog.routes.first(), catalog.release_dates.first())
	else {
		return Ok(());
	};
	let costs = client.route_costs(token, &route.uuid, *release_date).await?;

	writeln!(out, ">>>> Costs for route {} on {}", costs.uuid, costs.release_date)?;
	writeln!(out, "{:#}", costs.data)?;

	Ok(())
}

async fn write_netbacks<C, M, W>(
	client: &SparkClient<C, M>,
	token: &AccessToken,
	out: &mut W,
) -> Result<()>
where
	C: ?Sized + SparkHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
	W: Write,
{
	let catalog = client.list_netbacks(token).await?;

	writeln!(out, ">>>> Netback FOB ports:")?;

	for port in catalog.ports.iter().take(NETBACK_LISTING_LIMIT) {
		writeln!(out, "uuid={}, {} via={}", port.uuid, port.name, port.via_points.join("/"))?;
	}

	// Ports without via points have no netbacks to request.
	let Some((port, via)) = catalog
		.ports
		.iter()
		.find_map(|port| port.via_points.first().map(|via| (port, via.as_str())))
	else {
		return Ok(());
	};
	let release_date = catalog.release_dates.first().copied();
	let netback = client.netback(token, &port.uuid, release_date, Some(via)).await?;

	writeln!(out, ">>>> Netbacks for {} via {}", netback.name, via)?;

	for month in &netback.months {
		writeln!(
			out,
			"{}: NEA {:.3} (TTF basis {:.3}), NWE {:.3} (TTF basis {:.3}), NEA-NWE {:.3} USD/MMBtu",
			month.month,
			month.nea.outright,
			month.nea.ttf_basis,
			month.nwe.outright,
			month.nwe.ttf_basis,
			month.nea_minus_nwe.outright
		)?;
	}

	Ok(())
}

fn write_release<W>(out: &mut W, release: &PriceRelease) -> Result<()>
where
	W: Write,
{
	writeln!(out, "release date = {}", release.release_date)?;

	for period in &release.periods {
		writeln!(
			out,
			"Spark price {} for period starting on {}",
			format_prices(period),
			period.period_start
		)?;
	}

	Ok(())
}

fn format_prices(period: &PricePeriod) -> String {
	period
		.prices
		.iter()
		.map(|price| format!("{}={} {}", price.unit, price.price, price.currency))
		.collect::<Vec<_>>()
		.join(", ")
}

#[cfg(test)]
mod tests {
	// crates.io
	use clap::CommandFactory;
	use time::macros;
	// self
	use super::*;
	use crate::model::Price;

	#[test]
	fn cli_definition_is_consistent() {
		Cli::command().debug_assert();

		let cli = Cli::try_parse_from(["spark-api", "creds.csv"]).expect("Path argument should parse.");

		assert_eq!(cli.credentials, Some(PathBuf::from("creds.csv")));
		assert_eq!(
			Cli::try_parse_from(["spark-api"]).expect("No arguments should parse.").credentials,
			None
		);
	}

	#[test]
	fn failures_name_the_stage_reached() {
		let failure = RunFailure {
			stage: RunStage::TokenAcquired,
			error: crate::error::ConfigError::EmptyScopes.into(),
		};

		assert_eq!(
			failure.to_string(),
			"Run failed after stage `token_acquired`: At least one scope must be requested."
		);
	}

	#[test]
	fn exit_status_is_zero_only_on_success() {
		let failure = RunFailure {
			stage: RunStage::ContractsListed,
			error: crate::error::ConfigError::EmptyScopes.into(),
		};

		assert_eq!(exit_status(&Ok(())), 0);
		assert_eq!(exit_status(&Err(failure)), 1);
	}

	#[test]
	fn periods_render_every_unit() {
		let period = PricePeriod {
			period_start: macros::date!(2024 - 06 - 01),
			prices: vec![
				Price { unit: "usdPerDay".into(), currency: "USD".into(), price: 73_250.0 },
				Price { unit: "usdPerMMBtu".into(), currency: "USD".into(), price: 1.25 },
			],
		};

		assert_eq!(format_prices(&period), "usdPerDay=73250 USD, usdPerMMBtu=1.25 USD");
	}
}
