//! Observability helpers for Spark API operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `spark_api.request` with the `operation`
//!   and `stage` (call site) fields.
//! - Enable `metrics` to increment the [`REQUEST_COUNTER`] counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome`.
//! - Enable `cli` to install the stderr log subscriber used by the binary.

mod metrics;
#[cfg(feature = "cli")] mod subscriber;
mod tracing;

pub use metrics::*;
#[cfg(feature = "cli")] pub use subscriber::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Operations the client performs against the Spark API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
	/// Client-credentials token exchange.
	Authenticate,
	/// Contract listing.
	ListContracts,
	/// Latest price release for one contract.
	LatestPriceRelease,
	/// Historical price releases for one contract.
	PriceReleases,
	/// Freight route catalog.
	ListRoutes,
	/// Costs for one route on one release date.
	RouteCosts,
	/// Netback reference data.
	ListNetbacks,
	/// Netbacks for one FOB port.
	Netback,
}
impl Operation {
	/// Every operation, in the order a full run performs them.
	pub const ALL: [Operation; 8] = [
		Operation::Authenticate,
		Operation::ListContracts,
		Operation::LatestPriceRelease,
		Operation::PriceReleases,
		Operation::ListRoutes,
		Operation::RouteCosts,
		Operation::ListNetbacks,
		Operation::Netback,
	];

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Operation::Authenticate => "authenticate",
			Operation::ListContracts => "list_contracts",
			Operation::LatestPriceRelease => "latest_price_release",
			Operation::PriceReleases => "price_releases",
			Operation::ListRoutes => "list_routes",
			Operation::RouteCosts => "route_costs",
			Operation::ListNetbacks => "list_netbacks",
			Operation::Netback => "netback",
		}
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Attempt => "attempt",
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs `fut` inside an operation span and records attempt + outcome counters around it.
pub(crate) async fn observe<T, Fut>(operation: Operation, stage: &'static str, fut: Fut) -> Result<T>
where
	Fut: Future<Output = Result<T>>,
{
	let span = RequestSpan::new(operation, stage);

	record_outcome(operation, Outcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_outcome(operation, Outcome::Success),
		Err(_e) => {
			#[cfg(feature = "tracing")]
			::tracing::debug!(operation = operation.as_str(), error = %_e, "Spark API operation failed.");

			record_outcome(operation, Outcome::Failure);
		},
	}

	result
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(Operation::LatestPriceRelease.to_string(), "latest_price_release");
		assert_eq!(Operation::Authenticate.as_str(), "authenticate");
		assert_eq!(Outcome::Failure.to_string(), "failure");
	}

	#[tokio::test]
	async fn observe_passes_results_through() {
		let ok = observe(Operation::ListRoutes, "test", async { Ok(7_u8) }).await;

		assert_eq!(ok.expect("Successful futures should pass through."), 7);

		let err = observe::<(), _>(Operation::ListRoutes, "test", async {
			Err(crate::error::ConfigError::EmptyScopes.into())
		})
		.await;

		assert!(matches!(err, Err(Error::Config(crate::error::ConfigError::EmptyScopes))));
	}
}
