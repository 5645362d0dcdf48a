// self
use crate::obs::{Operation, Outcome};

/// Counter incremented once when an operation starts and once when it settles.
pub const REQUEST_COUNTER: &str = "spark_api_request_total";

/// Label pairs attached to a [`REQUEST_COUNTER`] sample.
pub fn request_labels(operation: Operation, outcome: Outcome) -> [(&'static str, &'static str); 2] {
	[("operation", operation.as_str()), ("outcome", outcome.as_str())]
}

#[cfg(feature = "metrics")]
pub(crate) fn record_outcome(operation: Operation, outcome: Outcome) {
	let [(operation_key, operation), (outcome_key, outcome)] = request_labels(operation, outcome);

	metrics::counter!(REQUEST_COUNTER, operation_key => operation, outcome_key => outcome)
		.increment(1);
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_outcome(_: Operation, _: Outcome) {}

#[cfg(test)]
mod tests {
	// std
	use std::collections::HashSet;
	// self
	use super::*;

	#[test]
	fn every_sample_has_distinct_labels() {
		let outcomes = [Outcome::Attempt, Outcome::Success, Outcome::Failure];
		let samples = Operation::ALL
			.iter()
			.flat_map(|&operation| outcomes.iter().map(move |&outcome| request_labels(operation, outcome)))
			.collect::<HashSet<_>>();

		assert_eq!(samples.len(), Operation::ALL.len() * outcomes.len());
		assert!(samples.contains(&[("operation", "netback"), ("outcome", "attempt")]));
	}

	#[test]
	fn recording_without_a_recorder_is_silent() {
		for operation in Operation::ALL {
			record_outcome(operation, Outcome::Failure);
		}
	}
}
