//! Scopes requested from the Spark token endpoint.
//!
//! The endpoint takes one `scopes` string with entries joined by commas
//! (`read:lng-freight-prices,read:routes`), so an entry may contain neither whitespace nor a
//! comma.

// std
use std::collections::BTreeSet;
// self
use crate::_prelude::*;

/// Scope required to read contracts and price releases.
pub const LNG_FREIGHT_PRICES_SCOPE: &str = "read:lng-freight-prices";
/// Scope required to read freight routes.
pub const ROUTES_SCOPE: &str = "read:routes";
/// Scope required to read netbacks.
pub const NETBACKS_SCOPE: &str = "read:netbacks";

/// Reasons a scope entry is refused.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ScopeValidationError {
	/// The entry is an empty string.
	#[error("Scope entries cannot be empty.")]
	Empty,
	/// The entry contains whitespace.
	#[error("Scope `{scope}` contains whitespace.")]
	ContainsWhitespace {
		/// Rejected entry.
		scope: String,
	},
	/// The entry contains the `,` delimiter.
	#[error("Scope `{scope}` contains a comma.")]
	ContainsDelimiter {
		/// Rejected entry.
		scope: String,
	},
}

/// Deduplicated, sorted scope entries.
///
/// Ordering is lexical, so the request value does not depend on how callers listed them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScopeSet(BTreeSet<String>);
impl ScopeSet {
	/// Delimiter joining scopes in the token request body.
	pub const DELIMITER: char = ',';

	/// Validates every entry and collects them into a set.
	pub fn new<I, S>(scopes: I) -> Result<Self, ScopeValidationError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		scopes.into_iter().map(|scope| validate(scope.into())).collect::<Result<_, _>>().map(Self)
	}

	/// Number of distinct scopes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// `true` when nothing would be requested.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `true` when `scope` is part of the set.
	pub fn contains(&self, scope: &str) -> bool {
		self.0.contains(scope)
	}

	/// Entries in request order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// The `scopes` value sent to the token endpoint.
	pub fn to_request_value(&self) -> String {
		self.iter().collect::<Vec<_>>().join(",")
	}
}
impl Display for ScopeSet {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.to_request_value())
	}
}
impl FromStr for ScopeSet {
	type Err = ScopeValidationError;

	/// Splits on commas and whitespace. An empty string is an empty set; a string made only of
	/// separators is an error.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() {
			return Ok(Self::default());
		}

		let set = Self::new(
			s.split(|c: char| c == Self::DELIMITER || c.is_whitespace())
				.filter(|entry| !entry.is_empty()),
		)?;

		if set.is_empty() { Err(ScopeValidationError::Empty) } else { Ok(set) }
	}
}

fn validate(scope: String) -> Result<String, ScopeValidationError> {
	if scope.is_empty() {
		Err(ScopeValidationError::Empty)
	} else if scope.chars().any(char::is_whitespace) {
		Err(ScopeValidationError::ContainsWhitespace { scope })
	} else if scope.contains(ScopeSet::DELIMITER) {
		Err(ScopeValidationError::ContainsDelimiter { scope })
	} else {
		Ok(scope)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn request_value_is_sorted_and_deduplicated() {
		let scopes = ScopeSet::new([ROUTES_SCOPE, LNG_FREIGHT_PRICES_SCOPE, ROUTES_SCOPE])
			.expect("Both scopes should be valid.");

		assert_eq!(scopes.len(), 2);
		assert_eq!(scopes.to_request_value(), "read:lng-freight-prices,read:routes");
		assert_eq!(scopes.to_string(), scopes.to_request_value());
	}

	#[test]
	fn malformed_entries_are_refused() {
		assert_eq!(ScopeSet::new([""]), Err(ScopeValidationError::Empty));
		assert_eq!(
			ScopeSet::new(["read: routes"]),
			Err(ScopeValidationError::ContainsWhitespace { scope: "read: routes".into() })
		);
		assert_eq!(
			ScopeSet::new(["read:routes,read:x"]),
			Err(ScopeValidationError::ContainsDelimiter { scope: "read:routes,read:x".into() })
		);
	}

	#[test]
	fn parsing_accepts_mixed_separators() {
		let scopes = ScopeSet::from_str("read:routes, read:lng-freight-prices")
			.expect("Comma and space separated scopes should parse.");

		assert!(scopes.contains(ROUTES_SCOPE));
		assert!(scopes.contains(LNG_FREIGHT_PRICES_SCOPE));
		assert!(ScopeSet::from_str("").expect("Empty input is an empty set.").is_empty());
		assert_eq!(ScopeSet::from_str(" , "), Err(ScopeValidationError::Empty));
	}
}
