//! Bearer access token minted by the client-credentials exchange.
//!
//! Tokens live in memory for the duration of a run. Expiry is tracked so callers can report
//! it, but nothing re-acquires a token once it lapses.

// self
use crate::{_prelude::*, auth::Secret};

/// Current lifecycle status for an access token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenStatus {
	/// Token is currently valid.
	Active,
	/// Token exceeded its expiry instant.
	Expired,
}

/// Access token plus the lifetime the token endpoint granted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
	/// Bearer token value; callers must avoid logging it.
	pub token: Secret,
	/// Lifetime in seconds as reported by `expiresIn`.
	pub expires_in_seconds: i64,
	/// Local instant the token response was received.
	pub issued_at: OffsetDateTime,
}
impl AccessToken {
	/// Creates a token issued now.
	pub fn new(token: impl Into<String>, expires_in_seconds: i64) -> Self {
		Self::issued_at(token, expires_in_seconds, OffsetDateTime::now_utc())
	}

	/// Creates a token issued at the provided instant.
	pub fn issued_at(
		token: impl Into<String>,
		expires_in_seconds: i64,
		issued_at: OffsetDateTime,
	) -> Self {
		Self { token: Secret::new(token), expires_in_seconds, issued_at }
	}

	/// Instant after which the API will reject the token.
	///
	/// `None` when the lifetime reaches past the last representable instant; such a token never
	/// expires from the client's point of view.
	pub fn expires_at(&self) -> Option<OffsetDateTime> {
		self.issued_at.checked_add(Duration::seconds(self.expires_in_seconds))
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		match self.expires_at() {
			Some(expires_at) if instant >= expires_at => TokenStatus::Expired,
			_ => TokenStatus::Active,
		}
	}

	/// Returns `true` if the token has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), TokenStatus::Expired)
	}

	/// `Authorization` header value for authenticated API calls.
	pub fn bearer_authorization(&self) -> String {
		format!("Bearer {}", self.token.expose())
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("token", &"<redacted>")
			.field("expires_in_seconds", &self.expires_in_seconds)
			.field("issued_at", &self.issued_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn expiry_is_relative_to_issue_time() {
		let token = AccessToken::issued_at("tok123", 1799, macros::datetime!(2025-01-01 00:00 UTC));

		assert_eq!(token.expires_at(), Some(macros::datetime!(2025-01-01 00:29:59 UTC)));
		assert_eq!(token.status_at(macros::datetime!(2025-01-01 00:29 UTC)), TokenStatus::Active);
		assert!(token.is_expired_at(macros::datetime!(2025-01-01 00:29:59 UTC)));
	}

	#[test]
	fn unrepresentable_expiry_never_expires() {
		let token = AccessToken::issued_at(
			"tok123",
			9_000_000_000_000_000,
			macros::datetime!(2025-01-01 00:00 UTC),
		);

		assert_eq!(token.expires_at(), None);
		assert!(!token.is_expired_at(macros::datetime!(9999-12-31 23:59 UTC)));
	}

	#[test]
	fn debug_and_header_values() {
		let token = AccessToken::new("tok123", 60);

		assert_eq!(token.bearer_authorization(), "Bearer tok123");
		assert!(!format!("{token:?}").contains("tok123"));
	}
}
