//! Auth-domain types: client credentials, scope sets, bearer tokens, and redacted secrets.

pub mod credentials;
pub mod scope;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use scope::*;
pub use secret::*;
pub use token::*;
