//! Identity ports
//!
//! Credential verification itself (token issuance, password hashing) lives
//! outside this crate; these traits only consume its results.

use super::super::models::Identity;

/// Maps an optional bearer credential to a caller identity
pub trait IdentityResolver: Send + Sync {
    /// Resolve a credential
    ///
    /// Never fails: a missing, malformed, expired or unknown credential
    /// resolves to `None`, the same as an anonymous caller.
    fn resolve(&self, credential: Option<&str>) -> Option<Identity>;
}

/// Looks up display names for inspector references
pub trait UserDirectory: Send + Sync {
    /// Display name for a username, or `None` if the user no longer exists
    fn display_name(&self, username: &str) -> Option<String>;
}
