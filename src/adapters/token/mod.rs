//! Static bearer-token identities
//!
//! Maps pre-shared tokens from the config file to identities. Token issuance
//! and rotation happen elsewhere; this adapter only answers "who holds this
//! token".

use std::collections::HashMap;

use log::debug;

use crate::core::models::{Identity, Role};
use crate::core::ports::{IdentityResolver, UserDirectory};

/// A known user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    /// Identity the token resolves to
    pub identity: Identity,
    /// Name shown as "last inspector"; falls back to the username
    pub display_name: Option<String>,
}

/// Token-to-identity table
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    by_token: HashMap<String, String>,
    users: HashMap<String, UserEntry>,
}

impl TokenDirectory {
    /// Create an empty directory (every caller is anonymous)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user and the token that authenticates them
    pub fn add_user(
        &mut self,
        username: &str,
        role: Role,
        token: &str,
        display_name: Option<String>,
    ) {
        self.by_token.insert(token.to_string(), username.to_string());
        self.users.insert(
            username.to_string(),
            UserEntry {
                identity: Identity::new(username, role),
                display_name,
            },
        );
    }

    /// Builder-style [`Self::add_user`]
    #[must_use]
    pub fn with_user(mut self, username: &str, role: Role, token: &str) -> Self {
        self.add_user(username, role, token, None);
        self
    }

    /// Number of known users
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Extract the token from an `Authorization` header value
///
/// Accepts `Bearer <token>` (scheme case-insensitive) or a bare token.
#[must_use]
pub fn bearer_token(credential: &str) -> Option<&str> {
    let credential = credential.trim();
    if credential.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = match credential.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        Some(_) => return None,
        None => credential,
    };
    (!token.is_empty()).then_some(token)
}

impl IdentityResolver for TokenDirectory {
    fn resolve(&self, credential: Option<&str>) -> Option<Identity> {
        let token = credential.and_then(bearer_token)?;
        let identity = self
            .by_token
            .get(token)
            .and_then(|username| self.users.get(username))
            .map(|entry| entry.identity.clone());
        if identity.is_none() {
            debug!("unrecognized credential, treating caller as anonymous");
        }
        identity
    }
}

impl UserDirectory for TokenDirectory {
    fn display_name(&self, username: &str) -> Option<String> {
        self.users.get(username).map(|entry| {
            entry
                .display_name
                .clone()
                .unwrap_or_else(|| entry.identity.username.clone())
        })
    }
}
