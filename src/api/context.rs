//! Shared handler state
//!
//! Every collaborator a handler needs is carried here and injected at
//! startup; handlers never reach for global state.

use std::sync::Arc;

use crate::adapters::{RecordStore, TokenDirectory};
use crate::core::models::{Identity, LockPolicy};
use crate::core::ports::{
    AssetRepository, AuditLog, ChangeFeed, Clock, IdentityResolver, InspectionStore, SystemClock,
    UserDirectory,
};
use crate::core::services::AccessResolver;

/// Collaborators shared by all API handlers
#[derive(Clone)]
pub struct AppContext {
    /// Asset register
    pub assets: Arc<dyn AssetRepository>,
    /// Inspection history
    pub inspections: Arc<dyn InspectionStore>,
    /// Who-did-what trail
    pub audit: Arc<dyn AuditLog>,
    /// Change counter for dashboards
    pub feed: Arc<dyn ChangeFeed>,
    /// Credential resolution
    pub identities: Arc<dyn IdentityResolver>,
    /// Inspector display names
    pub users: Arc<dyn UserDirectory>,
    /// Source of "now"
    pub clock: Arc<dyn Clock>,
    /// Lock window
    pub policy: LockPolicy,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("policy", &self.policy)
            .field("revision", &self.feed.revision())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Wire a record store and token directory together, using the wall clock
    #[must_use]
    pub fn new(store: Arc<RecordStore>, directory: Arc<TokenDirectory>, policy: LockPolicy) -> Self {
        Self {
            assets: store.clone(),
            inspections: store.clone(),
            audit: store.clone(),
            feed: store,
            identities: directory.clone(),
            users: directory,
            clock: Arc::new(SystemClock),
            policy,
        }
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Resolve a raw credential to a caller
    #[must_use]
    pub fn caller(&self, credential: Option<&str>) -> Option<Identity> {
        self.identities.resolve(credential)
    }

    /// An access resolver over this context's collaborators
    #[must_use]
    pub fn resolver(&self) -> AccessResolver<'_> {
        AccessResolver::new(
            self.assets.as_ref(),
            self.inspections.as_ref(),
            self.users.as_ref(),
            self.policy,
        )
    }
}
