//! Access mode resolution
//!
//! Decides whether a scanning client may view, edit, or is locked out of an
//! asset. Nothing is persisted: the mode is recomputed on every read, so an
//! asset moves from `LOCKED` to `EDIT` purely by time passing.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use thiserror::Error;

use crate::core::models::{AccessMode, AccessView, AssetRef, Identity, Inspection, LockPolicy};
use crate::core::ports::{AssetRepository, InspectionStore, UserDirectory};

/// Placeholder when an asset has never been inspected
pub const NO_INSPECTOR: &str = "N/A";
/// Placeholder when the inspection carries no inspector reference
pub const LEGACY_INSPECTOR: &str = "System/Legacy";
/// Placeholder when the inspector reference no longer resolves
pub const UNKNOWN_INSPECTOR: &str = "Unknown User";

/// Errors from access resolution
#[derive(Debug, Error)]
pub enum AccessError {
    /// The asset does not exist or has been retired
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset register itself could not be read
    #[error("asset store unavailable: {0}")]
    Store(#[source] anyhow::Error),
}

/// Decide the access mode from its three inputs
///
/// Anonymous callers always get `View`, lock or no lock. Authenticated
/// callers get `Locked` while the latest inspection is inside the lock
/// window and `Edit` otherwise.
#[must_use]
pub fn decide_mode(
    authenticated: bool,
    last_inspection_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    policy: LockPolicy,
) -> AccessMode {
    if !authenticated {
        return AccessMode::View;
    }
    match last_inspection_at {
        Some(at) if policy.is_locked(at, now) => AccessMode::Locked,
        _ => AccessMode::Edit,
    }
}

/// Resolves [`AccessView`]s against injected collaborators
#[derive(Clone, Copy)]
pub struct AccessResolver<'a> {
    assets: &'a dyn AssetRepository,
    inspections: &'a dyn InspectionStore,
    users: &'a dyn UserDirectory,
    policy: LockPolicy,
}

impl std::fmt::Debug for AccessResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<'a> AccessResolver<'a> {
    /// Create a resolver
    #[must_use]
    pub fn new(
        assets: &'a dyn AssetRepository,
        inspections: &'a dyn InspectionStore,
        users: &'a dyn UserDirectory,
        policy: LockPolicy,
    ) -> Self {
        Self {
            assets,
            inspections,
            users,
            policy,
        }
    }

    /// Resolve the view of one asset for one caller at `now`
    pub fn resolve_access(
        &self,
        asset_ref: &AssetRef,
        caller: Option<&Identity>,
        now: DateTime<Utc>,
    ) -> Result<AccessView, AccessError> {
        let asset = self
            .assets
            .lookup(asset_ref)
            .map_err(AccessError::Store)?
            .filter(|a| a.active)
            .ok_or_else(|| AccessError::NotFound(asset_ref.to_string()))?;

        let (latest, history_degraded) = match self.inspections.latest_inspection(asset.id) {
            Ok(latest) => (latest, false),
            Err(e) => {
                warn!(
                    "inspection history unavailable for asset {}, treating as empty: {e:#}",
                    asset.id
                );
                (None, true)
            },
        };

        let last_inspection_at = latest.as_ref().map(|i| i.inspection_date);
        let mode = decide_mode(caller.is_some(), last_inspection_at, now, self.policy);
        debug!(
            "asset {} resolved to {mode} (caller: {})",
            asset.id,
            caller.map_or("anonymous", |c| c.username.as_str())
        );

        let locked_until = match (mode, last_inspection_at) {
            (AccessMode::Locked, Some(at)) => Some(self.policy.locked_until(at)),
            _ => None,
        };
        let next_service_due = latest
            .as_ref()
            .and_then(|i| i.details.due_for_refilling)
            .or(asset.next_service_due);

        Ok(AccessView {
            mode,
            last_inspection_at,
            last_inspector: self.inspector_name(latest.as_ref()),
            next_service_due,
            last_inspection_status: asset.status,
            locked_until,
            history_degraded,
            asset,
        })
    }

    fn inspector_name(&self, latest: Option<&Inspection>) -> String {
        let Some(inspection) = latest else {
            return NO_INSPECTOR.to_string();
        };
        match &inspection.inspector {
            None => LEGACY_INSPECTOR.to_string(),
            Some(username) => self
                .users
                .display_name(username)
                .unwrap_or_else(|| UNKNOWN_INSPECTOR.to_string()),
        }
    }
}
