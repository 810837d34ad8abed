//! Inspection store port
//!
//! Defines the interface for reading inspection history and appending new
//! inspections under the lock window.

use chrono::{DateTime, Utc};

use super::super::models::{
    AssetId, AssetUpdate, Inspection, InspectionId, LockPolicy, NewInspection,
};

/// Result of a guarded append
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The inspection was stored and the asset updated
    Appended(Inspection),
    /// The latest inspection is still inside the lock window; nothing stored
    Locked {
        /// The inspection holding the lock
        last: Inspection,
    },
    /// The asset vanished (or was retired) before the write
    AssetMissing,
}

/// Append-only inspection history
pub trait InspectionStore: Send + Sync {
    /// One inspection by ID
    fn inspection(&self, id: InspectionId) -> anyhow::Result<Option<Inspection>>;

    /// The most recent inspection of an asset
    ///
    /// Ordered by `inspection_date` descending, then by insertion sequence
    /// descending.
    fn latest_inspection(&self, asset_id: AssetId) -> anyhow::Result<Option<Inspection>>;

    /// Every inspection of an asset, most recent first
    fn history(&self, asset_id: AssetId) -> anyhow::Result<Vec<Inspection>>;

    /// Inspections recorded in `[start, end)`, across all assets
    fn recorded_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Inspection>>;

    /// Append an inspection unless the asset is locked
    ///
    /// Implementations must re-read the latest inspection, check it against
    /// `policy` at `inspection.inspection_date`, store the inspection and
    /// apply `update` to the asset as one atomic step. A read-then-write
    /// split here would let two writers land inside the same lock window.
    fn append_unless_locked(
        &self,
        inspection: NewInspection,
        policy: LockPolicy,
        update: &AssetUpdate,
    ) -> anyhow::Result<AppendOutcome>;
}

/// Monotonic change counter for polling dashboards
pub trait ChangeFeed: Send + Sync {
    /// Current revision; bumped on every successful write
    fn revision(&self) -> u64;
}
