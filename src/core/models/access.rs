//! Access modes and the inspection lock window

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::asset::{Asset, AssetStatus};

/// Default lock window after an inspection, in hours
pub const DEFAULT_LOCK_HOURS: u32 = 48;

/// What a caller may do with an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccessMode {
    /// Read-only (public scan)
    View,
    /// May submit a new inspection
    Edit,
    /// Authenticated, but the lock window is still running
    Locked,
}

impl std::fmt::Display for AccessMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::View => write!(f, "VIEW"),
            Self::Edit => write!(f, "EDIT"),
            Self::Locked => write!(f, "LOCKED"),
        }
    }
}

/// The cooldown applied after every inspection
///
/// The lock is asset-wide: it does not matter who performed the last
/// inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    window: TimeDelta,
}

impl LockPolicy {
    /// Lock for the given number of hours (0 disables the lock)
    #[must_use]
    pub fn from_hours(hours: u32) -> Self {
        Self {
            window: TimeDelta::hours(i64::from(hours)),
        }
    }

    /// Length of the lock window
    #[must_use]
    pub const fn window(&self) -> TimeDelta {
        self.window
    }

    /// When a lock started by an inspection at `inspected_at` expires
    #[must_use]
    pub fn locked_until(&self, inspected_at: DateTime<Utc>) -> DateTime<Utc> {
        inspected_at + self.window
    }

    /// Whether an inspection at `inspected_at` still locks the asset at `now`
    ///
    /// An inspection timestamped after `now` (clock skew between writers)
    /// counts as locking.
    #[must_use]
    pub fn is_locked(&self, inspected_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(inspected_at) < self.window
    }
}

impl Default for LockPolicy {
    fn default() -> Self {
        Self::from_hours(DEFAULT_LOCK_HOURS)
    }
}

/// The resolved view of one asset for one caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessView {
    /// Permitted interaction
    pub mode: AccessMode,
    /// The asset itself
    pub asset: Asset,
    /// Timestamp of the latest inspection
    pub last_inspection_at: Option<DateTime<Utc>>,
    /// Display name of the latest inspector, or a placeholder
    pub last_inspector: String,
    /// Next service date (latest inspection's refill date wins)
    pub next_service_due: Option<NaiveDate>,
    /// Stored status label of the asset
    pub last_inspection_status: AssetStatus,
    /// When the lock lifts; only set in [`AccessMode::Locked`]
    pub locked_until: Option<DateTime<Utc>>,
    /// True when inspection history could not be read and was treated as empty
    pub history_degraded: bool,
}
