//! Business logic services
//!
//! Orchestration over the port traits; no service touches I/O directly.
//!
//! - [`access`] - Resolve VIEW / EDIT / LOCKED for a caller
//! - [`recorder`] - Record inspections under the lock window
//! - [`assets`] - Asset register management
//! - [`stats`] - Dashboard aggregates

pub mod access;
pub mod assets;
pub mod recorder;
pub mod stats;

pub use access::{AccessError, AccessResolver, decide_mode};
pub use assets::{AssetError, create_asset, deactivate_asset, list_assets};
pub use recorder::{InspectionDraft, RecordError, record_inspection};
pub use stats::{FleetSummary, Trend, WeeklyStats, fleet_summary, stats_window, weekly_stats};
