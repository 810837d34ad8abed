//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and external systems (storage backends, credential checks, the clock).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. Collaborators are passed in explicitly; there is no
//! process-wide store or connection.

mod asset_repo;
mod audit_log;
mod clock;
mod identity;
mod inspection_store;

pub use asset_repo::AssetRepository;
pub use audit_log::AuditLog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use identity::{IdentityResolver, UserDirectory};
pub use inspection_store::{AppendOutcome, ChangeFeed, InspectionStore};
