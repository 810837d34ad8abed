//! Domain models for firewatch
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Asset`] - A tracked fire extinguisher
//! - [`Inspection`] - A timestamped compliance check against an asset
//! - [`Identity`] - An authenticated caller
//! - [`AccessMode`] - What a caller may do with an asset right now
//! - [`AuditEntry`] - Who changed what, and from where

mod access;
mod asset;
mod audit;
mod identity;
mod inspection;

pub use access::{AccessMode, AccessView, DEFAULT_LOCK_HOURS, LockPolicy};
pub use asset::{
    Asset, AssetId, AssetRef, AssetStatus, AssetUpdate, NewAsset, normalize_serial,
};
pub use audit::{AuditAction, AuditEntry, RequestOrigin};
pub use identity::{Identity, Role};
pub use inspection::{
    Inspection, InspectionDetails, InspectionId, InspectionType, NewInspection,
};
