//! Asset repository port
//!
//! Defines the interface for loading and managing assets.

use super::super::models::{Asset, AssetId, AssetRef};

/// Repository for the asset register
///
/// Lookups return retired (inactive) assets too; callers decide how to treat
/// them.
pub trait AssetRepository: Send + Sync {
    /// Get an asset by ID
    fn get(&self, id: AssetId) -> anyhow::Result<Option<Asset>>;

    /// Find an asset by its normalized serial number
    fn find_by_serial(&self, serial: &str) -> anyhow::Result<Option<Asset>>;

    /// List every asset, retired ones included
    fn list(&self) -> anyhow::Result<Vec<Asset>>;

    /// Insert a new asset
    ///
    /// Returns `false` (and stores nothing) when the serial number is taken.
    fn insert(&self, asset: &Asset) -> anyhow::Result<bool>;

    /// Mark an asset as retired
    ///
    /// Returns `false` when no active asset has this ID.
    fn deactivate(&self, id: AssetId) -> anyhow::Result<bool>;

    /// Resolve a client-supplied reference
    fn lookup(&self, asset_ref: &AssetRef) -> anyhow::Result<Option<Asset>> {
        match asset_ref {
            AssetRef::Id(id) => self.get(*id),
            AssetRef::Serial(serial) => self.find_by_serial(serial),
        }
    }

    /// List active assets only
    fn list_active(&self) -> anyhow::Result<Vec<Asset>> {
        Ok(self.list()?.into_iter().filter(|a| a.active).collect())
    }
}
