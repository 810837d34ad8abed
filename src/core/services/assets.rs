//! Asset register management

use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::core::models::{Asset, AssetRef, NewAsset};
use crate::core::ports::AssetRepository;

/// Errors from asset register operations
#[derive(Debug, Error)]
pub enum AssetError {
    /// Another asset already carries this serial number
    #[error("serial number already exists: {0}")]
    DuplicateSerial(String),

    /// Required attribute missing
    #[error("invalid asset: {0}")]
    Invalid(String),

    /// The asset does not exist or has been retired
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The underlying store failed
    #[error("asset store unavailable: {0}")]
    Store(#[source] anyhow::Error),
}

/// Register a new asset
pub fn create_asset(
    repo: &dyn AssetRepository,
    new: NewAsset,
    now: DateTime<Utc>,
) -> Result<Asset, AssetError> {
    for (field, value) in [
        ("serial_number", &new.serial_number),
        ("kind", &new.kind),
        ("capacity", &new.capacity),
        ("location", &new.location),
    ] {
        if value.trim().is_empty() {
            return Err(AssetError::Invalid(format!("{field} must not be empty")));
        }
    }

    let asset = Asset::register(new, now);
    if !repo.insert(&asset).map_err(AssetError::Store)? {
        return Err(AssetError::DuplicateSerial(asset.serial_number));
    }
    info!("registered asset {} ({})", asset.serial_number, asset.id);
    Ok(asset)
}

/// Retire an asset
///
/// Inspection history is kept; the asset simply stops resolving.
pub fn deactivate_asset(repo: &dyn AssetRepository, asset_ref: &AssetRef) -> Result<Asset, AssetError> {
    let not_found = || AssetError::NotFound(asset_ref.to_string());
    let mut asset = repo
        .lookup(asset_ref)
        .map_err(AssetError::Store)?
        .filter(|a| a.active)
        .ok_or_else(not_found)?;

    if !repo.deactivate(asset.id).map_err(AssetError::Store)? {
        return Err(not_found());
    }
    asset.active = false;
    info!("retired asset {} ({})", asset.serial_number, asset.id);
    Ok(asset)
}

/// Active assets ordered by serial number
pub fn list_assets(repo: &dyn AssetRepository) -> Result<Vec<Asset>, AssetError> {
    let mut assets = repo.list_active().map_err(AssetError::Store)?;
    assets.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
    Ok(assets)
}
