//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiErrorData;
use crate::core::models::{
    AccessMode, AccessView, Asset, AssetId, AssetStatus, AuditEntry, Inspection,
    InspectionDetails, InspectionId, NewAsset,
};

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for registering an asset
#[derive(Debug, Deserialize)]
pub struct CreateAssetRequest {
    /// Serial number
    #[serde(alias = "sl_no")]
    pub serial_number: String,
    /// Extinguishing agent
    #[serde(alias = "type")]
    pub kind: String,
    /// Rated capacity
    pub capacity: String,
    /// Year of manufacture
    #[serde(default)]
    pub year_of_manufacture: Option<i32>,
    /// Manufacturer
    #[serde(default)]
    pub make: Option<String>,
    /// Mount location
    pub location: String,
}

impl From<&CreateAssetRequest> for NewAsset {
    fn from(req: &CreateAssetRequest) -> Self {
        Self {
            serial_number: req.serial_number.clone(),
            kind: req.kind.clone(),
            capacity: req.capacity.clone(),
            year_of_manufacture: req.year_of_manufacture,
            make: req.make.clone(),
            location: req.location.clone(),
        }
    }
}

/// Request body for recording an inspection
#[derive(Debug, Deserialize)]
pub struct CreateInspectionRequest {
    /// Asset ID or serial number
    #[serde(alias = "extinguisher_id", alias = "asset_id")]
    pub asset: String,
    /// Inspection type (monthly, quarterly, annual)
    #[serde(default = "default_inspection_type")]
    pub inspection_type: String,
    /// Findings
    #[serde(flatten)]
    pub details: InspectionDetails,
}

fn default_inspection_type() -> String {
    "quarterly".to_string()
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Health endpoint response data
#[derive(Debug, Serialize)]
pub struct HealthData {
    /// Always "ok" when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Asset list endpoint response data
#[derive(Debug, Serialize)]
pub struct AssetsData {
    /// Active assets
    pub assets: Vec<Asset>,
}

/// Scan endpoint response: an asset plus the caller's access mode
#[derive(Debug, Serialize)]
pub struct AssetAccessData {
    /// Asset ID
    pub id: AssetId,
    /// Serial number
    pub serial_number: String,
    /// Extinguishing agent
    pub kind: String,
    /// Rated capacity
    pub capacity: String,
    /// Year of manufacture
    pub year_of_manufacture: Option<i32>,
    /// Manufacturer
    pub make: Option<String>,
    /// Mount location
    pub location: String,
    /// Last hydro test
    pub hydro_pressure_tested_on: Option<NaiveDate>,
    /// Next hydro test
    pub next_hydro_pressure_test_due: Option<NaiveDate>,
    /// VIEW, EDIT or LOCKED
    pub mode: AccessMode,
    /// Latest inspection timestamp
    pub last_inspection_at: Option<DateTime<Utc>>,
    /// Latest inspector display name
    pub last_inspector: String,
    /// Next service date
    pub next_service_due: Option<NaiveDate>,
    /// Status label
    pub last_inspection_status: AssetStatus,
    /// When the lock lifts (LOCKED only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_until: Option<DateTime<Utc>>,
    /// Inspection history could not be read
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub history_degraded: bool,
}

impl From<AccessView> for AssetAccessData {
    fn from(view: AccessView) -> Self {
        let asset = view.asset;
        Self {
            id: asset.id,
            serial_number: asset.serial_number,
            kind: asset.kind,
            capacity: asset.capacity,
            year_of_manufacture: asset.year_of_manufacture,
            make: asset.make,
            location: asset.location,
            hydro_pressure_tested_on: asset.hydro_pressure_tested_on,
            next_hydro_pressure_test_due: asset.next_hydro_pressure_test_due,
            mode: view.mode,
            last_inspection_at: view.last_inspection_at,
            last_inspector: view.last_inspector,
            next_service_due: view.next_service_due,
            last_inspection_status: view.last_inspection_status,
            locked_until: view.locked_until,
            history_degraded: view.history_degraded,
        }
    }
}

/// Asset retirement response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AssetDeleteData {
    /// Retired asset ID
    pub id: AssetId,
    /// Always true
    pub deleted: bool,
}

/// Inspection history response
#[derive(Debug, Serialize)]
pub struct InspectionsData {
    /// Asset the history belongs to
    pub asset_id: AssetId,
    /// Inspections, most recent first
    pub inspections: Vec<Inspection>,
}

/// Inspection creation response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InspectionCreateData {
    /// Created inspection ID
    pub id: InspectionId,
    /// Inspected asset
    pub asset_id: AssetId,
    /// Recorded timestamp
    pub inspection_date: DateTime<Utc>,
    /// When the asset unlocks again
    pub locked_until: DateTime<Utc>,
}

/// Long-polling events response
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EventsData {
    /// Whether data has changed since last poll
    pub changed: bool,
    /// Current change counter
    pub counter: u64,
}

/// Audit trail response
#[derive(Debug, Serialize)]
pub struct AuditData {
    /// Entries, newest first
    pub entries: Vec<AuditEntry>,
}
