//! Audit trail entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::identity::{Identity, Role};

/// Something a caller changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// An asset was registered
    AssetCreated,
    /// An asset was retired
    AssetRetired,
    /// An inspection was recorded
    InspectionRecorded,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssetCreated => write!(f, "asset_created"),
            Self::AssetRetired => write!(f, "asset_retired"),
            Self::InspectionRecorded => write!(f, "inspection_recorded"),
        }
    }
}

/// Where a request came from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    /// Client address
    pub ip_address: Option<String>,
    /// User agent or device description
    pub device_info: Option<String>,
}

/// One audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Entry ID
    pub id: Uuid,
    /// Who acted
    pub username: String,
    /// Their role at the time
    pub role: Role,
    /// What they did
    pub action: AuditAction,
    /// Free-form detail (serial number, inspection ID, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Client address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// User agent or device description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
    /// When it happened
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Record `actor` performing `action` at `now`
    #[must_use]
    pub fn new(
        actor: &Identity,
        action: AuditAction,
        details: impl Into<String>,
        origin: &RequestOrigin,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: actor.username.clone(),
            role: actor.role,
            action,
            details: Some(details.into()),
            ip_address: origin.ip_address.clone(),
            device_info: origin.device_info.clone(),
            timestamp: now,
        }
    }
}
