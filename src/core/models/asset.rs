//! Asset (fire extinguisher) model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique asset identifier
pub type AssetId = Uuid;

/// Compliance status label stored on an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetStatus {
    /// Registered but never inspected
    #[default]
    #[serde(rename = "Pending Inspection")]
    PendingInspection,
    /// Last inspection found the unit serviceable
    Operational,
    /// Last inspection flagged the unit as unusable
    #[serde(rename = "Non-Operational")]
    NonOperational,
}

impl AssetStatus {
    /// Human-readable label, as shown on scan pages and reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingInspection => "Pending Inspection",
            Self::Operational => "Operational",
            Self::NonOperational => "Non-Operational",
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AssetStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pending" | "pendinginspection" => Ok(Self::PendingInspection),
            "operational" | "ok" => Ok(Self::Operational),
            "nonoperational" => Ok(Self::NonOperational),
            _ => Err(format!(
                "Invalid status: {s}. Use: Pending Inspection, Operational, Non-Operational"
            )),
        }
    }
}

/// A tracked fire extinguisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset ID (encoded in the QR code)
    pub id: AssetId,
    /// Serial number, stored normalized (see [`normalize_serial`])
    pub serial_number: String,
    /// Extinguishing agent (CO2, ABC, Water, ...)
    pub kind: String,
    /// Rated capacity (2kg, 9L, ...)
    pub capacity: String,
    /// Year of manufacture, when known
    #[serde(default)]
    pub year_of_manufacture: Option<i32>,
    /// Manufacturer, when known
    #[serde(default)]
    pub make: Option<String>,
    /// Where the unit is mounted
    pub location: String,
    /// Status label set by the latest inspection
    #[serde(default)]
    pub status: AssetStatus,
    /// Date the next service is due
    #[serde(default)]
    pub next_service_due: Option<NaiveDate>,
    /// When the unit was last inspected
    #[serde(default)]
    pub last_inspection_date: Option<DateTime<Utc>>,
    /// Date of the last hydrostatic pressure test
    #[serde(default)]
    pub hydro_pressure_tested_on: Option<NaiveDate>,
    /// Date the next hydrostatic pressure test is due
    #[serde(default)]
    pub next_hydro_pressure_test_due: Option<NaiveDate>,
    /// False once the asset has been retired
    #[serde(default = "default_active")]
    pub active: bool,
    /// When the asset was registered
    pub created_at: DateTime<Utc>,
}

const fn default_active() -> bool {
    true
}

/// Attributes supplied when registering an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Serial number
    pub serial_number: String,
    /// Extinguishing agent
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

impl Asset {
    /// Register a new asset, pending its first inspection
    #[must_use]
    pub fn register(new: NewAsset, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            serial_number: normalize_serial(&new.serial_number),
            kind: new.kind,
            capacity: new.capacity,
            year_of_manufacture: new.year_of_manufacture,
            make: new.make,
            location: new.location,
            status: AssetStatus::PendingInspection,
            next_service_due: None,
            last_inspection_date: None,
            hydro_pressure_tested_on: None,
            next_hydro_pressure_test_due: None,
            active: true,
            created_at: now,
        }
    }

    /// Whether the next service date has passed as of `today`
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.next_service_due.is_some_and(|due| due < today)
    }
}

/// Changes applied to an asset when an inspection is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetUpdate {
    /// New status label
    pub status: AssetStatus,
    /// New service due date
    pub next_service_due: NaiveDate,
    /// Timestamp of the inspection being recorded
    pub last_inspection_date: DateTime<Utc>,
    /// Hydro test date, if the inspection reported one
    pub hydro_pressure_tested_on: Option<NaiveDate>,
    /// Next hydro test due date, if the inspection reported one
    pub next_hydro_pressure_test_due: Option<NaiveDate>,
}

impl AssetUpdate {
    /// Apply the update in place
    pub fn apply(&self, asset: &mut Asset) {
        asset.status = self.status;
        asset.next_service_due = Some(self.next_service_due);
        asset.last_inspection_date = Some(self.last_inspection_date);
        if let Some(date) = self.hydro_pressure_tested_on {
            asset.hydro_pressure_tested_on = Some(date);
        }
        if let Some(date) = self.next_hydro_pressure_test_due {
            asset.next_hydro_pressure_test_due = Some(date);
        }
    }
}

/// Normalize a serial number for storage and lookup
///
/// Scanned or typed serials arrive with stray whitespace and mixed case.
#[must_use]
pub fn normalize_serial(serial: &str) -> String {
    serial.trim().to_uppercase()
}

/// A reference to an asset as supplied by a client
///
/// QR codes carry the UUID; hand-typed lookups use the serial number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    /// By asset ID
    Id(AssetId),
    /// By serial number (normalized)
    Serial(String),
}

impl AssetRef {
    /// Interpret a raw reference: a UUID if it parses as one, otherwise a serial
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Uuid::parse_str(raw).map_or_else(|_| Self::Serial(normalize_serial(raw)), Self::Id)
    }
}

impl From<AssetId> for AssetRef {
    fn from(id: AssetId) -> Self {
        Self::Id(id)
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Serial(serial) => write!(f, "{serial}"),
        }
    }
}
