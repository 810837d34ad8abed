//! Inspection model
//!
//! Inspections are append-only. Once recorded, an inspection's timestamp and
//! findings never change.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::asset::{AssetId, AssetStatus};

/// Unique inspection identifier
pub type InspectionId = Uuid;

/// Observation or remark text that marks a unit as unusable
const NON_OPERATIONAL: &str = "non-operational";

/// Periodic inspection category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InspectionType {
    /// Monthly visual check
    Monthly,
    /// Quarterly maintenance check
    #[default]
    Quarterly,
    /// Annual service
    Annual,
}

impl InspectionType {
    /// How long until the next service is due after an inspection of this type
    #[must_use]
    pub fn service_interval(self) -> TimeDelta {
        match self {
            Self::Annual => TimeDelta::days(365),
            Self::Monthly | Self::Quarterly => TimeDelta::days(90),
        }
    }
}

impl std::fmt::Display for InspectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Annual => write!(f, "Annual"),
        }
    }
}

impl std::str::FromStr for InspectionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "annual" | "yearly" => Ok(Self::Annual),
            _ => Err(format!(
                "Invalid inspection type: {s}. Use: monthly, quarterly, annual"
            )),
        }
    }
}

/// Findings and evidence captured during an inspection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionDetails {
    /// Overall observation ("Ok", "Non-Operational", ...)
    #[serde(default)]
    pub observation: Option<String>,
    /// Free-form remarks
    #[serde(default)]
    pub remarks: Option<String>,
    /// Date of the last pressure test
    #[serde(default)]
    pub pressure_tested_on: Option<NaiveDate>,
    /// Date the unit was discharged
    #[serde(default)]
    pub date_of_discharge: Option<NaiveDate>,
    /// Date the unit was refilled
    #[serde(default)]
    pub refilled_on: Option<NaiveDate>,
    /// Date the unit is due for refilling
    #[serde(default)]
    pub due_for_refilling: Option<NaiveDate>,
    /// Date of the hydrostatic pressure test
    #[serde(default)]
    pub hydro_pressure_tested_on: Option<NaiveDate>,
    /// Date the next hydrostatic pressure test is due
    #[serde(default)]
    pub next_hydro_pressure_test_due: Option<NaiveDate>,
    /// Reference to the inspection photo in blob storage
    #[serde(default)]
    pub photo_path: Option<String>,
    /// Reference to the inspector's signature in blob storage
    #[serde(default)]
    pub signature_path: Option<String>,
    /// Scanning device identifier
    #[serde(default)]
    pub device_id: Option<String>,
}

impl InspectionDetails {
    /// Whether the observation or remarks mark the unit as unusable
    #[must_use]
    pub fn reports_non_operational(&self) -> bool {
        [&self.observation, &self.remarks]
            .into_iter()
            .flatten()
            .any(|text| text.trim().eq_ignore_ascii_case(NON_OPERATIONAL))
    }

    /// Status label an asset takes after an inspection with these findings
    #[must_use]
    pub fn resulting_status(&self) -> AssetStatus {
        if self.reports_non_operational() {
            AssetStatus::NonOperational
        } else {
            AssetStatus::Operational
        }
    }
}

/// A recorded inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inspection {
    /// Inspection ID
    pub id: InspectionId,
    /// Insertion sequence assigned by the store; breaks timestamp ties
    pub sequence: u64,
    /// Inspected asset
    pub asset_id: AssetId,
    /// Username of the inspector (absent for legacy imports)
    #[serde(default)]
    pub inspector: Option<String>,
    /// Inspection category
    #[serde(default)]
    pub inspection_type: InspectionType,
    /// When the inspection was recorded
    pub inspection_date: DateTime<Utc>,
    /// Findings
    #[serde(flatten)]
    pub details: InspectionDetails,
}

impl Inspection {
    /// Build a recorded inspection from a pending one
    #[must_use]
    pub fn from_new(new: NewInspection, sequence: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            sequence,
            asset_id: new.asset_id,
            inspector: new.inspector,
            inspection_type: new.inspection_type,
            inspection_date: new.inspection_date,
            details: new.details,
        }
    }

    /// Total order for "most recent": timestamp first, then insertion sequence
    #[must_use]
    pub const fn recency_key(&self) -> (DateTime<Utc>, u64) {
        (self.inspection_date, self.sequence)
    }
}

/// An inspection that has not been assigned an ID or sequence yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInspection {
    /// Inspected asset
    pub asset_id: AssetId,
    /// Inspector username
    pub inspector: Option<String>,
    /// Inspection category
    pub inspection_type: InspectionType,
    /// Inspection timestamp
    pub inspection_date: DateTime<Utc>,
    /// Findings
    pub details: InspectionDetails,
}
