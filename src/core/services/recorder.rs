//! Inspection recording
//!
//! The resolver only reports the lock; this is where it is enforced. The
//! lock check is repeated inside the store's write step, so a caller who saw
//! `EDIT` a moment ago can still be turned away.

use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::core::models::{
    AssetRef, AssetUpdate, Identity, Inspection, InspectionDetails, InspectionType, LockPolicy,
    NewInspection,
};
use crate::core::ports::{AppendOutcome, AssetRepository, InspectionStore};

/// Errors from recording an inspection
#[derive(Debug, Error)]
pub enum RecordError {
    /// The asset does not exist or has been retired
    #[error("asset not found: {0}")]
    NotFound(String),

    /// The asset was inspected too recently
    #[error("asset {asset} is locked until {until}")]
    Locked {
        /// The asset reference as supplied
        asset: String,
        /// When the lock lifts
        until: DateTime<Utc>,
    },

    /// The underlying store failed
    #[error("inspection store unavailable: {0}")]
    Store(#[source] anyhow::Error),
}

/// An inspection as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionDraft {
    /// Which asset was inspected
    pub asset: AssetRef,
    /// Inspection category
    pub inspection_type: InspectionType,
    /// Findings
    pub details: InspectionDetails,
}

/// Record an inspection on behalf of `inspector` at `now`
pub fn record_inspection(
    assets: &dyn AssetRepository,
    inspections: &dyn InspectionStore,
    policy: LockPolicy,
    inspector: &Identity,
    draft: InspectionDraft,
    now: DateTime<Utc>,
) -> Result<Inspection, RecordError> {
    let not_found = || RecordError::NotFound(draft.asset.to_string());

    let asset = assets
        .lookup(&draft.asset)
        .map_err(RecordError::Store)?
        .filter(|a| a.active)
        .ok_or_else(not_found)?;

    let update = AssetUpdate {
        status: draft.details.resulting_status(),
        next_service_due: (now + draft.inspection_type.service_interval()).date_naive(),
        last_inspection_date: now,
        hydro_pressure_tested_on: draft.details.hydro_pressure_tested_on,
        next_hydro_pressure_test_due: draft.details.next_hydro_pressure_test_due,
    };
    let new = NewInspection {
        asset_id: asset.id,
        inspector: Some(inspector.username.clone()),
        inspection_type: draft.inspection_type,
        inspection_date: now,
        details: draft.details.clone(),
    };

    match inspections
        .append_unless_locked(new, policy, &update)
        .map_err(RecordError::Store)?
    {
        AppendOutcome::Appended(inspection) => {
            info!(
                "{} recorded {} inspection {} on asset {} ({})",
                inspector.username,
                inspection.inspection_type,
                inspection.id,
                asset.serial_number,
                update.status
            );
            Ok(inspection)
        },
        AppendOutcome::Locked { last } => Err(RecordError::Locked {
            asset: draft.asset.to_string(),
            until: policy.locked_until(last.inspection_date),
        }),
        AppendOutcome::AssetMissing => Err(not_found()),
    }
}
