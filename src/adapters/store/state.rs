//! Serializable store contents and the operations on them
//!
//! Everything here runs with the store mutex held.

use serde::{Deserialize, Serialize};

use crate::core::models::{
    Asset, AssetId, AssetUpdate, AuditEntry, Inspection, InspectionId, LockPolicy, NewInspection,
};
use crate::core::ports::AppendOutcome;

/// On-disk layout of the JSON store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    /// Store format version
    #[serde(default = "current_version")]
    pub version: u32,
    /// Asset register
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Inspection history, in insertion order
    #[serde(default)]
    pub inspections: Vec<Inspection>,
    /// Audit trail, oldest first
    #[serde(default)]
    pub audit: Vec<AuditEntry>,
    /// Next inspection sequence number
    #[serde(default)]
    pub next_sequence: u64,
    /// Bumped on every write
    #[serde(default)]
    pub revision: u64,
}

const fn current_version() -> u32 {
    1
}

impl StoreState {
    pub(super) fn asset(&self, id: AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub(super) fn asset_by_serial(&self, serial: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.serial_number == serial)
    }

    pub(super) fn inspection(&self, id: InspectionId) -> Option<&Inspection> {
        self.inspections.iter().find(|i| i.id == id)
    }

    pub(super) fn recent_audit(&self, limit: usize) -> Vec<AuditEntry> {
        self.audit.iter().rev().take(limit).cloned().collect()
    }

    pub(super) fn latest_inspection(&self, asset_id: AssetId) -> Option<&Inspection> {
        self.inspections
            .iter()
            .filter(|i| i.asset_id == asset_id)
            .max_by_key(|i| i.recency_key())
    }

    pub(super) fn history(&self, asset_id: AssetId) -> Vec<Inspection> {
        let mut history: Vec<Inspection> = self
            .inspections
            .iter()
            .filter(|i| i.asset_id == asset_id)
            .cloned()
            .collect();
        history.sort_by_key(|i| std::cmp::Reverse(i.recency_key()));
        history
    }

    /// Insert an asset; `false` if the serial is taken (retired assets included)
    pub(super) fn insert_asset(&mut self, asset: &Asset) -> bool {
        if self.asset_by_serial(&asset.serial_number).is_some() {
            return false;
        }
        self.assets.push(asset.clone());
        true
    }

    pub(super) fn deactivate(&mut self, id: AssetId) -> bool {
        match self.assets.iter_mut().find(|a| a.id == id && a.active) {
            Some(asset) => {
                asset.active = false;
                true
            },
            None => false,
        }
    }

    pub(super) fn append_unless_locked(
        &mut self,
        new: NewInspection,
        policy: LockPolicy,
        update: &AssetUpdate,
    ) -> AppendOutcome {
        if !self.asset(new.asset_id).is_some_and(|a| a.active) {
            return AppendOutcome::AssetMissing;
        }
        if let Some(last) = self
            .latest_inspection(new.asset_id)
            .filter(|last| policy.is_locked(last.inspection_date, new.inspection_date))
        {
            return AppendOutcome::Locked { last: last.clone() };
        }

        let inspection = Inspection::from_new(new, self.next_sequence);
        self.next_sequence += 1;
        if let Some(asset) = self.assets.iter_mut().find(|a| a.id == inspection.asset_id) {
            update.apply(asset);
        }
        self.inspections.push(inspection.clone());
        AppendOutcome::Appended(inspection)
    }
}
