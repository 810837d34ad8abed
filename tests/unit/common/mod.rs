//! Shared test fixtures and helpers
//!
//! This module provides common utilities for testing firewatch components.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use firewatch::adapters::{RecordStore, TokenDirectory};
use firewatch::api::AppContext;
use firewatch::core::models::{
    Asset, AssetId, AssetRef, Identity, Inspection, InspectionDetails, InspectionId,
    InspectionType, LockPolicy, NewAsset, NewInspection, Role,
};
use firewatch::core::ports::{FixedClock, InspectionStore};
use firewatch::core::services::{self, InspectionDraft};

pub const INSPECTOR_TOKEN: &str = "tok-alice";
pub const SECOND_INSPECTOR_TOKEN: &str = "tok-bob";
pub const ADMIN_TOKEN: &str = "tok-root";
pub const AUDITOR_TOKEN: &str = "tok-carol";

/// A fixed reference instant (Monday 2024-06-10 09:00 UTC)
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub fn hours(n: i64) -> TimeDelta {
    TimeDelta::hours(n)
}

pub fn alice() -> Identity {
    Identity::new("alice", Role::Inspector)
}

pub fn bob() -> Identity {
    Identity::new("bob", Role::Inspector)
}

pub fn directory() -> TokenDirectory {
    let mut dir = TokenDirectory::new()
        .with_user("alice", Role::Inspector, INSPECTOR_TOKEN)
        .with_user("bob", Role::Inspector, SECOND_INSPECTOR_TOKEN)
        .with_user("carol", Role::Auditor, AUDITOR_TOKEN);
    dir.add_user("root", Role::Admin, ADMIN_TOKEN, Some("Site Admin".to_string()));
    dir
}

pub fn new_asset(serial: &str) -> NewAsset {
    NewAsset {
        serial_number: serial.to_string(),
        kind: "CO2".to_string(),
        capacity: "4kg".to_string(),
        year_of_manufacture: Some(2021),
        make: Some("Ceasefire".to_string()),
        location: "Block A, Floor 2".to_string(),
    }
}

/// A store plus directory with helpers for seeding records
pub struct Fixture {
    pub store: Arc<RecordStore>,
    pub directory: Arc<TokenDirectory>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RecordStore::in_memory()),
            directory: Arc::new(directory()),
        }
    }

    /// Register an asset at [`t0`] minus a week
    pub fn register(&self, serial: &str) -> Asset {
        services::create_asset(self.store.as_ref(), new_asset(serial), t0() - TimeDelta::days(7))
            .expect("register asset")
    }

    /// Record an inspection through the recorder at `at`
    pub fn inspect(&self, asset: &Asset, by: &Identity, at: DateTime<Utc>) -> Inspection {
        self.inspect_with(asset, by, at, InspectionType::Quarterly, InspectionDetails::default())
    }

    pub fn inspect_with(
        &self,
        asset: &Asset,
        by: &Identity,
        at: DateTime<Utc>,
        inspection_type: InspectionType,
        details: InspectionDetails,
    ) -> Inspection {
        services::record_inspection(
            self.store.as_ref(),
            self.store.as_ref(),
            LockPolicy::default(),
            by,
            InspectionDraft {
                asset: AssetRef::Id(asset.id),
                inspection_type,
                details,
            },
            at,
        )
        .expect("record inspection")
    }

    /// Append an inspection directly, bypassing the lock
    pub fn append_raw(
        &self,
        asset_id: AssetId,
        inspector: Option<&str>,
        at: DateTime<Utc>,
        details: InspectionDetails,
    ) -> Inspection {
        let update = firewatch::core::models::AssetUpdate {
            status: details.resulting_status(),
            next_service_due: (at + TimeDelta::days(90)).date_naive(),
            last_inspection_date: at,
            hydro_pressure_tested_on: None,
            next_hydro_pressure_test_due: None,
        };
        let outcome = self
            .store
            .append_unless_locked(
                NewInspection {
                    asset_id,
                    inspector: inspector.map(str::to_string),
                    inspection_type: InspectionType::Quarterly,
                    inspection_date: at,
                    details,
                },
                LockPolicy::from_hours(0),
                &update,
            )
            .expect("append");
        match outcome {
            firewatch::core::ports::AppendOutcome::Appended(inspection) => inspection,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    /// Handler context with the clock pinned to `now`
    pub fn ctx(&self, now: DateTime<Utc>) -> AppContext {
        AppContext::new(self.store.clone(), self.directory.clone(), LockPolicy::default())
            .with_clock(FixedClock(now))
    }
}

/// An inspection store whose every call fails
pub struct BrokenHistory;

impl InspectionStore for BrokenHistory {
    fn inspection(&self, _id: InspectionId) -> anyhow::Result<Option<Inspection>> {
        anyhow::bail!("connection reset")
    }

    fn latest_inspection(&self, _asset_id: AssetId) -> anyhow::Result<Option<Inspection>> {
        anyhow::bail!("connection reset")
    }

    fn history(&self, _asset_id: AssetId) -> anyhow::Result<Vec<Inspection>> {
        anyhow::bail!("connection reset")
    }

    fn recorded_between(
        &self,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Inspection>> {
        anyhow::bail!("connection reset")
    }

    fn append_unless_locked(
        &self,
        _inspection: NewInspection,
        _policy: LockPolicy,
        _update: &firewatch::core::models::AssetUpdate,
    ) -> anyhow::Result<firewatch::core::ports::AppendOutcome> {
        anyhow::bail!("connection reset")
    }
}
