//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`.

use chrono::{DateTime, Utc};
use log::warn;

use super::context::AppContext;
use super::error::{ApiError, store_failure};
use super::types::{
    AssetAccessData, AssetDeleteData, AssetsData, AuditData, CreateAssetRequest,
    CreateInspectionRequest, EventsData, HealthData, InspectionCreateData, InspectionsData,
};
use crate::core::models::{
    AssetRef, AuditAction, AuditEntry, Identity, Inspection, InspectionId, InspectionType,
    RequestOrigin,
};
use crate::core::services::{self, FleetSummary, InspectionDraft, WeeklyStats, stats_window};

// =============================================================================
// AUTH HELPERS
// =============================================================================

fn require_caller(ctx: &AppContext, credential: Option<&str>) -> Result<Identity, ApiError> {
    ctx.caller(credential)
        .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))
}

fn require_admin(ctx: &AppContext, credential: Option<&str>) -> Result<Identity, ApiError> {
    let caller = require_caller(ctx, credential)?;
    if caller.is_admin() {
        Ok(caller)
    } else {
        Err(ApiError::forbidden("Admin privileges required"))
    }
}

/// Append to the audit trail; a failed write is logged, never surfaced
fn audit(
    ctx: &AppContext,
    actor: &Identity,
    action: AuditAction,
    details: String,
    origin: &RequestOrigin,
) {
    let entry = AuditEntry::new(actor, action, details, origin, ctx.clock.now());
    if let Err(e) = ctx.audit.record(&entry) {
        warn!("failed to write audit entry ({action} by {}): {e:#}", actor.username);
    }
}

fn parse_ref(raw: &str) -> Result<AssetRef, ApiError> {
    if raw.trim().is_empty() {
        return Err(ApiError::bad_request("Missing asset reference"));
    }
    Ok(AssetRef::parse(raw))
}

// =============================================================================
// STATUS
// =============================================================================

/// Liveness check
#[must_use]
pub fn health() -> HealthData {
    HealthData {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    }
}

/// Change counter for dashboard polling
#[must_use]
pub fn get_events(ctx: &AppContext, since: Option<u64>) -> EventsData {
    let counter = ctx.feed.revision();
    EventsData {
        changed: since != Some(counter),
        counter,
    }
}

// =============================================================================
// ASSETS
// =============================================================================

/// List active assets
pub fn list_assets(ctx: &AppContext) -> Result<AssetsData, ApiError> {
    let assets = services::list_assets(ctx.assets.as_ref())?;
    Ok(AssetsData { assets })
}

/// Register an asset (admin only)
pub fn create_asset(
    ctx: &AppContext,
    credential: Option<&str>,
    origin: &RequestOrigin,
    req: &CreateAssetRequest,
) -> Result<AssetAccessData, ApiError> {
    let caller = require_admin(ctx, credential)?;
    let now = ctx.clock.now();
    let asset = services::create_asset(ctx.assets.as_ref(), req.into(), now)?;
    audit(
        ctx,
        &caller,
        AuditAction::AssetCreated,
        asset.serial_number.clone(),
        origin,
    );
    let view = ctx
        .resolver()
        .resolve_access(&AssetRef::Id(asset.id), Some(&caller), now)?;
    Ok(view.into())
}

/// Scan an asset: its details plus the caller's access mode
///
/// Bad credentials never fail this call; they make the caller anonymous.
pub fn get_asset(
    ctx: &AppContext,
    raw_ref: &str,
    credential: Option<&str>,
) -> Result<AssetAccessData, ApiError> {
    let asset_ref = parse_ref(raw_ref)?;
    let caller = ctx.caller(credential);
    let view = ctx
        .resolver()
        .resolve_access(&asset_ref, caller.as_ref(), ctx.clock.now())?;
    Ok(view.into())
}

/// Retire an asset (admin only)
pub fn delete_asset(
    ctx: &AppContext,
    raw_ref: &str,
    credential: Option<&str>,
    origin: &RequestOrigin,
) -> Result<AssetDeleteData, ApiError> {
    let caller = require_admin(ctx, credential)?;
    let asset = services::deactivate_asset(ctx.assets.as_ref(), &parse_ref(raw_ref)?)?;
    audit(
        ctx,
        &caller,
        AuditAction::AssetRetired,
        asset.serial_number.clone(),
        origin,
    );
    Ok(AssetDeleteData {
        id: asset.id,
        deleted: true,
    })
}

// =============================================================================
// INSPECTIONS
// =============================================================================

/// Inspection history of an active asset, most recent first
pub fn list_inspections(ctx: &AppContext, raw_ref: &str) -> Result<InspectionsData, ApiError> {
    let asset = ctx
        .assets
        .lookup(&parse_ref(raw_ref)?)
        .map_err(|e| store_failure(&e))?
        .filter(|a| a.active)
        .ok_or_else(|| ApiError::not_found("Extinguisher not found"))?;
    let inspections = ctx
        .inspections
        .history(asset.id)
        .map_err(|e| store_failure(&e))?;
    Ok(InspectionsData {
        asset_id: asset.id,
        inspections,
    })
}

/// One inspection by ID
pub fn get_inspection(ctx: &AppContext, raw_id: &str) -> Result<Inspection, ApiError> {
    let id: InspectionId = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid inspection ID"))?;
    ctx.inspections
        .inspection(id)
        .map_err(|e| store_failure(&e))?
        .ok_or_else(|| ApiError::not_found("Inspection not found"))
}

/// Record an inspection (any authenticated caller)
pub fn create_inspection(
    ctx: &AppContext,
    credential: Option<&str>,
    origin: &RequestOrigin,
    req: &CreateInspectionRequest,
) -> Result<InspectionCreateData, ApiError> {
    let caller = require_caller(ctx, credential)?;
    let inspection_type: InspectionType = req
        .inspection_type
        .parse()
        .map_err(ApiError::bad_request)?;
    let draft = InspectionDraft {
        asset: parse_ref(&req.asset)?,
        inspection_type,
        details: req.details.clone(),
    };

    let inspection = services::record_inspection(
        ctx.assets.as_ref(),
        ctx.inspections.as_ref(),
        ctx.policy,
        &caller,
        draft,
        ctx.clock.now(),
    )?;
    audit(
        ctx,
        &caller,
        AuditAction::InspectionRecorded,
        format!("{} on asset {}", inspection.id, inspection.asset_id),
        origin,
    );
    Ok(InspectionCreateData {
        id: inspection.id,
        asset_id: inspection.asset_id,
        inspection_date: inspection.inspection_date,
        locked_until: ctx.policy.locked_until(inspection.inspection_date),
    })
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Inspection counts for the last seven days
pub fn get_stats(ctx: &AppContext) -> Result<WeeklyStats, ApiError> {
    let now = ctx.clock.now();
    let (previous_start, current_start) = stats_window(now);
    let store_error = |e: anyhow::Error| store_failure(&e);

    let current = ctx
        .inspections
        .recorded_between(current_start, DateTime::<Utc>::MAX_UTC)
        .map_err(store_error)?;
    let previous = ctx
        .inspections
        .recorded_between(previous_start, current_start)
        .map_err(store_error)?;
    Ok(services::weekly_stats(&current, previous.len(), now))
}

/// Fleet-wide status counts
pub fn get_summary(ctx: &AppContext) -> Result<FleetSummary, ApiError> {
    let assets = ctx
        .assets
        .list_active()
        .map_err(|e| store_failure(&e))?;
    Ok(services::fleet_summary(&assets, ctx.clock.now().date_naive()))
}

// =============================================================================
// AUDIT
// =============================================================================

/// Entries returned by [`list_audit`] when no limit is given
pub const DEFAULT_AUDIT_LIMIT: usize = 50;

/// Recent audit entries, newest first (admin only)
pub fn list_audit(
    ctx: &AppContext,
    credential: Option<&str>,
    limit: Option<usize>,
) -> Result<AuditData, ApiError> {
    require_admin(ctx, credential)?;
    let entries = ctx
        .audit
        .recent(limit.unwrap_or(DEFAULT_AUDIT_LIMIT))
        .map_err(|e| store_failure(&e))?;
    Ok(AuditData { entries })
}
