//! Tests for API module
//!
//! Tests error types, request/response types, and handler functions.

use crate::common::{
    ADMIN_TOKEN, AUDITOR_TOKEN, Fixture, INSPECTOR_TOKEN, SECOND_INSPECTOR_TOKEN, alice, hours,
    t0,
};

use firewatch::core::models::RequestOrigin;

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

fn origin() -> RequestOrigin {
    RequestOrigin {
        ip_address: Some("10.0.4.21".to_string()),
        device_info: Some("scanner-app/2.3".to_string()),
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

mod error_tests {
    use firewatch::api::{ApiError, ErrorCode};

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ApiError::not_found("x").status_code(), 404);
        assert_eq!(ApiError::bad_request("x").status_code(), 400);
        assert_eq!(ApiError::unauthorized("x").status_code(), 401);
        assert_eq!(ApiError::forbidden("x").status_code(), 403);
        assert_eq!(ApiError::conflict("x").status_code(), 409);
        assert_eq!(ApiError::payload_too_large("x").status_code(), 413);
        assert_eq!(ApiError::locked("x").status_code(), 423);
        assert_eq!(ApiError::internal("x").status_code(), 500);
    }

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::Locked.as_str(), "LOCKED");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::not_found("Extinguisher not found");
        let display = format!("{err}");
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Extinguisher not found"));
    }
}

// =============================================================================
// RESPONSE TYPES
// =============================================================================

mod response_tests {
    use firewatch::api::ApiResponse;

    #[test]
    fn test_api_response_success() {
        let resp: ApiResponse<String> = ApiResponse::success("hello".to_string());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_api_response_error() {
        let resp: ApiResponse<()> = ApiResponse::error("LOCKED", "Inspection locked");
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "LOCKED");
        assert!(json.get("data").is_none());
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

mod request_tests {
    use firewatch::api::{CreateAssetRequest, CreateInspectionRequest};

    #[test]
    fn test_create_asset_request_accepts_legacy_names() {
        let req: CreateAssetRequest = serde_json::from_str(
            r#"{"sl_no":"fe-9","type":"ABC","capacity":"6kg","location":"Lobby"}"#,
        )
        .unwrap();
        assert_eq!(req.serial_number, "fe-9");
        assert_eq!(req.kind, "ABC");
    }

    #[test]
    fn test_create_inspection_request_defaults() {
        let req: CreateInspectionRequest =
            serde_json::from_str(r#"{"extinguisher_id":"FE-1","remarks":"ok"}"#).unwrap();
        assert_eq!(req.asset, "FE-1");
        assert_eq!(req.inspection_type, "quarterly");
        assert_eq!(req.details.remarks.as_deref(), Some("ok"));
    }
}

// =============================================================================
// SCAN HANDLER
// =============================================================================

mod scan_tests {
    use firewatch::api::{self, ErrorCode};
    use firewatch::core::models::{AccessMode, AssetStatus};

    use super::*;

    #[test]
    fn test_scan_modes_by_caller() {
        let fx = Fixture::new();
        let asset = fx.register("FE-001");
        fx.inspect(&asset, &alice(), t0() - hours(10));
        let ctx = fx.ctx(t0());

        let anon = api::get_asset(&ctx, "FE-001", None).unwrap();
        assert_eq!(anon.mode, AccessMode::View);
        assert_eq!(anon.locked_until, None);

        let authed = api::get_asset(&ctx, "fe-001", Some(bearer(INSPECTOR_TOKEN).as_str())).unwrap();
        assert_eq!(authed.mode, AccessMode::Locked);
        assert_eq!(authed.locked_until, Some(t0() + hours(38)));
        assert_eq!(authed.last_inspection_status, AssetStatus::Operational);
    }

    #[test]
    fn test_scan_with_bad_token_is_anonymous() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let ctx = fx.ctx(t0());

        let view = api::get_asset(&ctx, "FE-001", Some("Bearer forged")).unwrap();
        assert_eq!(view.mode, AccessMode::View);

        let view = api::get_asset(&ctx, "FE-001", Some("Basic dXNlcg==")).unwrap();
        assert_eq!(view.mode, AccessMode::View);
    }

    #[test]
    fn test_scan_by_id() {
        let fx = Fixture::new();
        let asset = fx.register("FE-001");
        let ctx = fx.ctx(t0());

        let view = api::get_asset(&ctx, &asset.id.to_string(), Some(INSPECTOR_TOKEN)).unwrap();
        assert_eq!(view.id, asset.id);
        assert_eq!(view.mode, AccessMode::Edit);
    }

    #[test]
    fn test_missing_and_retired_look_the_same() {
        let fx = Fixture::new();
        let retired = fx.register("FE-002");
        let ctx = fx.ctx(t0());
        api::delete_asset(&ctx, "FE-002", Some(bearer(ADMIN_TOKEN).as_str()), &origin()).unwrap();

        let missing = api::get_asset(&ctx, "FE-404", None).unwrap_err();
        let gone = api::get_asset(&ctx, &retired.id.to_string(), None).unwrap_err();

        assert_eq!(missing.code, ErrorCode::NotFound);
        assert_eq!(gone.code, ErrorCode::NotFound);
        assert_eq!(missing.message, gone.message);
    }

    #[test]
    fn test_blank_reference_is_bad_request() {
        let fx = Fixture::new();
        let err = api::get_asset(&fx.ctx(t0()), "  ", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_scan_serializes_mode_uppercase() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let view = api::get_asset(&fx.ctx(t0()), "FE-001", None).unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mode"], "VIEW");
        assert_eq!(json["last_inspector"], "N/A");
        assert_eq!(json["last_inspection_status"], "Pending Inspection");
        assert!(json.get("locked_until").is_none());
        assert!(json.get("history_degraded").is_none());
    }
}

// =============================================================================
// ASSET ADMIN HANDLERS
// =============================================================================

mod asset_admin_tests {
    use firewatch::api::{self, CreateAssetRequest, ErrorCode};

    use super::*;

    fn request(serial: &str) -> CreateAssetRequest {
        serde_json::from_value(serde_json::json!({
            "serial_number": serial,
            "kind": "CO2",
            "capacity": "4kg",
            "location": "Plant room",
        }))
        .unwrap()
    }

    #[test]
    fn test_create_requires_credentials() {
        let fx = Fixture::new();
        let err = api::create_asset(&fx.ctx(t0()), None, &origin(), &request("FE-1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_create_requires_admin() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());
        for token in [INSPECTOR_TOKEN, AUDITOR_TOKEN] {
            let err = api::create_asset(&ctx, Some(bearer(token).as_str()), &origin(), &request("FE-1")).unwrap_err();
            assert_eq!(err.code, ErrorCode::Forbidden);
        }
    }

    #[test]
    fn test_create_then_conflict() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());
        let admin = bearer(ADMIN_TOKEN);

        let created = api::create_asset(&ctx, Some(admin.as_str()), &origin(), &request("fe-1")).unwrap();
        assert_eq!(created.serial_number, "FE-1");

        let err = api::create_asset(&ctx, Some(admin.as_str()), &origin(), &request("FE-1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(api::list_assets(&ctx).unwrap().assets.len(), 1);
    }

    #[test]
    fn test_create_with_blank_field_is_bad_request() {
        let fx = Fixture::new();
        let err = api::create_asset(&fx.ctx(t0()), Some(bearer(ADMIN_TOKEN).as_str()), &origin(), &request(" "))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_delete_requires_admin_and_hides_asset() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let ctx = fx.ctx(t0());

        let err = api::delete_asset(&ctx, "FE-001", Some(bearer(INSPECTOR_TOKEN).as_str()), &origin()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let deleted = api::delete_asset(&ctx, "FE-001", Some(bearer(ADMIN_TOKEN).as_str()), &origin()).unwrap();
        let copied = deleted;
        assert!(deleted.deleted && copied.deleted);
        assert!(api::list_assets(&ctx).unwrap().assets.is_empty());

        let again = api::delete_asset(&ctx, "FE-001", Some(bearer(ADMIN_TOKEN).as_str()), &origin()).unwrap_err();
        assert_eq!(again.code, ErrorCode::NotFound);
    }
}

// =============================================================================
// INSPECTION HANDLERS
// =============================================================================

mod inspection_tests {
    use firewatch::api::{self, CreateInspectionRequest, ErrorCode};
    use firewatch::core::models::AccessMode;

    use super::*;

    fn request(asset: &str, inspection_type: &str) -> CreateInspectionRequest {
        serde_json::from_value(serde_json::json!({
            "asset": asset,
            "inspection_type": inspection_type,
            "observation": "Pressure OK",
        }))
        .unwrap()
    }

    #[test]
    fn test_anonymous_cannot_inspect() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let err = api::create_inspection(&fx.ctx(t0()), None, &origin(), &request("FE-001", "quarterly"))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[test]
    fn test_inspect_then_locked() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let ctx = fx.ctx(t0());

        let created = api::create_inspection(
            &ctx,
            Some(bearer(INSPECTOR_TOKEN).as_str()),
            &origin(),
            &request("FE-001", "monthly"),
        )
        .unwrap();
        let copied = created;
        assert_eq!(created.inspection_date, t0());
        assert_eq!(copied.locked_until, t0() + hours(48));

        let view = api::get_asset(&ctx, "FE-001", Some(bearer(SECOND_INSPECTOR_TOKEN).as_str())).unwrap();
        assert_eq!(view.mode, AccessMode::Locked);

        let err = api::create_inspection(
            &ctx,
            Some(bearer(SECOND_INSPECTOR_TOKEN).as_str()),
            &origin(),
            &request("FE-001", "quarterly"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Locked);
        assert_eq!(err.status_code(), 423);
        assert!(err.message.contains("locked until"));
    }

    #[test]
    fn test_invalid_type_is_bad_request() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let err = api::create_inspection(
            &fx.ctx(t0()),
            Some(bearer(INSPECTOR_TOKEN).as_str()),
            &origin(),
            &request("FE-001", "weekly"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_inspect_unknown_asset() {
        let fx = Fixture::new();
        let err = api::create_inspection(
            &fx.ctx(t0()),
            Some(bearer(INSPECTOR_TOKEN).as_str()),
            &origin(),
            &request("FE-404", "quarterly"),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_history_lists_newest_first() {
        let fx = Fixture::new();
        let asset = fx.register("FE-001");
        let older = fx.inspect(&asset, &alice(), t0() - hours(100));
        let newer = fx.inspect(&asset, &alice(), t0() - hours(50));

        let data = api::list_inspections(&fx.ctx(t0()), "FE-001").unwrap();
        assert_eq!(data.asset_id, asset.id);
        let ids: Vec<_> = data.inspections.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
    }

    #[test]
    fn test_history_of_unknown_asset() {
        let fx = Fixture::new();
        let err = api::list_inspections(&fx.ctx(t0()), "FE-404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_get_inspection_by_id() {
        let fx = Fixture::new();
        let asset = fx.register("FE-001");
        let recorded = fx.inspect(&asset, &alice(), t0() - hours(3));

        let found = api::get_inspection(&fx.ctx(t0()), &recorded.id.to_string()).unwrap();
        assert_eq!(found, recorded);
        assert_eq!(found.inspector.as_deref(), Some("alice"));
    }

    #[test]
    fn test_get_inspection_unknown_or_malformed() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());

        let missing = api::get_inspection(&ctx, &uuid::Uuid::new_v4().to_string()).unwrap_err();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let malformed = api::get_inspection(&ctx, "FE-001").unwrap_err();
        assert_eq!(malformed.code, ErrorCode::BadRequest);
    }
}

// =============================================================================
// AUDIT TRAIL
// =============================================================================

mod audit_tests {
    use firewatch::api::{self, CreateAssetRequest, CreateInspectionRequest, ErrorCode};
    use firewatch::core::models::{AuditAction, Role};

    use super::*;

    fn asset_request(serial: &str) -> CreateAssetRequest {
        serde_json::from_value(serde_json::json!({
            "serial_number": serial,
            "kind": "Foam",
            "capacity": "9L",
            "location": "Loading bay",
        }))
        .unwrap()
    }

    fn inspection_request(asset: &str) -> CreateInspectionRequest {
        serde_json::from_value(serde_json::json!({
            "asset": asset,
            "inspection_type": "monthly",
        }))
        .unwrap()
    }

    #[test]
    fn test_writes_are_audited_newest_first() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());
        let admin = bearer(ADMIN_TOKEN);

        let created =
            api::create_asset(&ctx, Some(admin.as_str()), &origin(), &asset_request("FE-050")).unwrap();
        let inspection = api::create_inspection(
            &ctx,
            Some(bearer(INSPECTOR_TOKEN).as_str()),
            &origin(),
            &inspection_request("FE-050"),
        )
        .unwrap();
        api::delete_asset(&ctx, "FE-050", Some(admin.as_str()), &RequestOrigin::default()).unwrap();

        let trail = api::list_audit(&ctx, Some(admin.as_str()), None).unwrap().entries;
        let actions: Vec<_> = trail.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::AssetRetired,
                AuditAction::InspectionRecorded,
                AuditAction::AssetCreated,
            ]
        );

        let recorded = &trail[1];
        assert_eq!(recorded.username, "alice");
        assert_eq!(recorded.role, Role::Inspector);
        assert_eq!(recorded.timestamp, t0());
        assert_eq!(recorded.ip_address.as_deref(), Some("10.0.4.21"));
        assert_eq!(recorded.device_info.as_deref(), Some("scanner-app/2.3"));
        let details = recorded.details.as_deref().unwrap();
        assert!(details.contains(&inspection.id.to_string()));
        assert!(details.contains(&created.id.to_string()));

        assert_eq!(trail[0].username, "root");
        assert_eq!(trail[0].ip_address, None);
        assert_eq!(trail[2].details.as_deref(), Some("FE-050"));
    }

    #[test]
    fn test_rejected_writes_are_not_audited() {
        let fx = Fixture::new();
        fx.register("FE-001");
        let ctx = fx.ctx(t0());

        let inspector = bearer(INSPECTOR_TOKEN);
        assert!(
            api::create_asset(&ctx, Some(inspector.as_str()), &origin(), &asset_request("FE-2"))
                .is_err()
        );
        assert!(api::create_inspection(&ctx, None, &origin(), &inspection_request("FE-001")).is_err());

        let trail = api::list_audit(&ctx, Some(bearer(ADMIN_TOKEN).as_str()), None).unwrap();
        assert!(trail.entries.is_empty());
    }

    #[test]
    fn test_audit_is_admin_only() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());

        let anon = api::list_audit(&ctx, None, None).unwrap_err();
        assert_eq!(anon.code, ErrorCode::Unauthorized);

        for token in [INSPECTOR_TOKEN, AUDITOR_TOKEN] {
            let err = api::list_audit(&ctx, Some(bearer(token).as_str()), None).unwrap_err();
            assert_eq!(err.code, ErrorCode::Forbidden);
        }
    }

    #[test]
    fn test_audit_limit() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());
        let admin = bearer(ADMIN_TOKEN);
        for serial in ["FE-1", "FE-2", "FE-3"] {
            api::create_asset(&ctx, Some(admin.as_str()), &origin(), &asset_request(serial)).unwrap();
        }

        let trail = api::list_audit(&ctx, Some(admin.as_str()), Some(2)).unwrap().entries;
        let serials: Vec<_> = trail.iter().filter_map(|e| e.details.as_deref()).collect();
        assert_eq!(serials, vec!["FE-3", "FE-2"]);
    }
}

// =============================================================================
// DASHBOARD HANDLERS
// =============================================================================

mod dashboard_tests {
    use firewatch::api;
    use firewatch::core::models::InspectionDetails;
    use firewatch::core::services::Trend;

    use super::*;

    #[test]
    fn test_health() {
        let health = api::health();
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, firewatch::VERSION);
    }

    #[test]
    fn test_events_track_revision() {
        let fx = Fixture::new();
        let ctx = fx.ctx(t0());

        let first = api::get_events(&ctx, None);
        assert!(first.changed);

        let idle = api::get_events(&ctx, Some(first.counter));
        assert!(!idle.changed);

        fx.register("FE-001");
        let after = api::get_events(&ctx, Some(first.counter));
        assert!(after.changed);
        assert_eq!(after.counter, first.counter + 1);
    }

    #[test]
    fn test_stats_compare_weeks() {
        let fx = Fixture::new();
        let a = fx.register("FE-001");
        let b = fx.register("FE-002");
        // Previous week: one inspection; current week: two
        fx.inspect(&a, &alice(), t0() - hours(24 * 9));
        fx.inspect(&a, &alice(), t0() - hours(24 * 2));
        fx.append_raw(b.id, Some("bob"), t0() - hours(1), InspectionDetails::default());

        let stats = api::get_stats(&fx.ctx(t0())).unwrap();
        assert_eq!(stats.chart.len(), 7);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.previous_total, 1);
        assert!((stats.change - 100.0).abs() < f64::EPSILON);
        assert_eq!(stats.trend, Trend::Up);
        assert_eq!(stats.chart.last().unwrap().value, 1);
    }

    #[test]
    fn test_summary_counts_active_assets() {
        let fx = Fixture::new();
        let a = fx.register("FE-001");
        fx.register("FE-002");
        let c = fx.register("FE-003");
        fx.inspect(&a, &alice(), t0() - hours(200 * 24));
        fx.append_raw(
            c.id,
            Some("alice"),
            t0() - hours(5),
            InspectionDetails {
                remarks: Some("Non-Operational".to_string()),
                ..InspectionDetails::default()
            },
        );

        let summary = api::get_summary(&fx.ctx(t0())).unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.operational, 1);
        assert_eq!(summary.non_operational, 1);
        assert_eq!(summary.overdue, 1);
    }
}
