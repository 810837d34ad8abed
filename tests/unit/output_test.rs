//! Tests for human-readable rendering

use firewatch::api;
use firewatch::output::{OperationResult, Render};

use firewatch::core::models::{AuditAction, AuditEntry, RequestOrigin};

use crate::common::{Fixture, INSPECTOR_TOKEN, alice, hours, t0};

#[test]
fn test_operation_result() {
    let result = OperationResult::ok("Registered FE-001");
    assert!(result.success);
    assert_eq!(result.human(), "Registered FE-001");
}

#[test]
fn test_locked_scan_shows_unlock_time() {
    let fx = Fixture::new();
    let asset = fx.register("FE-001");
    fx.inspect(&asset, &alice(), t0() - hours(10));

    let view = api::get_asset(&fx.ctx(t0()), "FE-001", Some(INSPECTOR_TOKEN)).unwrap();
    let text = view.human();

    assert!(text.starts_with("FE-001 [LOCKED]"));
    assert!(text.contains("last inspector: alice"));
    assert!(text.contains("locked until:"));
}

#[test]
fn test_view_scan_hides_lock_line() {
    let fx = Fixture::new();
    fx.register("FE-001");

    let text = api::get_asset(&fx.ctx(t0()), "FE-001", None).unwrap().human();

    assert!(text.starts_with("FE-001 [VIEW]"));
    assert!(text.contains("status:         Pending Inspection"));
    assert!(text.contains("service due:    -"));
    assert!(!text.contains("locked until"));
}

#[test]
fn test_empty_lists() {
    let fx = Fixture::new();
    let ctx = fx.ctx(t0());
    let asset = fx.register("FE-001");

    assert_eq!(
        api::list_inspections(&ctx, &asset.id.to_string()).unwrap().human(),
        "No inspections recorded."
    );
    assert_eq!(
        api::AssetsData { assets: vec![] }.human(),
        "No assets registered."
    );
}

#[test]
fn test_asset_list_one_line_each() {
    let fx = Fixture::new();
    fx.register("FE-001");
    fx.register("FE-002");

    let text = api::list_assets(&fx.ctx(t0())).unwrap().human();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("FE-001"));
    assert!(lines[1].contains("Pending Inspection"));
}

#[test]
fn test_stats_summary_line() {
    let fx = Fixture::new();
    let asset = fx.register("FE-001");
    fx.inspect(&asset, &alice(), t0() - hours(3));

    let text = api::get_stats(&fx.ctx(t0())).unwrap().human();

    assert_eq!(text.lines().count(), 8);
    assert!(text.ends_with("Total 1 (previous 0), change +100.0% up"));
}

#[test]
fn test_audit_lines() {
    assert_eq!(api::AuditData { entries: vec![] }.human(), "No audit entries.");

    let entry = AuditEntry::new(
        &alice(),
        AuditAction::InspectionRecorded,
        "FE-001",
        &RequestOrigin::default(),
        t0(),
    );
    let text = api::AuditData {
        entries: vec![entry],
    }
    .human();

    assert!(text.starts_with("2024-06-10 09:00  alice"));
    assert!(text.contains("inspection_recorded"));
    assert!(text.ends_with("FE-001"));
}
