//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use serde::Serialize;

use crate::api::{AssetAccessData, AssetsData, AuditData, InspectionCreateData, InspectionsData};
use crate::core::models::AccessMode;
use crate::core::services::{FleetSummary, WeeklyStats};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// A command result that can be printed in either mode
pub trait Render: Serialize {
    /// Human-readable text
    fn human(&self) -> String;

    /// Print in the requested mode
    fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.human()),
            OutputMode::Json => match serde_json::to_string_pretty(self) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("failed to serialize output: {e}"),
            },
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// A successful result
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

impl Render for OperationResult {
    fn human(&self) -> String {
        self.message.clone()
    }
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl Render for AssetAccessData {
    fn human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} [{}]", self.serial_number, self.mode);
        let _ = writeln!(out, "  id:             {}", self.id);
        let _ = writeln!(out, "  type:           {} {}", self.kind, self.capacity);
        let _ = writeln!(out, "  location:       {}", self.location);
        let _ = writeln!(out, "  status:         {}", self.last_inspection_status);
        let _ = writeln!(out, "  last inspected: {}", or_dash(self.last_inspection_at));
        let _ = writeln!(out, "  last inspector: {}", self.last_inspector);
        let _ = write!(out, "  service due:    {}", or_dash(self.next_service_due));
        if self.mode == AccessMode::Locked {
            let _ = write!(out, "\n  locked until:   {}", or_dash(self.locked_until));
        }
        if self.history_degraded {
            out.push_str("\n  (inspection history unavailable)");
        }
        out
    }
}

impl Render for AssetsData {
    fn human(&self) -> String {
        if self.assets.is_empty() {
            return "No assets registered.".to_string();
        }
        let mut out = String::new();
        for asset in &self.assets {
            let _ = writeln!(
                out,
                "{:<14} {:<6} {:<8} {:<20} {:<18} due {}",
                asset.serial_number,
                asset.kind,
                asset.capacity,
                asset.location,
                asset.status.label(),
                or_dash(asset.next_service_due)
            );
        }
        out.trim_end().to_string()
    }
}

impl Render for InspectionsData {
    fn human(&self) -> String {
        if self.inspections.is_empty() {
            return "No inspections recorded.".to_string();
        }
        let mut out = String::new();
        for inspection in &self.inspections {
            let _ = writeln!(
                out,
                "{}  {:<9}  {:<12}  {}",
                inspection.inspection_date.format("%Y-%m-%d %H:%M"),
                inspection.inspection_type.to_string(),
                inspection.inspector.as_deref().unwrap_or("-"),
                inspection.details.observation.as_deref().unwrap_or("-")
            );
        }
        out.trim_end().to_string()
    }
}

impl Render for InspectionCreateData {
    fn human(&self) -> String {
        format!(
            "Recorded inspection {} at {}\nAsset locked until {}",
            self.id,
            self.inspection_date.format("%Y-%m-%d %H:%M UTC"),
            self.locked_until.format("%Y-%m-%d %H:%M UTC")
        )
    }
}

impl Render for WeeklyStats {
    fn human(&self) -> String {
        let mut out = String::new();
        for day in &self.chart {
            let _ = writeln!(out, "{} {}  {}", day.name, day.date, "#".repeat(day.value));
        }
        let _ = write!(
            out,
            "Total {} (previous {}), change {:+.1}% {}",
            self.total, self.previous_total, self.change, self.trend
        );
        out
    }
}

impl Render for FleetSummary {
    fn human(&self) -> String {
        format!(
            "Assets: {}\n  pending:         {}\n  operational:     {}\n  non-operational: {}\n  overdue:         {}",
            self.total, self.pending, self.operational, self.non_operational, self.overdue
        )
    }
}

impl Render for AuditData {
    fn human(&self) -> String {
        if self.entries.is_empty() {
            return "No audit entries.".to_string();
        }
        let mut out = String::new();
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{}  {:<10}  {:<20}  {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.username,
                entry.action.to_string(),
                entry.details.as_deref().unwrap_or("-")
            );
        }
        out.trim_end().to_string()
    }
}
