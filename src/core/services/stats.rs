//! Dashboard statistics
//!
//! Pure aggregation over already-fetched records.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Serialize;

use crate::core::models::{Asset, AssetStatus, Inspection};

/// Number of days in one stats period
pub const PERIOD_DAYS: i64 = 7;

/// Inspections on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// Calendar day (UTC)
    pub date: NaiveDate,
    /// Short weekday name (Mon, Tue, ...)
    pub name: String,
    /// Inspections recorded that day
    pub value: usize,
}

/// Direction of the week-over-week change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Same or more inspections than the previous period
    Up,
    /// Fewer inspections than the previous period
    Down,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Inspection counts for the current period against the previous one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyStats {
    /// Per-day counts, oldest first
    pub chart: Vec<DayCount>,
    /// Inspections in the current period
    pub total: usize,
    /// Inspections in the previous period
    pub previous_total: usize,
    /// Percentage change, one decimal
    pub change: f64,
    /// Direction of change
    pub trend: Trend,
}

/// Time bounds of the two stats periods ending at `now`
///
/// Returns `(previous_start, current_start)`. The current period starts at
/// midnight six days before `now`'s day, so it covers seven calendar days.
#[must_use]
pub fn stats_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let first_day = now.date_naive() - TimeDelta::days(PERIOD_DAYS - 1);
    let current_start = first_day.and_time(chrono::NaiveTime::MIN).and_utc();
    (current_start - TimeDelta::days(PERIOD_DAYS), current_start)
}

/// Build weekly stats from the inspections of both periods
///
/// `current` holds inspections from the current period, `previous_total` the
/// count for the period before it.
#[must_use]
pub fn weekly_stats(current: &[Inspection], previous_total: usize, now: DateTime<Utc>) -> WeeklyStats {
    let first_day = now.date_naive() - TimeDelta::days(PERIOD_DAYS - 1);
    let mut chart: Vec<DayCount> = first_day
        .iter_days()
        .take(usize::try_from(PERIOD_DAYS).unwrap_or(7))
        .map(|date| DayCount {
            date,
            name: date.format("%a").to_string(),
            value: 0,
        })
        .collect();

    let mut total = 0;
    for inspection in current {
        let day = inspection.inspection_date.date_naive();
        if let Some(bucket) = chart.iter_mut().find(|d| d.date == day) {
            bucket.value += 1;
            total += 1;
        }
    }

    let change = percentage_change(total, previous_total);
    WeeklyStats {
        chart,
        total,
        previous_total,
        change,
        trend: if change >= 0.0 { Trend::Up } else { Trend::Down },
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage_change(current: usize, previous: usize) -> f64 {
    if previous == 0 {
        return if current > 0 { 100.0 } else { 0.0 };
    }
    let raw = (current as f64 - previous as f64) / previous as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Fleet-wide status counts for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FleetSummary {
    /// Active assets
    pub total: usize,
    /// Never inspected
    pub pending: usize,
    /// Operational
    pub operational: usize,
    /// Non-operational
    pub non_operational: usize,
    /// Past their service due date
    pub overdue: usize,
}

/// Summarize active assets as of `today`
#[must_use]
pub fn fleet_summary(assets: &[Asset], today: NaiveDate) -> FleetSummary {
    assets
        .iter()
        .filter(|a| a.active)
        .fold(FleetSummary::default(), |mut s, asset| {
            s.total += 1;
            match asset.status {
                AssetStatus::PendingInspection => s.pending += 1,
                AssetStatus::Operational => s.operational += 1,
                AssetStatus::NonOperational => s.non_operational += 1,
            }
            if asset.is_overdue(today) {
                s.overdue += 1;
            }
            s
        })
}
