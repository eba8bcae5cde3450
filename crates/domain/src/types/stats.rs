//! Statistics types for the dashboards
//!
//! Aggregates computed server-side; the client renders them as-is.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// All-time summary shown at the top of the stats screen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Total number of logged sessions
    pub total_sessions: u64,

    /// Total training time in seconds
    pub total_duration_seconds: u64,

    /// Total lifted volume in kilograms
    pub total_volume_kg: f64,

    /// Consecutive days with at least one session, ending today
    pub current_streak_days: u32,

    /// Sessions logged in the current ISO week
    pub sessions_this_week: u32,
}

/// Per-week aggregate for the trend chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    /// Monday of the ISO week this row covers
    pub week_start: NaiveDate,
    pub session_count: u32,
    pub duration_seconds: u64,
    pub volume_kg: f64,
}

/// Best recorded lift for one exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub exercise: String,
    pub best_weight_kg: f64,
    pub reps: u32,
    pub achieved_at: DateTime<Utc>,
}
