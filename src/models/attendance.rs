use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle of an athlete's participation in a session.
/// PENDING -> PRESENT/COMPLETED; absence simply stays PENDING.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "attendance_status")]
pub enum AttendanceStatus {
    #[serde(rename = "PENDING")]
    #[sqlx(rename = "PENDING")]
    Pending,
    #[serde(rename = "PRESENT")]
    #[sqlx(rename = "PRESENT")]
    Present,
    #[serde(rename = "COMPLETED")]
    #[sqlx(rename = "COMPLETED")]
    Completed,
}

/// One athlete's participation record within a session, carrying the day's
/// wellness snapshot once the athlete has checked in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Attendance {
    pub id: Uuid,
    pub session_id: Uuid,
    pub athlete_id: Uuid,
    pub status: AttendanceStatus,
    pub condition_score: Option<i32>,
    pub has_pain: bool,
    pub pain_area: Option<String>,
    pub worked_out_yesterday: bool,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<i32>,
    pub selected_program: Option<String>,
    pub is_forced_tod: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Daily wellness/readiness submission. Every field is optional so an empty
/// body is a valid (neutral) check-in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckinSubmission {
    /// Self-reported condition on a 1-5 scale; higher is better.
    pub condition_score: Option<i32>,
    /// Alternative 1-10 fatigue input; higher is worse. Mapped onto the
    /// condition scale when `condition_score` is absent.
    pub fatigue_score: Option<i32>,
    pub has_pain: bool,
    pub pain_area: Option<String>,
    pub worked_out_yesterday: bool,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<i32>,
    /// Chosen program intensity; defaults to "elite".
    pub program: Option<String>,
}

/// Result of a check-in as returned to the HTTP layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckinOutcome {
    pub status: String,
    pub session_id: Uuid,
    pub is_forced_tod: bool,
}

/// Append-only record of an athlete finishing one drill. Duplicates per
/// (attendance, drill) are tolerated and simply accumulate.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DrillCompletion {
    pub id: Uuid,
    pub attendance_id: Uuid,
    pub drill_id: Uuid,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteDrillRequest {
    pub attendance_id: Uuid,
    pub drill_id: Uuid,
}
