use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::attendance::AttendanceStatus;
use super::template::{ResolvedTemplate, SessionDuration, WorkoutType};

/// One dated occurrence of a template. `template_id` is mutable after
/// creation (override mechanism); `date`, `academy_id` and `coach_id` are
/// fixed once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub template_id: Uuid,
    pub coach_id: Uuid,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Coach-driven manual override request: pick a different (type, duration)
/// menu for an existing session.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionSetupRequest {
    pub workout_type: WorkoutType,
    pub duration: SessionDuration,
}

/// One attendance line in the coach's session view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionRosterEntry {
    pub attendance_id: Uuid,
    pub athlete_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub status: AttendanceStatus,
    pub is_forced_tod: bool,
}

/// A session as coaches see it: template plus who is attending.
#[derive(Debug, Serialize, Deserialize)]
pub struct CoachSessionView {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub template: ResolvedTemplate,
    pub roster: Vec<SessionRosterEntry>,
}

/// A session as the athlete sees it: flattened with their own attendance.
#[derive(Debug, Serialize, Deserialize)]
pub struct AthleteSessionView {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub template: ResolvedTemplate,
    pub attendance_id: Uuid,
    pub status: AttendanceStatus,
    pub selected_program: Option<String>,
    pub completed_drill_ids: Vec<Uuid>,
}
