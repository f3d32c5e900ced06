use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Workout content category. A session has exactly one active type at a time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "workout_type")]
pub enum WorkoutType {
    /// Lower body / power
    #[serde(rename = "A_LOWER")]
    #[sqlx(rename = "A_LOWER")]
    ALower,
    /// Upper body / stability
    #[serde(rename = "B_UPPER")]
    #[sqlx(rename = "B_UPPER")]
    BUpper,
    /// Speed / agility
    #[serde(rename = "C_SPEED")]
    #[sqlx(rename = "C_SPEED")]
    CSpeed,
    /// Recovery / mobility. Target of the forced-recovery override.
    #[serde(rename = "D_RECOVERY")]
    #[sqlx(rename = "D_RECOVERY")]
    DRecovery,
}

/// Supported session lengths, the second axis of template selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "session_duration")]
pub enum SessionDuration {
    #[serde(rename = "MIN_45")]
    #[sqlx(rename = "MIN_45")]
    Min45,
    #[serde(rename = "MIN_60")]
    #[sqlx(rename = "MIN_60")]
    Min60,
    #[serde(rename = "MIN_75")]
    #[sqlx(rename = "MIN_75")]
    Min75,
    #[serde(rename = "MIN_90")]
    #[sqlx(rename = "MIN_90")]
    Min90,
    #[serde(rename = "MIN_120")]
    #[sqlx(rename = "MIN_120")]
    Min120,
}

impl SessionDuration {
    pub fn minutes(&self) -> u32 {
        match self {
            SessionDuration::Min45 => 45,
            SessionDuration::Min60 => 60,
            SessionDuration::Min75 => 75,
            SessionDuration::Min90 => 90,
            SessionDuration::Min120 => 120,
        }
    }
}

impl std::fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            WorkoutType::ALower => "A_LOWER",
            WorkoutType::BUpper => "B_UPPER",
            WorkoutType::CSpeed => "C_SPEED",
            WorkoutType::DRecovery => "D_RECOVERY",
        })
    }
}

impl std::fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SessionDuration::Min45 => "MIN_45",
            SessionDuration::Min60 => "MIN_60",
            SessionDuration::Min75 => "MIN_75",
            SessionDuration::Min90 => "MIN_90",
            SessionDuration::Min120 => "MIN_120",
        })
    }
}

/// Reusable, academy-scoped workout template. Read-only to the resolution
/// engine; created by coach/admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SessionTemplate {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub name: String,
    pub workout_type: WorkoutType,
    pub duration: SessionDuration,
    pub created_at: DateTime<Utc>,
}

/// One drill assignment within a template, joined with its source drill.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TemplateDrillDetail {
    pub drill_id: Uuid,
    pub order_index: i32,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub rest: Option<String>,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: i32,
}

/// A template with its ordered drill list populated, as returned by the
/// rule resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedTemplate {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub name: String,
    pub workout_type: WorkoutType,
    pub duration: SessionDuration,
    pub drills: Vec<TemplateDrillDetail>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub name: String,
    pub workout_type: WorkoutType,
    pub duration: SessionDuration,
    pub drills: Vec<CreateTemplateDrill>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTemplateDrill {
    pub drill_id: Uuid,
    pub order_index: i32,
    pub sets: Option<String>,
    pub reps: Option<String>,
    pub rest: Option<String>,
}
