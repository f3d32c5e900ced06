use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Drill {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: i32,
    pub cue1: Option<String>,
    pub cue2: Option<String>,
    pub cue3: Option<String>,
    pub base_sets: Option<String>,
    pub base_reps: Option<String>,
    pub base_rest: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDrill {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: Option<i32>,
    pub cue1: Option<String>,
    pub cue2: Option<String>,
    pub cue3: Option<String>,
    pub base_sets: Option<String>,
    pub base_reps: Option<String>,
    pub base_rest: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateDrill {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub difficulty: Option<i32>,
    pub cue1: Option<String>,
    pub cue2: Option<String>,
    pub cue3: Option<String>,
    pub base_sets: Option<String>,
    pub base_reps: Option<String>,
    pub base_rest: Option<String>,
}
