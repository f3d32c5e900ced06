use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::athlete_profile::{AthleteGroup, Frequency, Level};

/// Maps one classification tuple to exactly one session template.
/// At most one rule per (academy, level, frequency, group).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClassificationRule {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub level: Level,
    pub frequency: Frequency,
    #[sqlx(rename = "athlete_group")]
    pub group: AthleteGroup,
    pub template_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateRule {
    pub level: Level,
    pub frequency: Frequency,
    pub group: AthleteGroup,
    pub template_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRule {
    pub level: Level,
    pub frequency: Frequency,
    pub group: AthleteGroup,
    pub template_id: Uuid,
}

/// Rule with its target template name, for the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RuleWithTemplate {
    pub id: Uuid,
    pub academy_id: Uuid,
    pub level: Level,
    pub frequency: Frequency,
    #[sqlx(rename = "athlete_group")]
    pub group: AthleteGroup,
    pub template_id: Uuid,
    pub template_name: String,
    pub created_at: DateTime<Utc>,
}
