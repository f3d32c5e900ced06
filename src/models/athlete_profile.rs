use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ordered skill tier. L0 is the entry level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(type_name = "level")]
pub enum Level {
    L0,
    L1,
    L2,
}

/// Weekly training cadence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "frequency")]
pub enum Frequency {
    /// Once per week
    F1X,
    /// Twice per week
    F2X,
    /// Four to five times per week
    F45X,
}

/// Age / competitive cohort.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "athlete_group")]
pub enum AthleteGroup {
    #[serde(rename = "YOUTH")]
    #[sqlx(rename = "YOUTH")]
    Youth,
    #[serde(rename = "HS")]
    #[sqlx(rename = "HS")]
    Hs,
    #[serde(rename = "ADULT")]
    #[sqlx(rename = "ADULT")]
    Adult,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Level::L0 => "L0",
            Level::L1 => "L1",
            Level::L2 => "L2",
        })
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Frequency::F1X => "F1X",
            Frequency::F2X => "F2X",
            Frequency::F45X => "F45X",
        })
    }
}

impl std::fmt::Display for AthleteGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AthleteGroup::Youth => "YOUTH",
            AthleteGroup::Hs => "HS",
            AthleteGroup::Adult => "ADULT",
        })
    }
}

/// An athlete's classification. Mutated only by coach/admin action,
/// immutable for the duration of a single check-in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AthleteProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub level: Level,
    pub frequency: Frequency,
    #[sqlx(rename = "athlete_group")]
    pub group: AthleteGroup,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
