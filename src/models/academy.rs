use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tenant boundary. Every other entity is scoped by an academy id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Academy {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
