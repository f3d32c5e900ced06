use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{AthleteGroup, Frequency, Level, SessionDuration, WorkoutType};

/// Structured errors surfaced by the resolution engine. The HTTP layer maps
/// these onto status codes; none of the core logic retries internally.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Athlete profile not found")]
    AthleteNotFound,
    #[error("No rule found for academy {academy_id}: {level}/{frequency}/{group}")]
    RuleNotFound {
        academy_id: Uuid,
        level: Level,
        frequency: Frequency,
        group: AthleteGroup,
    },
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),
    #[error("Attendance {0} not found")]
    AttendanceNotFound(Uuid),
    #[error("No template for {workout_type}/{duration} in this academy")]
    TemplateNotFound {
        workout_type: WorkoutType,
        duration: SessionDuration,
    },
    #[error("No coach available in academy {0}")]
    NoCoachAvailable(Uuid),
    #[error("A rule already exists for this classification")]
    DuplicateRule,
    #[error("Rule {0} not found")]
    RuleIdNotFound(Uuid),
    #[error("Drill {0} not found")]
    DrillNotFound(Uuid),
    #[error("{0}")]
    Validation(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::AthleteNotFound
            | EngineError::RuleNotFound { .. }
            | EngineError::SessionNotFound(_)
            | EngineError::AttendanceNotFound(_)
            | EngineError::TemplateNotFound { .. }
            | EngineError::RuleIdNotFound(_)
            | EngineError::DrillNotFound(_) => StatusCode::NOT_FOUND,
            EngineError::NoCoachAvailable(_) => StatusCode::CONFLICT,
            EngineError::DuplicateRule | EngineError::Validation(_) => StatusCode::BAD_REQUEST,
            EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Do not leak storage details to clients
        let message = match &self {
            EngineError::Database(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
