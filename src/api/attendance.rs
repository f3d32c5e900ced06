use axum::{extract::State, middleware, response::Json, routing::post, Extension, Router};
use chrono::Utc;
use sqlx::PgPool;

use crate::auth::{athlete_only_middleware, jwt_auth_middleware, AuthService, UserSession};
use crate::error::EngineError;
use crate::models::{CheckinOutcome, CheckinSubmission};
use crate::services::CheckinService;

/// Attendance routes (athlete check-in)
pub fn attendance_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route("/checkin", post(checkin))
        .route_layer(middleware::from_fn(athlete_only_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(db)
}

/// Daily check-in. The body is optional; an empty submission is a neutral
/// check-in on the default program.
#[tracing::instrument(skip(db, submission))]
async fn checkin(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    submission: Option<Json<CheckinSubmission>>,
) -> Result<Json<CheckinOutcome>, EngineError> {
    let submission = submission.map(|Json(body)| body).unwrap_or_default();

    let outcome = CheckinService::new(db)
        .check_in(session.user_id, session.academy_id, Utc::now(), submission)
        .await?;

    Ok(Json(outcome))
}
