use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, patch, post},
    Extension, Router,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{
    athlete_only_middleware, coach_or_admin_middleware, jwt_auth_middleware, AuthService,
    UserSession,
};
use crate::error::EngineError;
use crate::models::{
    AthleteSessionView, CoachSessionView, CompleteDrillRequest, DrillCompletion, Session,
    SessionSetupRequest,
};
use crate::services::SessionService;

/// Session routes: coach and athlete views, drill completion, manual
/// session overrides
pub fn session_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route(
            "/coach",
            get(coach_sessions).route_layer(middleware::from_fn(coach_or_admin_middleware)),
        )
        .route(
            "/athlete",
            get(athlete_sessions).route_layer(middleware::from_fn(athlete_only_middleware)),
        )
        .route(
            "/complete-drill",
            post(complete_drill).route_layer(middleware::from_fn(athlete_only_middleware)),
        )
        .route(
            "/:id/setup",
            patch(session_setup).route_layer(middleware::from_fn(coach_or_admin_middleware)),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(db)
}

/// Sessions the authenticated coach is running
#[tracing::instrument(skip(db))]
async fn coach_sessions(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<CoachSessionView>>, EngineError> {
    let views = SessionService::new(db)
        .list_coach_sessions(session.academy_id, session.user_id)
        .await?;
    Ok(Json(views))
}

/// The authenticated athlete's sessions
#[tracing::instrument(skip(db))]
async fn athlete_sessions(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<AthleteSessionView>>, EngineError> {
    let views = SessionService::new(db)
        .list_athlete_sessions(session.user_id)
        .await?;
    Ok(Json(views))
}

/// Mark one drill of the athlete's attendance as completed
#[tracing::instrument(skip(db, request))]
async fn complete_drill(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CompleteDrillRequest>,
) -> Result<Json<DrillCompletion>, EngineError> {
    let completion = SessionService::new(db)
        .complete_drill(session.user_id, request.attendance_id, request.drill_id)
        .await?;
    Ok(Json(completion))
}

/// Coach-driven manual override: swap the session onto the template
/// matching the requested workout type and duration
#[tracing::instrument(skip(db, request))]
async fn session_setup(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SessionSetupRequest>,
) -> Result<Json<Session>, EngineError> {
    let updated = SessionService::new(db)
        .set_session_menu(
            session.academy_id,
            session_id,
            request.workout_type,
            request.duration,
        )
        .await?;
    Ok(Json(updated))
}
