use axum::{
    extract::{Path, State},
    middleware,
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{coach_or_admin_middleware, jwt_auth_middleware, AuthService, UserSession};
use crate::error::EngineError;
use crate::models::{CreateDrill, CreateTemplate, Drill, SessionTemplate, UpdateDrill};
use crate::services::{DrillService, TemplateService};

/// Coach/admin routes for the drill library and template catalog
pub fn drill_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(list_drills).post(create_drill))
        .route("/templates", get(list_templates).post(create_template))
        .route("/:id", put(update_drill).delete(delete_drill))
        .route_layer(middleware::from_fn(coach_or_admin_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(db)
}

#[tracing::instrument(skip(db))]
async fn list_drills(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<Drill>>, EngineError> {
    let drills = DrillService::new(db).list_drills(session.academy_id).await?;
    Ok(Json(drills))
}

#[tracing::instrument(skip(db, request))]
async fn create_drill(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateDrill>,
) -> Result<Json<Drill>, EngineError> {
    let drill = DrillService::new(db)
        .create_drill(session.academy_id, request)
        .await?;
    Ok(Json(drill))
}

#[tracing::instrument(skip(db, request))]
async fn update_drill(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(drill_id): Path<Uuid>,
    Json(request): Json<UpdateDrill>,
) -> Result<Json<Drill>, EngineError> {
    let drill = DrillService::new(db)
        .update_drill(session.academy_id, drill_id, request)
        .await?;
    Ok(Json(drill))
}

#[tracing::instrument(skip(db))]
async fn delete_drill(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(drill_id): Path<Uuid>,
) -> Result<Json<Value>, EngineError> {
    DrillService::new(db)
        .delete_drill(session.academy_id, drill_id)
        .await?;
    Ok(Json(json!({ "status": "success" })))
}

#[tracing::instrument(skip(db))]
async fn list_templates(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<SessionTemplate>>, EngineError> {
    let templates = TemplateService::new(db)
        .list_templates(session.academy_id)
        .await?;
    Ok(Json(templates))
}

#[tracing::instrument(skip(db, request))]
async fn create_template(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateTemplate>,
) -> Result<Json<SessionTemplate>, EngineError> {
    let template = TemplateService::new(db)
        .create_template(session.academy_id, request)
        .await?;
    Ok(Json(template))
}
