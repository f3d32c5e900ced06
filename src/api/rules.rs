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

use crate::auth::{admin_only_middleware, jwt_auth_middleware, AuthService, UserSession};
use crate::error::EngineError;
use crate::models::{ClassificationRule, CreateRule, RuleWithTemplate, UpdateRule};
use crate::services::RuleService;

/// Admin CRUD for classification rules
pub fn rule_routes(db: PgPool, auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(list_rules).post(create_rule))
        .route("/:id", put(update_rule).delete(delete_rule))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(
            auth_service,
            jwt_auth_middleware,
        ))
        .with_state(db)
}

#[tracing::instrument(skip(db))]
async fn list_rules(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
) -> Result<Json<Vec<RuleWithTemplate>>, EngineError> {
    let rules = RuleService::new(db).list_rules(session.academy_id).await?;
    Ok(Json(rules))
}

/// Create a rule; a duplicate classification tuple is rejected
#[tracing::instrument(skip(db, request))]
async fn create_rule(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Json(request): Json<CreateRule>,
) -> Result<Json<ClassificationRule>, EngineError> {
    let rule = RuleService::new(db)
        .create_rule(session.academy_id, request)
        .await?;
    Ok(Json(rule))
}

#[tracing::instrument(skip(db, request))]
async fn update_rule(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(rule_id): Path<Uuid>,
    Json(request): Json<UpdateRule>,
) -> Result<Json<ClassificationRule>, EngineError> {
    let rule = RuleService::new(db)
        .update_rule(session.academy_id, rule_id, request)
        .await?;
    Ok(Json(rule))
}

#[tracing::instrument(skip(db))]
async fn delete_rule(
    State(db): State<PgPool>,
    Extension(session): Extension<UserSession>,
    Path(rule_id): Path<Uuid>,
) -> Result<Json<Value>, EngineError> {
    RuleService::new(db)
        .delete_rule(session.academy_id, rule_id)
        .await?;
    Ok(Json(json!({ "status": "success" })))
}
