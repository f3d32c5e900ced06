use axum::{routing::get, Router};
use sqlx::PgPool;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::attendance::attendance_routes;
use super::auth::auth_routes;
use super::drills::drill_routes;
use super::health::health_check;
use super::rules::rule_routes;
use super::sessions::session_routes;
use crate::auth::AuthService;

pub fn create_routes(db: PgPool, jwt_secret: &str) -> Router {
    let auth_service = AuthService::new(db.clone(), jwt_secret);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/auth", auth_routes(auth_service.clone()))
        .nest(
            "/api/attendance",
            attendance_routes(db.clone(), auth_service.clone()),
        )
        .nest(
            "/api/sessions",
            session_routes(db.clone(), auth_service.clone()),
        )
        .nest("/api/rules", rule_routes(db.clone(), auth_service.clone()))
        .nest("/api/drills", drill_routes(db, auth_service))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
