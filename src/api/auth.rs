use axum::{extract::State, response::Json, routing::post, Router};

use crate::auth::{AuthError, AuthResponse, AuthService, LoginRequest};

/// Authentication routes
pub fn auth_routes(auth_service: AuthService) -> Router {
    Router::new()
        .route("/login", post(login))
        .with_state(auth_service)
}

/// Login with email/password, returns a bearer token scoped to the user's
/// academy
#[tracing::instrument(skip(auth_service, request))]
async fn login(
    State(auth_service): State<AuthService>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AuthError> {
    let response = auth_service.login(request).await?;
    Ok(Json(response))
}
