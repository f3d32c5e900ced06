use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{extract_bearer_token, AuthError, AuthService, UserSession};
use crate::models::UserRole;

/// JWT authentication middleware. Verifies the bearer token and attaches the
/// resulting session to the request extensions.
pub async fn jwt_auth_middleware(
    State(auth_service): State<AuthService>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    let token = extract_bearer_token(auth_header)?;
    let session = auth_service.validate_session(token)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

fn session_from_request(request: &Request) -> Result<&UserSession, AuthError> {
    request
        .extensions()
        .get::<UserSession>()
        .ok_or(AuthError::InsufficientPermissions)
}

/// Athlete-only middleware
pub async fn athlete_only_middleware(request: Request, next: Next) -> Result<Response, AuthError> {
    let session = session_from_request(&request)?;

    if session.role != UserRole::Athlete {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Coach or Admin middleware
pub async fn coach_or_admin_middleware(
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let session = session_from_request(&request)?;

    if !matches!(session.role, UserRole::Coach | UserRole::Admin) {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}

/// Admin-only middleware
pub async fn admin_only_middleware(request: Request, next: Next) -> Result<Response, AuthError> {
    let session = session_from_request(&request)?;

    if session.role != UserRole::Admin {
        return Err(AuthError::InsufficientPermissions);
    }

    Ok(next.run(request).await)
}
