use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{UserResponse, UserRole};

/// JWT token claims. The engine never re-derives identity: it trusts the
/// (user, role, academy) triple the verified token carries.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    pub academy_id: Uuid,
    pub exp: usize,
    pub iat: usize,
}

/// Verified identity attached to a request.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub academy_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}
