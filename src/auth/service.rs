use sqlx::PgPool;
use tracing::info;

use crate::auth::{AuthError, AuthResponse, JwtService, LoginRequest, UserSession};
use crate::models::User;

/// Credential verification collaborator. Issues tokens on login and turns
/// bearer tokens back into (user, role, academy) sessions.
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    jwt: JwtService,
}

impl AuthService {
    pub fn new(db: PgPool, jwt_secret: &str) -> Self {
        Self {
            db,
            jwt: JwtService::new(jwt_secret),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, academy_id, email, password_hash, role, first_name, last_name,
                    created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&request.email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(&request.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.create_token(&user)?;

        info!("User {} logged in", user.id);

        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub fn validate_session(&self, token: &str) -> Result<UserSession, AuthError> {
        self.jwt.extract_user_session(token)
    }
}
