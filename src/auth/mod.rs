// Authentication and tenant-scoping collaborator

pub mod errors;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod service;

pub use errors::AuthError;
pub use jwt::{extract_bearer_token, JwtService};
pub use middleware::{
    admin_only_middleware, athlete_only_middleware, coach_or_admin_middleware, jwt_auth_middleware,
};
pub use models::{AuthResponse, Claims, LoginRequest, UserSession};
pub use service::AuthService;
