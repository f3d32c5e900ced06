use academy_engine::auth::{extract_bearer_token, AuthError, JwtService};
use academy_engine::models::{User, UserRole};
use assert_matches::assert_matches;
use chrono::Utc;
use pretty_assertions::assert_eq;
use uuid::Uuid;

fn demo_user() -> User {
    User {
        id: Uuid::new_v4(),
        academy_id: Uuid::new_v4(),
        email: "athlete1@elite.com".to_string(),
        password_hash: "irrelevant".to_string(),
        role: UserRole::Athlete,
        first_name: "Bobby".to_string(),
        last_name: "Ballplayer".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn token_carries_identity_and_tenant() {
    let jwt = JwtService::new("test-secret");
    let user = demo_user();

    let token = jwt.create_token(&user).expect("token");
    let session = jwt.extract_user_session(&token).expect("session");

    assert_eq!(session.user_id, user.id);
    assert_eq!(session.academy_id, user.academy_id);
    assert_eq!(session.role, UserRole::Athlete);
    assert_eq!(session.email, user.email);
}

#[test]
fn token_from_another_secret_is_rejected() {
    let user = demo_user();
    let token = JwtService::new("secret-a").create_token(&user).expect("token");

    let result = JwtService::new("secret-b").extract_user_session(&token);
    assert_matches!(result, Err(AuthError::InvalidToken));
}

#[test]
fn bearer_prefix_is_required() {
    assert_eq!(extract_bearer_token("Bearer abc").unwrap(), "abc");
    assert_matches!(
        extract_bearer_token("Token abc"),
        Err(AuthError::InvalidAuthHeaderFormat)
    );
}
