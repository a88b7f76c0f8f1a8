//! Authentication service: registration and login flows over `libris_core::auth`.

use sqlx::SqlitePool;
use tracing::{info, warn};

use libris_core::auth::jwt::TokenIssuer;
use libris_core::auth::password::{hash_password, verify_password};
use libris_core::auth::{AuthError, queries};
use libris_core::models::auth::{IssuedToken, UserRecord};

use crate::error::AppResult;
use crate::models::AuthResponse;

/// Maximum username length in characters.
pub const MAX_USERNAME_LEN: usize = 50;

/// Register a new account and sign the user in.
///
/// Both uniqueness checks run before anything is hashed or written.
pub async fn register(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    username: &str,
    email: &str,
    password: &str,
) -> AppResult<AuthResponse> {
    validate_registration(username, email, password)?;

    if queries::username_exists(pool, username).await? {
        warn!(username, "registration rejected: username taken");
        return Err(AuthError::DuplicateUsername.into());
    }
    if queries::email_exists(pool, email).await? {
        warn!(username, "registration rejected: email taken");
        return Err(AuthError::DuplicateEmail.into());
    }

    let pw_hash = hash_password(password)?;
    let user = queries::create_user(pool, username, email, &pw_hash).await?;
    let issued = tokens.issue(user.id, &user.username, &user.email)?;

    info!(user_id = user.id, username = %user.username, "user registered");
    Ok(build_auth_response(&user, issued))
}

/// Authenticate with username + password. Issues a fresh token on every call.
///
/// Unknown usernames and wrong passwords produce the same error.
pub async fn login(
    pool: &SqlitePool,
    tokens: &TokenIssuer,
    username: &str,
    password: &str,
) -> AppResult<AuthResponse> {
    let user = match queries::find_user_by_username(pool, username).await? {
        Some(user) if verify_password(password, &user.password_hash) => user,
        _ => {
            warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = tokens.issue(user.id, &user.username, &user.email)?;

    info!(user_id = user.id, username = %user.username, "user logged in");
    Ok(build_auth_response(&user, issued))
}

fn build_auth_response(user: &UserRecord, issued: IssuedToken) -> AuthResponse {
    AuthResponse {
        token: issued.token,
        username: user.username.clone(),
        email: user.email.clone(),
        expires_at: issued.expires_at,
    }
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::Validation("Username is required".into()));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AuthError::Validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if email.trim().is_empty() {
        return Err(AuthError::Validation("Email is required".into()));
    }
    if !is_valid_email(email) {
        return Err(AuthError::Validation("Email is not a valid email address".into()));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".into()));
    }
    Ok(())
}

/// Exactly one `@`, with something on both sides and no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use libris_core::auth::jwt::{DEFAULT_AUDIENCE, DEFAULT_ISSUER};

    async fn setup() -> (SqlitePool, TokenIssuer) {
        let pool = libris_core::db::in_memory().await.unwrap();
        libris_core::migrate::migrate(&pool).await.unwrap();
        let tokens = TokenIssuer::new(b"test-secret", DEFAULT_ISSUER, DEFAULT_AUDIENCE);
        (pool, tokens)
    }

    #[test]
    fn email_syntax() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("ax.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@"));
        assert!(!is_valid_email("a@b@c"));
        assert!(!is_valid_email("a b@x.com"));
    }

    #[test]
    fn registration_input_rules() {
        assert!(validate_registration("alice", "a@x.com", "pw").is_ok());
        assert!(validate_registration("", "a@x.com", "pw").is_err());
        assert!(validate_registration(&"a".repeat(50), "a@x.com", "pw").is_ok());
        assert!(validate_registration(&"a".repeat(51), "a@x.com", "pw").is_err());
        assert!(validate_registration("alice", "not-an-email", "pw").is_err());
        assert!(validate_registration("alice", "a@x.com", "").is_err());
    }

    #[tokio::test]
    async fn register_then_login_yields_token_for_same_user() {
        let (pool, tokens) = setup().await;
        let registered = register(&pool, &tokens, "alice", "a@x.com", "rightpw")
            .await
            .unwrap();
        assert_eq!(registered.username, "alice");
        assert_eq!(registered.email, "a@x.com");

        let user = queries::find_user_by_username(&pool, "alice")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(user.password_hash, "rightpw");

        let logged_in = login(&pool, &tokens, "alice", "rightpw").await.unwrap();
        let claims = tokens.validate(&logged_in.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "alice");
    }

    #[tokio::test]
    async fn duplicate_username_and_email_are_rejected() {
        let (pool, tokens) = setup().await;
        register(&pool, &tokens, "alice", "a@x.com", "pw").await.unwrap();

        let dup_name = register(&pool, &tokens, "alice", "other@x.com", "pw").await;
        match dup_name {
            Err(AppError::Duplicate(msg)) => assert_eq!(msg, "Username already exists"),
            other => panic!("unexpected: {other:?}"),
        }

        let dup_email = register(&pool, &tokens, "bob", "a@x.com", "pw").await;
        match dup_email {
            Err(AppError::Duplicate(msg)) => assert_eq!(msg, "Email already exists"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let (pool, tokens) = setup().await;
        register(&pool, &tokens, "alice", "a@x.com", "rightpw")
            .await
            .unwrap();

        let wrong_pw = login(&pool, &tokens, "alice", "wrongpw").await.unwrap_err();
        let no_user = login(&pool, &tokens, "nosuchuser", "anything")
            .await
            .unwrap_err();
        assert!(matches!(wrong_pw, AppError::Unauthorized(_)));
        assert_eq!(wrong_pw.to_string(), no_user.to_string());
    }

    #[tokio::test]
    async fn every_login_issues_a_fresh_token() {
        let (pool, tokens) = setup().await;
        register(&pool, &tokens, "alice", "a@x.com", "pw").await.unwrap();

        let first = login(&pool, &tokens, "alice", "pw").await.unwrap();
        let second = login(&pool, &tokens, "alice", "pw").await.unwrap();
        assert!(tokens.validate(&first.token).is_ok());
        assert!(tokens.validate(&second.token).is_ok());
    }
}
