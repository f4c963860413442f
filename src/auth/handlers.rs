use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, ProfileResponse, PublicUser, SignupRequest},
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    extract::Json,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .route("/user/profile", get(profile))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let name = payload.name.trim();
    if name.is_empty() {
        warn!("signup with empty name");
        return Err(ApiError::Validation("Name is required".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Exact-match lookup; the existing record is left untouched on conflict.
    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    // The lookup above races with concurrent signups; the unique index on
    // email is the backstop, so its violation is still a conflict, not a 500.
    let user = User::create(&state.db, name, &payload.email, &hash)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                warn!(email = %payload.email, "email already registered");
                ApiError::Conflict("Email already exists".into())
            } else {
                ApiError::Internal(e.into())
            }
        })?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user signed up");
    Ok(Json(AuthResponse {
        success: true,
        token,
        email: user.email,
        name: user.name,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    // Unknown email and bad password take the same rejection path so the
    // response never reveals which half of the pair was wrong.
    let user = match User::find_by_email(&state.db, &payload.email).await? {
        Some(u) => u,
        None => {
            warn!(email = %payload.email, "login unknown email");
            return Err(ApiError::Authentication(INVALID_CREDENTIALS.into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Authentication(INVALID_CREDENTIALS.into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        success: true,
        token,
        email: user.email,
        name: user.name,
    }))
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            // Valid signature but the subject is gone: treat as a stale token.
            warn!(user_id = %user_id, "token subject no longer exists");
            ApiError::Authentication("User not found".into())
        })?;

    Ok(Json(ProfileResponse {
        success: true,
        user: PublicUser {
            id: user.id,
            email: user.email,
            name: user.name,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation_accepts_plain_addresses() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.domain.io"));
    }

    #[test]
    fn email_validation_rejects_malformed() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("trailing@nodot"));
    }

    #[test]
    fn auth_response_serializes_flat_fields() {
        let response = AuthResponse {
            success: true,
            token: "abc.def.ghi".into(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["token"], "abc.def.ghi");
        assert_eq!(json["email"], "alice@example.com");
        assert_eq!(json["name"], "Alice");
    }
}
