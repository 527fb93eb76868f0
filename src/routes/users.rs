// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account routes: registration, login, logout and profile.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, AuthUser, SESSION_COOKIE};
use crate::models::{Goals, User};
use crate::routes::json_body;
use crate::services::password;
use crate::AppState;

const MISSING_FIELDS: &str = "Please enter all fields";

pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/logout", post(logout))
}

pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/me", get(get_me))
}

// ─── Request / Response Types ────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Username must be 1-50 characters"))]
    pub username: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 256, message = "Password must be 1-256 characters"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of a user record.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub register_date: DateTime<Utc>,
    pub goals: Goals,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();
    messages.sort();
    if messages.is_empty() {
        "Invalid registration details".to_string()
    } else {
        messages.join("; ")
    }
}

/// Issue a session: signed token in the body and in an HttpOnly cookie.
fn start_session(state: &AppState, jar: CookieJar, user: &User) -> Result<(CookieJar, Json<AuthResponse>)> {
    let token = create_jwt(
        &user.id,
        &state.config.jwt_signing_key,
        state.config.jwt_ttl_secs,
    )?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(!state.config.is_local_frontend())
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.config.jwt_ttl_secs as i64));

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            token,
            user: PublicUser {
                id: user.id.clone(),
                username: user.username.clone(),
                email: user.email.clone(),
            },
        }),
    ))
}

// ─── Handlers ────────────────────────────────────────────────

/// Register a new user and start a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let mut request = json_body(payload)?;
    request.username = request.username.trim().to_string();
    request.email = normalize_email(&request.email);

    if request.username.is_empty() || request.email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    }
    request
        .validate()
        .map_err(|e| AppError::BadRequest(validation_message(&e)))?;

    if state.db.find_user_by_email(&request.email).await?.is_some()
        || state
            .db
            .find_user_by_username(&request.username)
            .await?
            .is_some()
    {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let plaintext = request.password;
    let stored = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))??;

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: request.username,
        email: request.email,
        password: stored,
        register_date: state.clock.now(),
        goals: Goals::default(),
    };

    state.db.insert_user(&user).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    start_session(&state, jar, &user)
}

/// Log in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let request = json_body(payload)?;
    let email = normalize_email(&request.email);

    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(MISSING_FIELDS.to_string()));
    }

    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::BadRequest("User does not exist".to_string()))?;

    let stored = user.password.clone();
    let plaintext = request.password;
    let matches =
        tokio::task::spawn_blocking(move || password::verify_password(&plaintext, &stored))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Password check task failed: {}", e))
            })?;

    if !matches {
        tracing::info!(user_id = %user.id, "Rejected login with wrong password");
        return Err(AppError::BadRequest("Invalid credentials".to_string()));
    }

    tracing::info!(user_id = %user.id, "User logged in");
    start_session(&state, jar, &user)
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}

/// Current user's profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .db
        .find_user_by_id(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(ProfileResponse {
        id: profile.id,
        username: profile.username,
        email: profile.email,
        register_date: profile.register_date,
        goals: profile.goals,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn test_register_validation_rejects_bad_email() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "not-an-email".to_string(),
            password: "secret".to_string(),
        };

        let errors = request.validate().unwrap_err();
        assert_eq!(validation_message(&errors), "Please enter a valid email");
    }

    #[test]
    fn test_register_validation_accepts_good_input() {
        let request = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
        };

        assert!(request.validate().is_ok());
    }
}
