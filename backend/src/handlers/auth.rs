use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::time::Duration as StdDuration;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        session::{CurrentUser, Session},
        user::{LoginRequest, RegisterRequest, User, UserResponse},
    },
    repositories::{session as session_repo, user as user_repo},
    state::AppState,
    utils::{
        cookies::{build_clear_session_cookie, build_session_cookie},
        password::{hash_password, verify_password},
    },
};

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;

    if user_repo::email_or_username_taken(&state.pool, &payload.email, &payload.username).await? {
        return Err(AppError::Conflict(
            "Email or username already registered".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = User::new(payload.name, payload.email, payload.username, password_hash);
    user_repo::create_user(&state.pool, &user).await?;
    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Register successful",
            "data": UserResponse::from(user),
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.login_id.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Missing credentials".to_string()));
    }

    let user = user_repo::find_user_by_login_id(&state.pool, &payload.login_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid login id or password".to_string()))?;

    if !verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Unauthorized(
            "Invalid login id or password".to_string(),
        ));
    }

    let ttl = Duration::hours(state.config.session_ttl_hours);
    let session = Session::new(
        user.id,
        user.email.clone(),
        user.username.clone(),
        Utc::now() + ttl,
    );
    session_repo::create_session(&state.pool, &session).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    let cookie = build_session_cookie(
        &session.id.to_string(),
        StdDuration::from_secs(ttl.num_seconds().max(0) as u64),
        state.config.cookie_secure,
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "message": "Login successful",
            "data": UserResponse::from(user),
        })),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, AppError> {
    session_repo::delete_session(&state.pool, current.session_id).await?;
    tracing::info!(user_id = %current.user_id, "User logged out");

    Ok((
        StatusCode::OK,
        [(
            header::SET_COOKIE,
            build_clear_session_cookie(state.config.cookie_secure),
        )],
        Json(json!({ "message": "Logout successful" })),
    ))
}
