use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    models::{follow::FollowRequest, session::CurrentUser, FeedQuery},
    repositories::{follow as follow_repo, user as user_repo},
    state::AppState,
};

pub async fn follow_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<FollowRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if payload.followed_user_id == current.user_id {
        return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
    }

    let target = user_repo::find_user_by_id(&state.pool, payload.followed_user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No user found with this id".to_string()))?;

    if !follow_repo::insert_follow(&state.pool, current.user_id, target.id).await? {
        return Err(AppError::Conflict("Already following this user".to_string()));
    }
    tracing::info!(follower = %current.user_id, followed = %target.id, "Follow created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Follow successful" })),
    ))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<FollowRequest>,
) -> Result<Json<Value>, AppError> {
    if !follow_repo::delete_follow(&state.pool, current.user_id, payload.followed_user_id).await? {
        return Err(AppError::NotFound("Not following this user".to_string()));
    }
    tracing::info!(follower = %current.user_id, unfollowed = %payload.followed_user_id, "Follow removed");

    Ok(Json(json!({ "message": "Unfollow successful" })))
}

/// One page of the users the viewer follows.
pub async fn following(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Value>, AppError> {
    let users = follow_repo::following_users(
        &state.pool,
        current.user_id,
        query.skip(),
        state.config.feed_page_size,
    )
    .await?;

    let message = if users.is_empty() {
        "No more users"
    } else {
        "Read success"
    };
    Ok(Json(json!({ "message": message, "data": users })))
}
