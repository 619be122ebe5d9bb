use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use crate::{
    authz::{self, MutationKind},
    error::AppError,
    models::{
        blog::{Blog, BlogData, DeleteBlogRequest, EditBlogRequest},
        session::CurrentUser,
        FeedQuery,
    },
    repositories::{blog as blog_repo, follow as follow_repo},
    state::AppState,
};

pub async fn create_blog(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<BlogData>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    payload.validate()?;

    let blog = Blog::new(payload.title, payload.text_body, current.user_id);
    blog_repo::create_blog(&state.pool, &blog).await?;
    tracing::info!(blog_id = %blog.id, user_id = %current.user_id, "Blog created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Blog created successfully",
            "data": blog,
        })),
    ))
}

/// Feed of blogs by the authors the viewer follows.
pub async fn get_blogs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Value>, AppError> {
    let authors = follow_repo::following_ids(&state.pool, current.user_id).await?;
    let blogs = blog_repo::feed_for_authors(
        &state.pool,
        &authors,
        query.skip(),
        state.config.feed_page_size,
    )
    .await?;

    Ok(Json(feed_page(blogs)))
}

/// The viewer's own blogs, same pagination mechanics as the feed.
pub async fn my_blogs(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Value>, AppError> {
    let blogs = blog_repo::feed_for_owner(
        &state.pool,
        current.user_id,
        query.skip(),
        state.config.feed_page_size,
    )
    .await?;

    Ok(Json(feed_page(blogs)))
}

pub async fn edit_blog(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<EditBlogRequest>,
) -> Result<Json<Value>, AppError> {
    payload.data.validate()?;

    let blog = fetch_visible_blog(&state, &payload.blog_id).await?;
    authz::authorize_mutation(current.user_id, blog.user_id, blog.created_at, MutationKind::Edit)?;

    let previous = blog_repo::update_blog_returning_previous(
        &state.pool,
        blog.id,
        &payload.data.title,
        &payload.data.text_body,
    )
    .await?
    .ok_or_else(|| AppError::NotFound("No blog found with this id".to_string()))?;
    tracing::info!(blog_id = %blog.id, user_id = %current.user_id, "Blog edited");

    Ok(Json(json!({
        "message": "Blog updated successfully",
        "data": previous,
    })))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(payload): Json<DeleteBlogRequest>,
) -> Result<Json<Value>, AppError> {
    let blog = fetch_visible_blog(&state, &payload.blog_id).await?;
    authz::authorize_mutation(
        current.user_id,
        blog.user_id,
        blog.created_at,
        MutationKind::Delete,
    )?;

    let previous = blog_repo::soft_delete_returning_previous(&state.pool, blog.id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("No blog found with this id".to_string()))?;
    tracing::info!(blog_id = %blog.id, user_id = %current.user_id, "Blog deleted");

    Ok(Json(json!({
        "message": "Delete successful",
        "data": previous,
    })))
}

/// Looks up a blog for mutation. Soft-deleted blogs are treated as
/// missing, like everywhere else on the read path.
async fn fetch_visible_blog(
    state: &AppState,
    blog_id: &crate::types::BlogId,
) -> Result<Blog, AppError> {
    let blog = blog_repo::find_blog_by_id(&state.pool, *blog_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No blog found with this id".to_string()))?;
    if blog.is_deleted {
        return Err(AppError::NotFound("No blog found with this id".to_string()));
    }
    Ok(blog)
}

/// An empty page is the "no more blogs" signal, not an error.
fn feed_page(blogs: Vec<Blog>) -> Value {
    let message = if blogs.is_empty() {
        "No more blogs"
    } else {
        "Read success"
    };
    json!({ "message": message, "data": blogs })
}
