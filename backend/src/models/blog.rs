//! Models for blog posts and their request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::types::{BlogId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a blog post.
///
/// Deleted posts stay in storage with `is_deleted` set; every read path
/// filters them out.
pub struct Blog {
    pub id: BlogId,
    pub title: String,
    pub text_body: String,
    /// Owner of the post; immutable after creation.
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Blog {
    pub fn new(title: String, text_body: String, user_id: UserId) -> Self {
        Self {
            id: BlogId::new(),
            title,
            text_body,
            user_id,
            created_at: Utc::now(),
            is_deleted: false,
            deleted_at: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Title and body shared by create and edit payloads.
pub struct BlogData {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub text_body: String,
}

#[derive(Debug, Deserialize)]
/// Payload for editing an existing blog post.
pub struct EditBlogRequest {
    pub blog_id: BlogId,
    pub data: BlogData,
}

#[derive(Debug, Deserialize)]
/// Payload for deleting a blog post.
pub struct DeleteBlogRequest {
    pub blog_id: BlogId,
}
