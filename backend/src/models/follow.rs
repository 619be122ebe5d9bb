//! Models for the directed follow relation between users.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::UserId;

#[derive(Debug, Deserialize)]
/// Payload for follow/unfollow requests.
pub struct FollowRequest {
    pub followed_user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Row returned when listing the users someone follows.
pub struct FollowedUser {
    pub id: UserId,
    pub name: String,
    pub username: String,
}
