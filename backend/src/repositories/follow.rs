//! Repository functions for the follow graph.

use sqlx::PgPool;

use crate::models::follow::FollowedUser;
use crate::types::UserId;

/// Adds a follow edge. Returns `false` when the edge already exists.
pub async fn insert_follow(
    pool: &PgPool,
    follower: UserId,
    followed: UserId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO follows (follower_id, followed_id, created_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (follower_id, followed_id) DO NOTHING
        "#,
    )
    .bind(follower)
    .bind(followed)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Removes a follow edge. Returns `false` when no such edge existed.
pub async fn delete_follow(
    pool: &PgPool,
    follower: UserId,
    followed: UserId,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND followed_id = $2")
        .bind(follower)
        .bind(followed)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// All user ids the given user follows; feeds the blog feed query.
pub async fn following_ids(pool: &PgPool, follower: UserId) -> Result<Vec<UserId>, sqlx::Error> {
    sqlx::query_scalar::<_, UserId>("SELECT followed_id FROM follows WHERE follower_id = $1")
        .bind(follower)
        .fetch_all(pool)
        .await
}

/// One page of the users the given user follows, most recent first.
pub async fn following_users(
    pool: &PgPool,
    follower: UserId,
    skip: i64,
    limit: i64,
) -> Result<Vec<FollowedUser>, sqlx::Error> {
    sqlx::query_as::<_, FollowedUser>(
        r#"
        SELECT u.id, u.name, u.username
        FROM follows f
        INNER JOIN users u ON u.id = f.followed_id
        WHERE f.follower_id = $1
        ORDER BY f.created_at DESC, u.id DESC
        OFFSET $2 LIMIT $3
        "#,
    )
    .bind(follower)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}
