//! Repository functions for blog posts and the feed read path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::blog::Blog;
use crate::types::{BlogId, UserId};

const BLOG_COLUMNS: &str = "id, title, text_body, user_id, created_at, is_deleted, deleted_at";

pub async fn create_blog(pool: &PgPool, blog: &Blog) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO blogs (id, title, text_body, user_id, created_at, is_deleted, deleted_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(blog.id)
    .bind(&blog.title)
    .bind(&blog.text_body)
    .bind(blog.user_id)
    .bind(blog.created_at)
    .bind(blog.is_deleted)
    .bind(blog.deleted_at)
    .execute(pool)
    .await
    .map(|_| ())
}

/// Fetches a blog regardless of deletion state. Mutation handlers need
/// the raw row to run ownership checks before reporting anything.
pub async fn find_blog_by_id(pool: &PgPool, blog_id: BlogId) -> Result<Option<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(&format!(
        "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"
    ))
    .bind(blog_id)
    .fetch_optional(pool)
    .await
}

/// One page of the followed-authors feed: newest first, ties broken by
/// id so repeated reads return identical ordering.
pub async fn feed_for_authors(
    pool: &PgPool,
    authors: &[UserId],
    skip: i64,
    limit: i64,
) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(&format!(
        r#"
        SELECT {BLOG_COLUMNS}
        FROM blogs
        WHERE user_id = ANY($1) AND is_deleted = FALSE
        ORDER BY created_at DESC, id DESC
        OFFSET $2 LIMIT $3
        "#
    ))
    .bind(authors)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// One page of the viewer's own blogs, same ordering as the feed.
pub async fn feed_for_owner(
    pool: &PgPool,
    owner: UserId,
    skip: i64,
    limit: i64,
) -> Result<Vec<Blog>, sqlx::Error> {
    sqlx::query_as::<_, Blog>(&format!(
        r#"
        SELECT {BLOG_COLUMNS}
        FROM blogs
        WHERE user_id = $1 AND is_deleted = FALSE
        ORDER BY created_at DESC, id DESC
        OFFSET $2 LIMIT $3
        "#
    ))
    .bind(owner)
    .bind(skip)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Applies an edit and returns the pre-edit snapshot, or `None` if the
/// blog does not exist.
pub async fn update_blog_returning_previous(
    pool: &PgPool,
    blog_id: BlogId,
    title: &str,
    text_body: &str,
) -> Result<Option<Blog>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let previous = sqlx::query_as::<_, Blog>(&format!(
        "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1 FOR UPDATE"
    ))
    .bind(blog_id)
    .fetch_optional(&mut *tx)
    .await?;

    if previous.is_some() {
        sqlx::query("UPDATE blogs SET title = $1, text_body = $2 WHERE id = $3")
            .bind(title)
            .bind(text_body)
            .bind(blog_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(previous)
}

/// Marks a blog deleted and returns the pre-delete snapshot. The row
/// stays in storage; reads filter on `is_deleted`.
pub async fn soft_delete_returning_previous(
    pool: &PgPool,
    blog_id: BlogId,
    deleted_at: DateTime<Utc>,
) -> Result<Option<Blog>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let previous = sqlx::query_as::<_, Blog>(&format!(
        "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1 FOR UPDATE"
    ))
    .bind(blog_id)
    .fetch_optional(&mut *tx)
    .await?;

    if previous.is_some() {
        sqlx::query("UPDATE blogs SET is_deleted = TRUE, deleted_at = $1 WHERE id = $2")
            .bind(deleted_at)
            .bind(blog_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(previous)
}
