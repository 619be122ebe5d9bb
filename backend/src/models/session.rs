//! Models for server-side login sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::{SessionId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
/// Database representation of a login session. The row is the session:
/// logout deletes it outright, so a destroyed session cannot be told
/// apart from one that never existed.
pub struct Session {
    pub id: SessionId,
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub is_authenticated: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(
        user_id: UserId,
        email: String,
        username: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            email,
            username,
            is_authenticated: true,
            created_at: Utc::now(),
            expires_at,
        }
    }
}

/// Authenticated request context resolved by the session gate.
///
/// Constructed once per request and stored in request extensions;
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub email: String,
    pub username: String,
}

impl From<&Session> for CurrentUser {
    fn from(session: &Session) -> Self {
        CurrentUser {
            session_id: session.id,
            user_id: session.user_id,
            email: session.email.clone(),
            username: session.username.clone(),
        }
    }
}
