//! Mutation authorization for owned resources.
//!
//! Pure decisions over `(acting user, owner, creation time, kind)`:
//! ownership is checked first, then the edit window. No side effects,
//! so the rules are unit-tested directly.

use chrono::{DateTime, Duration, Utc};

use crate::error::AppError;
use crate::types::UserId;

/// Edits are only allowed this long after creation. Deletes are not
/// time-boxed.
pub const EDIT_WINDOW_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Edit,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    NotOwner,
    EditWindowExpired,
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::NotOwner => "Not the owner of this blog",
            Denial::EditWindowExpired => {
                "Not allowed to edit after 30 minutes of creation"
            }
        }
    }
}

impl From<Denial> for AppError {
    fn from(denial: Denial) -> Self {
        AppError::Forbidden(denial.reason().to_string())
    }
}

/// Decides whether `acting` may mutate a resource owned by `owner`
/// that was created at `created_at`, evaluated against `now`.
pub fn authorize_mutation_at(
    acting: UserId,
    owner: UserId,
    created_at: DateTime<Utc>,
    kind: MutationKind,
    now: DateTime<Utc>,
) -> Result<(), Denial> {
    if acting != owner {
        return Err(Denial::NotOwner);
    }

    if kind == MutationKind::Edit && now - created_at > Duration::minutes(EDIT_WINDOW_MINUTES) {
        return Err(Denial::EditWindowExpired);
    }

    Ok(())
}

/// [`authorize_mutation_at`] evaluated against the current time.
pub fn authorize_mutation(
    acting: UserId,
    owner: UserId,
    created_at: DateTime<Utc>,
    kind: MutationKind,
) -> Result<(), Denial> {
    authorize_mutation_at(acting, owner, created_at, kind, Utc::now())
}
