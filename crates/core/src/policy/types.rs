//! Policy domain types.

use opsdesk_shared::types::UserId;
use opsdesk_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Role of an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Office staff: unrestricted access.
    Admin,
    /// Field technician: restricted to own records.
    Member,
}

/// The authenticated actor behind a request.
///
/// Supplied by the external authentication layer after verifying a signed,
/// time-limited credential. This core never sees credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The user's ID.
    pub id: UserId,
    /// The user's role.
    pub role: Role,
}

impl Actor {
    /// Creates an admin actor.
    #[must_use]
    pub const fn admin(id: UserId) -> Self {
        Self {
            id,
            role: Role::Admin,
        }
    }

    /// Creates a member actor.
    #[must_use]
    pub const fn member(id: UserId) -> Self {
        Self {
            id,
            role: Role::Member,
        }
    }

    /// Returns true if the actor is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// The operation an actor is attempting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// List records.
    List,
    /// Read a single record.
    Read,
    /// Create a record.
    Create,
    /// Update a record's fields.
    Update,
    /// Delete a record.
    Delete,
    /// Change a document's status.
    Transition,
    /// Adjust an inventory quantity.
    Adjust,
    /// Move a work order in the queue.
    Reorder,
}

/// Outcome of a policy check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The operation may proceed.
    Allow,
    /// The record is outside the actor's visibility; surface as `NotFound`.
    Hidden,
    /// The actor can see the record but the action is denied; surface as
    /// `Forbidden`.
    Denied,
}

impl Decision {
    /// Converts the decision into a result, using `what` in error messages.
    pub fn into_result(self, what: &str) -> AppResult<()> {
        match self {
            Self::Allow => Ok(()),
            Self::Hidden => Err(AppError::NotFound(what.to_string())),
            Self::Denied => Err(AppError::Forbidden(format!(
                "operation not permitted on {what}"
            ))),
        }
    }
}
