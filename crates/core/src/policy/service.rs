//! Centralized ownership and visibility decisions.

use opsdesk_shared::types::UserId;

use super::types::{Actor, Decision, Operation, Role};

/// Stateless policy deciding, per actor and record, whether an operation is
/// permitted.
pub struct OwnershipPolicy;

impl OwnershipPolicy {
    /// Checks an operation on an owned document (quote, invoice, work order).
    ///
    /// `owner` is the creating user for quotes/invoices and the assigned user
    /// for work orders. `delete_requires_admin` marks kinds whose deletion is
    /// admin-only regardless of ownership.
    #[must_use]
    pub fn check_owned(
        actor: &Actor,
        owner: UserId,
        operation: Operation,
        delete_requires_admin: bool,
    ) -> Decision {
        if actor.role == Role::Admin {
            return Decision::Allow;
        }

        match operation {
            Operation::Create | Operation::List => Decision::Allow,
            Operation::Delete => {
                if actor.id != owner {
                    // Not theirs: indistinguishable from absent.
                    Decision::Hidden
                } else if delete_requires_admin {
                    Decision::Denied
                } else {
                    Decision::Allow
                }
            }
            Operation::Read
            | Operation::Update
            | Operation::Transition
            | Operation::Adjust
            | Operation::Reorder => {
                if actor.id == owner {
                    Decision::Allow
                } else {
                    Decision::Hidden
                }
            }
        }
    }

    /// Checks an operation on a shared record (customer, inventory item).
    ///
    /// Shared records have no owner: members may read and update them, but
    /// deletion may be reserved for admins.
    #[must_use]
    pub fn check_shared(
        actor: &Actor,
        operation: Operation,
        delete_requires_admin: bool,
    ) -> Decision {
        if actor.role == Role::Admin {
            return Decision::Allow;
        }

        match operation {
            Operation::Delete if delete_requires_admin => Decision::Denied,
            _ => Decision::Allow,
        }
    }

    /// Returns the owner filter a list operation must apply for this actor.
    ///
    /// `None` means unrestricted (admin); `Some(id)` means only records owned
    /// by `id` are visible.
    #[must_use]
    pub fn list_scope(actor: &Actor) -> Option<UserId> {
        match actor.role {
            Role::Admin => None,
            Role::Member => Some(actor.id),
        }
    }
}
