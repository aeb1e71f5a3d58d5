//! Single-owner access rule for account-scoped resources.

use crate::account::models::AccountId;

/// A resource bound to exactly one account at creation.
pub trait OwnedResource {
    fn owner(&self) -> AccountId;
}

/// Attempted access to a resource owned by someone else.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Account {requester} does not own this resource")]
pub struct NotOwner {
    pub requester: AccountId,
}

/// Verify that `requester` owns `resource`.
pub fn ensure_owned_by<R: OwnedResource>(resource: &R, requester: &AccountId) -> Result<(), NotOwner> {
    if resource.owner() == *requester {
        Ok(())
    } else {
        Err(NotOwner {
            requester: *requester,
        })
    }
}
