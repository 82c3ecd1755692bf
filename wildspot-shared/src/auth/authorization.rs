/// Ownership rules for campgrounds and reviews
///
/// Mutating a campground is reserved to its owner; deleting a review is
/// reserved to its author or the owner of the campground it belongs to.
/// Route handlers call these predicates after loading the resource and
/// before touching it.

use uuid::Uuid;

use crate::models::{campground::Campground, review::Review};

/// Error type for authorization checks
#[derive(Debug, thiserror::Error)]
pub enum AuthzError {
    /// Actor does not own the campground
    #[error("You do not have permission to do that")]
    NotOwner,

    /// Actor neither authored the review nor owns its campground
    #[error("You do not have permission to do that")]
    NotAuthorOrOwner,
}

/// Ensures `user_id` owns the campground
pub fn ensure_campground_owner(campground: &Campground, user_id: Uuid) -> Result<(), AuthzError> {
    if campground.owner_id == user_id {
        Ok(())
    } else {
        Err(AuthzError::NotOwner)
    }
}

/// Ensures `user_id` may delete the review
///
/// Allowed for the review's author and for the owner of the campground the
/// review is attached to.
pub fn ensure_review_author_or_owner(
    review: &Review,
    campground: &Campground,
    user_id: Uuid,
) -> Result<(), AuthzError> {
    if review.author_id == user_id || campground.owner_id == user_id {
        Ok(())
    } else {
        Err(AuthzError::NotAuthorOrOwner)
    }
}
