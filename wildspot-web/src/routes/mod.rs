/// Route handlers, organized by resource
///
/// - `home`: landing page
/// - `users`: register, login, logout
/// - `campgrounds`: listing CRUD
/// - `reviews`: review create/delete under a campground
///
/// Handlers return `Result<_, AppError>` and rely on the session middleware
/// having populated request extensions with the [`PageContext`] and
/// [`SessionHandle`].
///
/// [`PageContext`]: crate::middleware::session::PageContext
/// [`SessionHandle`]: crate::middleware::session::SessionHandle

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::error::AppError;

pub mod campgrounds;
pub mod home;
pub mod reviews;
pub mod users;

/// Parses a path segment as a resource ID
///
/// Malformed IDs cannot refer to anything, so they render as a 404 for the
/// named resource rather than a bare parser error.
pub(crate) fn parse_id(raw: &str, resource: &str) -> Result<Uuid, AppError> {
    raw.parse::<Uuid>()
        .map_err(|_| AppError::NotFound(format!("{} not found", resource)))
}

/// Deserializes an optional form field, mapping "" to None
///
/// Browsers submit empty inputs as empty strings; optional fields treat
/// those as absent.
pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_uuids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "Campground").unwrap(), id);
    }

    #[test]
    fn test_parse_id_rejects_garbage_as_not_found() {
        let err = parse_id("not-a-uuid", "Campground").unwrap_err();
        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "Campground not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
