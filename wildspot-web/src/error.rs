/// Error handling for the web server
///
/// This module provides a unified error type that maps to rendered HTML
/// error pages. All handlers return `Result<T, AppError>` and let failures
/// bubble with `?`; there is no per-route recovery logic.
///
/// # Taxonomy
///
/// - `NotFound` (404): unmatched routes and missing resources
/// - `Validation` (400): typed form validation failures
/// - `Forbidden` (403): ownership checks
/// - `Conflict` (409): duplicate username
/// - `Internal` (500): anything else; the cause is logged, the client sees
///   a generic message
///
/// # Example
///
/// ```no_run
/// use wildspot_web::error::{AppError, AppResult};
/// use maud::Markup;
///
/// async fn handler() -> AppResult<Markup> {
///     Err(AppError::NotFound("Page Not Found".to_string()))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use crate::views;

/// Handler result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Message shown for 500s; the real cause goes to the log only
const GENERIC_ERROR_MESSAGE: &str = "Oh no, something went wrong";

/// Unified application error type
#[derive(Debug)]
pub enum AppError {
    /// Resource or route not found (404)
    NotFound(String),

    /// Form validation failed (400)
    Validation(Vec<ValidationErrorDetail>),

    /// Actor lacks permission for the resource (403)
    Forbidden(String),

    /// Uniqueness conflict, e.g. duplicate username (409)
    Conflict(String),

    /// Internal server error (500)
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// User-facing message
    pub message: String,
}

impl AppError {
    /// 404 with the stock page-not-found message
    pub fn page_not_found() -> Self {
        AppError::NotFound("Page Not Found".to_string())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::Validation(errors) => {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "{}", joined.join(", "))
            }
            AppError::Forbidden(msg) => write!(f, "{}", msg),
            AppError::Conflict(msg) => write!(f, "{}", msg),
            AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Internal causes are logged, never shown
        let message = match &self {
            AppError::Internal(cause) => {
                tracing::error!("Internal error: {}", cause);
                GENERIC_ERROR_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        let body = views::error::render(status, &message);

        (status, body).into_response()
    }
}

/// Convert sqlx errors to application errors
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("username") {
                        return AppError::Conflict("That username is already taken".to_string());
                    }
                    return AppError::Conflict(format!("Constraint violation: {}", constraint));
                }

                AppError::Internal(format!("Database error: {}", db_err))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to application errors
impl From<wildspot_shared::auth::password::PasswordError> for AppError {
    fn from(err: wildspot_shared::auth::password::PasswordError) -> Self {
        AppError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert ownership failures to application errors
impl From<wildspot_shared::auth::authorization::AuthzError> for AppError {
    fn from(err: wildspot_shared::auth::authorization::AuthzError) -> Self {
        AppError::Forbidden(err.to_string())
    }
}

/// Runs validator-derived checks on a form payload
///
/// Collects every field failure into `AppError::Validation`, rejecting the
/// request with a 400 page before the handler body runs any queries.
pub fn validate_form<T: validator::Validate>(form: &T) -> Result<(), AppError> {
    form.validate().map_err(|e| {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        AppError::Validation(errors)
    })
}
