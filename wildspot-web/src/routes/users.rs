/// User routes: registration, login, logout
///
/// # Endpoints
///
/// - `GET /register` - Registration form
/// - `POST /register` - Create an account and sign in
/// - `GET /login` - Login form
/// - `POST /login` - Authenticate and bind the session
/// - `POST /logout` - Unbind the session user
///
/// Login failures — unknown username and wrong password alike — produce one
/// generic flash message and a redirect back to the form, never an error
/// page, and never a hint about which half was wrong.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use maud::Markup;
use serde::Deserialize;
use validator::Validate;

use wildspot_shared::auth::credentials::{authenticate, CredentialError};
use wildspot_shared::auth::password::{hash_password, validate_password_strength};
use wildspot_shared::models::user::{CreateUser, User};

use crate::app::AppState;
use crate::error::{validate_form, AppError, AppResult, ValidationErrorDetail};
use crate::middleware::session::{PageContext, SessionHandle};
use crate::views;

/// Registration form payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    /// Desired username
    #[validate(length(min = 3, max = 30, message = "Username must be 3 to 30 characters"))]
    pub username: String,

    /// Contact email
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (strength checked separately)
    pub password: String,
}

/// Login form payload
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `GET /register`
pub async fn register_form(Extension(page): Extension<PageContext>) -> Markup {
    views::users::register_form(&page)
}

/// `POST /register`
///
/// Creates the account, signs the new user in, and redirects to the
/// campground index. A taken username flashes an error back to the form
/// instead of rendering a conflict page.
pub async fn register(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Response> {
    validate_form(&form)?;

    validate_password_strength(&form.password).map_err(|message| {
        AppError::Validation(vec![ValidationErrorDetail {
            field: "password".to_string(),
            message,
        }])
    })?;

    let password_hash = hash_password(&form.password)?;

    let created = User::create(
        &state.db,
        CreateUser {
            username: form.username,
            email: form.email,
            password_hash,
        },
    )
    .await;

    let user = match created {
        Ok(user) => user,
        Err(e) => match AppError::from(e) {
            AppError::Conflict(message) => {
                session.flash_error(&message).await?;
                return Ok(Redirect::to("/register").into_response());
            }
            other => return Err(other),
        },
    };

    session.sign_in(user.id).await?;
    session.flash_success("Welcome to Wildspot!").await?;

    tracing::info!(user_id = %user.id, username = %user.username, "New user registered");

    Ok(Redirect::to("/campgrounds").into_response())
}

/// `GET /login`
pub async fn login_form(Extension(page): Extension<PageContext>) -> Markup {
    views::users::login_form(&page)
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let user = match authenticate(&state.db, &form.username, &form.password).await {
        Ok(user) => user,
        Err(CredentialError::InvalidCredentials) => {
            session.flash_error("Invalid username or password").await?;
            return Ok(Redirect::to("/login").into_response());
        }
        Err(e) => return Err(AppError::Internal(format!("Login failed: {}", e))),
    };

    session.sign_in(user.id).await?;
    session.flash_success("Welcome back!").await?;

    // Return the user to the gated page that sent them here, if any
    let destination = session
        .take_return_to()
        .await?
        .unwrap_or_else(|| "/campgrounds".to_string());

    Ok(Redirect::to(&destination).into_response())
}

/// `POST /logout`
pub async fn logout(Extension(session): Extension<SessionHandle>) -> AppResult<Response> {
    session.sign_out().await?;
    session.flash_success("Goodbye!").await?;

    Ok(Redirect::to("/campgrounds").into_response())
}
