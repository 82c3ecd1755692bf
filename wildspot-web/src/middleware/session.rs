/// Cookie-backed sessions and flash messages
///
/// Every page request passes through [`session_layer`]:
///
/// 1. The `session` cookie token (if any) is hashed and looked up; expired
///    or unknown tokens start a fresh anonymous session.
/// 2. The signed-in user (if any) is loaded, and pending flash messages are
///    taken — read and cleared — so a message queued by the previous request
///    renders exactly once.
/// 3. A [`SessionHandle`] (for mutating the session) and a [`PageContext`]
///    (current user + flash, for views) are inserted into request
///    extensions.
/// 4. If a fresh session was started, the response gains a `Set-Cookie`
///    header: HTTP-only, `SameSite=Lax`, 7-day `Max-Age`, `Secure` in
///    production.
///
/// [`RequireUser`] gates protected routes: anonymous requests get an error
/// flash, their path recorded for post-login return, and a redirect to
/// `/login`.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::PgPool;
use uuid::Uuid;

use wildspot_shared::auth::token::{generate_session_token, hash_session_token};
use wildspot_shared::models::session::{FlashKind, FlashMessages, Session};
use wildspot_shared::models::user::User;

use crate::app::AppState;
use crate::config::{SESSION_COOKIE_NAME, SESSION_TTL_DAYS};
use crate::error::AppError;

/// Handle for mutating the current session from handlers
#[derive(Clone)]
pub struct SessionHandle {
    session_id: Uuid,
    db: PgPool,
}

impl SessionHandle {
    /// Queues a success flash message for the next request
    pub async fn flash_success(&self, message: &str) -> Result<(), AppError> {
        Session::append_flash(&self.db, self.session_id, FlashKind::Success, message).await?;
        Ok(())
    }

    /// Queues an error flash message for the next request
    pub async fn flash_error(&self, message: &str) -> Result<(), AppError> {
        Session::append_flash(&self.db, self.session_id, FlashKind::Error, message).await?;
        Ok(())
    }

    /// Binds a user to the session (login / post-registration)
    pub async fn sign_in(&self, user_id: Uuid) -> Result<(), AppError> {
        Session::bind_user(&self.db, self.session_id, user_id).await?;
        Ok(())
    }

    /// Removes the user binding (logout)
    pub async fn sign_out(&self) -> Result<(), AppError> {
        Session::unbind_user(&self.db, self.session_id).await?;
        Ok(())
    }

    /// Records the path to return to after login
    pub async fn remember_return_to(&self, path: &str) -> Result<(), AppError> {
        Session::set_return_to(&self.db, self.session_id, path).await?;
        Ok(())
    }

    /// Reads and clears the recorded return path
    pub async fn take_return_to(&self) -> Result<Option<String>, AppError> {
        let path = Session::take_return_to(&self.db, self.session_id).await?;
        Ok(path)
    }
}

/// Per-request view context: the current user and any pending flash messages
///
/// Inserted into request extensions by [`session_layer`] and handed to every
/// rendered view.
#[derive(Clone)]
pub struct PageContext {
    /// Signed-in user, None for anonymous requests
    pub current_user: Option<User>,

    /// Flash messages taken from the session for this render
    pub flash: FlashMessages,
}

/// Extractor gating a route on a signed-in user
///
/// Succeeds with the current user when the session is authenticated.
/// Otherwise the rejection flashes an error, records the path (for GETs) so
/// login can return the user, and redirects to `/login`.
///
/// # Example
///
/// ```ignore
/// async fn new_form(RequireUser(user): RequireUser) -> Markup { /* ... */ }
/// ```
pub struct RequireUser(pub User);

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current_user = parts
            .extensions
            .get::<PageContext>()
            .and_then(|page| page.current_user.clone());

        if let Some(user) = current_user {
            return Ok(RequireUser(user));
        }

        if let Some(handle) = parts.extensions.get::<SessionHandle>().cloned() {
            if parts.method == Method::GET {
                handle
                    .remember_return_to(parts.uri.path())
                    .await
                    .map_err(|e| e.into_response())?;
            }
            handle
                .flash_error("You must be signed in first")
                .await
                .map_err(|e| e.into_response())?;
        }

        Err(Redirect::to("/login").into_response())
    }
}

/// Reads a cookie value from the request headers
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Builds the Set-Cookie value for a freshly issued session token
fn session_cookie(token: &str, secure: bool) -> String {
    let max_age = SESSION_TTL_DAYS * 24 * 60 * 60;
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE_NAME, token, max_age
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

/// Middleware entry point: resolve (or start) the session for this request
pub async fn session_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let secret = state.session_secret();

    // Resolve the presented token to a live session, if possible
    let presented = match cookie_value(req.headers(), SESSION_COOKIE_NAME) {
        Some(token) => {
            let token_hash = hash_session_token(secret, &token);
            Session::find_active_by_token_hash(&state.db, &token_hash).await?
        }
        None => None,
    };

    // Otherwise start a fresh anonymous session and issue its cookie below
    let (session, issued_token) = match presented {
        Some(session) => (session, None),
        None => {
            let (token, token_hash) = generate_session_token(secret);
            let session = Session::create(&state.db, &token_hash, SESSION_TTL_DAYS).await?;
            (session, Some(token))
        }
    };

    let current_user = match session.user_id {
        Some(user_id) => User::find_by_id(&state.db, user_id).await?,
        None => None,
    };

    // One-shot: messages queued by the previous request render on this one
    let flash = Session::take_flash(&state.db, session.id).await?;

    req.extensions_mut().insert(SessionHandle {
        session_id: session.id,
        db: state.db.clone(),
    });
    req.extensions_mut().insert(PageContext {
        current_user,
        flash,
    });

    let mut response = next.run(req).await;

    if let Some(token) = issued_token {
        let cookie = session_cookie(&token, state.config.production);
        let value = HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Internal(format!("Invalid session cookie: {}", e)))?;
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    Ok(response)
}
