/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use wildspot_web::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = wildspot_web::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;
use crate::error::AppError;
use crate::middleware::{
    method_override::method_override, sanitize::sanitize_input, security::SecurityHeadersLayer,
    session::session_layer,
};

/// Shared application state
///
/// Constructed once at startup and handed to every handler via Axum's
/// `State` extractor; cloning is cheap (pool handle + Arc).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Key for session token digests
    pub fn session_secret(&self) -> &str {
        &self.config.session.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                                 # Home page
/// ├── /register, /login, /logout             # User routes
/// ├── /campgrounds/                          # Campground routes
/// │   ├── GET    /                           # Index
/// │   ├── POST   /                           # Create (signed in)
/// │   ├── GET    /new                        # Form (signed in)
/// │   ├── GET    /:id                        # Show
/// │   ├── PUT    /:id                        # Update (owner)
/// │   ├── DELETE /:id                        # Delete (owner)
/// │   ├── GET    /:id/edit                   # Form (owner)
/// │   ├── POST   /:id/reviews                # Create review (signed in)
/// │   └── DELETE /:id/reviews/:review_id     # Delete review (author/owner)
/// ├── /public/*                              # Static assets
/// └── *                                      # 404 fallback
/// ```
///
/// # Middleware Stack
///
/// Outermost first:
/// 1. Security headers + CSP
/// 2. Request tracing (tower-http TraceLayer)
/// 3. Response compression
/// 4. Input key sanitation
/// 5. Method override (`_method` query parameter)
/// 6. Sessions + flash (page routes only; static assets and the 404
///    fallback don't start sessions)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let user_routes = Router::new()
        .route(
            "/register",
            get(routes::users::register_form).post(routes::users::register),
        )
        .route(
            "/login",
            get(routes::users::login_form).post(routes::users::login),
        )
        .route("/logout", post(routes::users::logout));

    let campground_routes = Router::new()
        .route(
            "/",
            get(routes::campgrounds::index).post(routes::campgrounds::create),
        )
        .route("/new", get(routes::campgrounds::new_form))
        .route(
            "/:id",
            get(routes::campgrounds::show)
                .put(routes::campgrounds::update)
                .delete(routes::campgrounds::destroy),
        )
        .route("/:id/edit", get(routes::campgrounds::edit_form))
        .route("/:id/reviews", post(routes::reviews::create))
        .route(
            "/:id/reviews/:review_id",
            axum::routing::delete(routes::reviews::destroy),
        );

    // Everything session-aware: pages get a session row, flash, and the
    // current user resolved before their handler runs
    let page_routes = Router::new()
        .route("/", get(routes::home::home))
        .merge(user_routes)
        .nest("/campgrounds", campground_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ));

    Router::new()
        .merge(page_routes)
        .nest_service("/public", ServeDir::new("public"))
        .fallback(not_found)
        .layer(middleware::from_fn(method_override))
        .layer(middleware::from_fn(sanitize_input))
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SecurityHeadersLayer::new(
            state.config.production,
            state.config.cloudinary_cloud_name.as_deref(),
        ))
        .with_state(state)
}

/// Catch-all for unmatched routes
async fn not_found() -> AppError {
    AppError::page_not_found()
}
