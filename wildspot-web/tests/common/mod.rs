/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup
/// - Test user creation with a known password
/// - Login helper returning the session cookie
///
/// Tests using [`TestContext`] need a running PostgreSQL and the
/// `DATABASE_URL` / `SESSION_SECRET` environment variables; they are marked
/// `#[ignore]` and run with `cargo test -- --ignored`.

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

use wildspot_shared::auth::password::hash_password;
use wildspot_shared::models::user::{CreateUser, User};
use wildspot_web::app::{build_router, AppState};
use wildspot_web::config::Config;

/// Password every test user is created with
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
}

impl TestContext {
    /// Creates a new test context with a migrated database and one user
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config::from_env()?;

        let db = PgPool::connect(&config.database.url).await?;

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../migrations").run(&db).await?;

        let user = create_test_user(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
        })
    }

    /// Logs `username` in and returns the session cookie pair
    pub async fn login(&self, username: &str) -> String {
        let body = format!("username={}&password={}", username, TEST_PASSWORD);

        let response = self
            .app
            .clone()
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::SEE_OTHER,
            "login should redirect on success"
        );

        session_cookie(&response).expect("login must set the session cookie")
    }

    /// Cleans up test data
    ///
    /// Deleting the user cascades to campgrounds, reviews, and sessions.
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Creates a user with a unique username and the shared test password
pub async fn create_test_user(db: &PgPool) -> anyhow::Result<User> {
    let suffix = Uuid::new_v4().simple().to_string();
    let username = format!("tester-{}", &suffix[..8]);

    let user = User::create(
        db,
        CreateUser {
            username,
            email: format!("tester-{}@example.com", &suffix[..8]),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    Ok(user)
}

/// Extracts the `session=...` pair from a response's Set-Cookie headers
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("session="))
        .and_then(|value| value.split(';').next())
        .map(|pair| pair.to_string())
}

/// Reads a response body to a string
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    String::from_utf8_lossy(&bytes).to_string()
}
