/// Database models for Wildspot
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts referenced by campgrounds and reviews
/// - `campground`: Listings with an owning user and embedded image references
/// - `review`: Rating + comment attached to exactly one campground
/// - `session`: Server-side session state behind the "session" cookie
///
/// # Example
///
/// ```no_run
/// use wildspot_shared::models::user::{CreateUser, User};
/// use wildspot_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "ranger".to_string(),
///     email: "ranger@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod campground;
pub mod review;
pub mod session;
pub mod user;
