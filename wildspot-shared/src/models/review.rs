/// Review model and database operations
///
/// A review is a rating (1-5) plus a comment, authored by a user and
/// associated with exactly one campground. Reviews are removed when their
/// campground is deleted (FK cascade).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE reviews (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     campground_id UUID NOT NULL REFERENCES campgrounds(id) ON DELETE CASCADE,
///     author_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     rating SMALLINT NOT NULL CHECK (rating BETWEEN 1 AND 5),
///     body TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Review model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Review {
    /// Unique review ID
    pub id: Uuid,

    /// Campground this review belongs to
    pub campground_id: Uuid,

    /// User who wrote the review
    pub author_id: Uuid,

    /// Star rating, 1 through 5
    pub rating: i16,

    /// Review text
    pub body: String,

    /// When the review was created
    pub created_at: DateTime<Utc>,
}

/// Review joined with its author's username, for display
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub campground_id: Uuid,
    pub author_id: Uuid,
    pub author_username: String,
    pub rating: i16,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new review
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    pub campground_id: Uuid,
    pub author_id: Uuid,
    pub rating: i16,
    pub body: String,
}

impl Review {
    /// Creates a new review
    ///
    /// # Errors
    ///
    /// Returns an error if the campground or author does not exist, the
    /// rating is out of range, or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateReview) -> Result<Self, sqlx::Error> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (campground_id, author_id, rating, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, campground_id, author_id, rating, body, created_at
            "#,
        )
        .bind(data.campground_id)
        .bind(data.author_id)
        .bind(data.rating)
        .bind(data.body)
        .fetch_one(pool)
        .await?;

        Ok(review)
    }

    /// Finds a review by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, campground_id, author_id, rating, body, created_at
            FROM reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(review)
    }

    /// Lists a campground's reviews with author usernames, newest first
    pub async fn list_for_campground(
        pool: &PgPool,
        campground_id: Uuid,
    ) -> Result<Vec<ReviewWithAuthor>, sqlx::Error> {
        let reviews = sqlx::query_as::<_, ReviewWithAuthor>(
            r#"
            SELECT r.id, r.campground_id, r.author_id, u.username AS author_username,
                   r.rating, r.body, r.created_at
            FROM reviews r
            JOIN users u ON u.id = r.author_id
            WHERE r.campground_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(campground_id)
        .fetch_all(pool)
        .await?;

        Ok(reviews)
    }

    /// Counts reviews referencing a campground
    ///
    /// Used by the cascade-delete integration test to assert no orphans.
    pub async fn count_for_campground(
        pool: &PgPool,
        campground_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM reviews WHERE campground_id = $1")
                .bind(campground_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Deletes a review by ID
    ///
    /// # Returns
    ///
    /// True if the review was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
