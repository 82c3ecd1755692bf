/// Campground model and database operations
///
/// This module provides the Campground model: a listing with a title,
/// location, nightly price, image references, and an owning user. Each
/// campground has an ordered collection of reviews; deleting a campground
/// cascades to them.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE campgrounds (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title TEXT NOT NULL,
///     description TEXT NOT NULL,
///     location TEXT NOT NULL,
///     price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
///     images JSONB NOT NULL DEFAULT '[]',
///     owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// A stored image reference
///
/// Images live on an external host; only the URL and the host-side filename
/// are persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampgroundImage {
    /// Public URL of the image
    pub url: String,

    /// Host-side filename (used when removing the image upstream)
    pub filename: String,
}

/// Campground model representing a listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Campground {
    /// Unique campground ID
    pub id: Uuid,

    /// Listing title
    pub title: String,

    /// Free-form description
    pub description: String,

    /// Human-readable location ("Moab, Utah")
    pub location: String,

    /// Nightly price, non-negative
    pub price: f64,

    /// Image references (JSONB)
    pub images: Json<Vec<CampgroundImage>>,

    /// Owning user; every campground has exactly one owner
    pub owner_id: Uuid,

    /// When the listing was created
    pub created_at: DateTime<Utc>,

    /// When the listing was last updated
    pub updated_at: DateTime<Utc>,
}

/// Campground joined with its owner's username, for display
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CampgroundWithOwner {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub images: Json<Vec<CampgroundImage>>,
    pub owner_id: Uuid,
    pub owner_username: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new campground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCampground {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub images: Vec<CampgroundImage>,
    pub owner_id: Uuid,
}

/// Input for updating an existing campground
///
/// All content fields are replaced; ownership never changes on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCampground {
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: f64,
    pub images: Vec<CampgroundImage>,
}

impl Campground {
    /// Creates a new campground
    ///
    /// # Errors
    ///
    /// Returns an error if the owner does not exist or the database
    /// connection fails.
    pub async fn create(pool: &PgPool, data: CreateCampground) -> Result<Self, sqlx::Error> {
        let campground = sqlx::query_as::<_, Campground>(
            r#"
            INSERT INTO campgrounds (title, description, location, price, images, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, location, price, images, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.location)
        .bind(data.price)
        .bind(Json(data.images))
        .bind(data.owner_id)
        .fetch_one(pool)
        .await?;

        Ok(campground)
    }

    /// Finds a campground by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let campground = sqlx::query_as::<_, Campground>(
            r#"
            SELECT id, title, description, location, price, images, owner_id,
                   created_at, updated_at
            FROM campgrounds
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(campground)
    }

    /// Finds a campground together with its owner's username
    ///
    /// Used by the show page, which displays "submitted by".
    pub async fn find_with_owner(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<CampgroundWithOwner>, sqlx::Error> {
        let campground = sqlx::query_as::<_, CampgroundWithOwner>(
            r#"
            SELECT c.id, c.title, c.description, c.location, c.price, c.images,
                   c.owner_id, u.username AS owner_username, c.created_at
            FROM campgrounds c
            JOIN users u ON u.id = c.owner_id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(campground)
    }

    /// Lists all campgrounds, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let campgrounds = sqlx::query_as::<_, Campground>(
            r#"
            SELECT id, title, description, location, price, images, owner_id,
                   created_at, updated_at
            FROM campgrounds
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(campgrounds)
    }

    /// Updates a campground's content fields
    ///
    /// # Returns
    ///
    /// The updated campground if found, None if it doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateCampground,
    ) -> Result<Option<Self>, sqlx::Error> {
        let campground = sqlx::query_as::<_, Campground>(
            r#"
            UPDATE campgrounds
            SET title = $2, description = $3, location = $4, price = $5,
                images = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, location, price, images, owner_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.location)
        .bind(data.price)
        .bind(Json(data.images))
        .fetch_optional(pool)
        .await?;

        Ok(campground)
    }

    /// Deletes a campground by ID
    ///
    /// The reviews foreign key is declared ON DELETE CASCADE, so all reviews
    /// referencing the campground are removed in the same statement.
    ///
    /// # Returns
    ///
    /// True if the campground was deleted, false if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campgrounds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_campground_struct() {
        let data = CreateCampground {
            title: "Granite Basin".to_string(),
            description: "Alpine lake access".to_string(),
            location: "Moab, Utah".to_string(),
            price: 24.5,
            images: vec![CampgroundImage {
                url: "https://images.unsplash.com/photo".to_string(),
                filename: "photo".to_string(),
            }],
            owner_id: Uuid::new_v4(),
        };

        assert_eq!(data.title, "Granite Basin");
        assert_eq!(data.images.len(), 1);
    }

    #[test]
    fn test_image_serde_roundtrip() {
        let image = CampgroundImage {
            url: "https://images.unsplash.com/photo".to_string(),
            filename: "photo".to_string(),
        };

        let json = serde_json::to_string(&image).unwrap();
        let back: CampgroundImage = serde_json::from_str(&json).unwrap();
        assert_eq!(image, back);
    }
}
