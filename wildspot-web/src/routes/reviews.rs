/// Review routes, nested under `/campgrounds/:id/reviews`
///
/// # Endpoints
///
/// - `POST /campgrounds/:id/reviews` - Create a review (signed in)
/// - `DELETE /campgrounds/:id/reviews/:review_id` - Delete a review
///   (review author or campground owner)

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use validator::Validate;

use wildspot_shared::auth::authorization::ensure_review_author_or_owner;
use wildspot_shared::models::campground::Campground;
use wildspot_shared::models::review::{CreateReview, Review};

use crate::app::AppState;
use crate::error::{validate_form, AppError, AppResult};
use crate::middleware::session::{RequireUser, SessionHandle};
use crate::routes::parse_id;

/// Review form payload
#[derive(Debug, Deserialize, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,

    #[validate(length(min = 1, max = 1000, message = "Review text is required"))]
    pub body: String,
}

/// `POST /campgrounds/:id/reviews`
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    RequireUser(user): RequireUser,
    Path(campground_id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> AppResult<Response> {
    let campground_id = parse_id(&campground_id, "Campground")?;
    validate_form(&form)?;

    // The campground must exist before a review can point at it
    let campground = Campground::find_by_id(&state.db, campground_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    Review::create(
        &state.db,
        CreateReview {
            campground_id: campground.id,
            author_id: user.id,
            rating: form.rating,
            body: form.body.clone(),
        },
    )
    .await?;

    session.flash_success("Created new review!").await?;

    Ok(Redirect::to(&format!("/campgrounds/{}", campground.id)).into_response())
}

/// `DELETE /campgrounds/:id/reviews/:review_id`
pub async fn destroy(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    RequireUser(user): RequireUser,
    Path((campground_id, review_id)): Path<(String, String)>,
) -> AppResult<Response> {
    let campground_id = parse_id(&campground_id, "Campground")?;
    let review_id = parse_id(&review_id, "Review")?;

    let campground = Campground::find_by_id(&state.db, campground_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    let review = Review::find_by_id(&state.db, review_id)
        .await?
        .filter(|review| review.campground_id == campground.id)
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    ensure_review_author_or_owner(&review, &campground, user.id)?;

    Review::delete(&state.db, review.id).await?;

    session.flash_success("Review deleted").await?;

    Ok(Redirect::to(&format!("/campgrounds/{}", campground.id)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_form_accepts_valid_ratings() {
        for rating in 1..=5 {
            let form = ReviewForm {
                rating,
                body: "Lovely spot".to_string(),
            };
            assert!(validate_form(&form).is_ok(), "rating {} should pass", rating);
        }
    }

    #[test]
    fn test_review_form_rejects_out_of_range_ratings() {
        for rating in [0, 6, -1] {
            let form = ReviewForm {
                rating,
                body: "Lovely spot".to_string(),
            };
            assert!(validate_form(&form).is_err(), "rating {} should fail", rating);
        }
    }

    #[test]
    fn test_review_form_rejects_empty_body() {
        let form = ReviewForm {
            rating: 3,
            body: String::new(),
        };
        assert!(validate_form(&form).is_err());
    }
}
