/// Campground routes
///
/// # Endpoints
///
/// - `GET /campgrounds` - Listing index (public)
/// - `GET /campgrounds/new` - New-campground form (signed in)
/// - `POST /campgrounds` - Create (signed in)
/// - `GET /campgrounds/:id` - Show page with reviews (public)
/// - `GET /campgrounds/:id/edit` - Edit form (owner only)
/// - `PUT /campgrounds/:id` - Update (owner only)
/// - `DELETE /campgrounds/:id` - Delete, cascades to reviews (owner only)
///
/// Mutating routes load the campground first and check ownership before
/// touching it; non-owners get a 403.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use maud::Markup;
use serde::Deserialize;
use validator::Validate;

use wildspot_shared::auth::authorization::ensure_campground_owner;
use wildspot_shared::models::campground::{
    Campground, CampgroundImage, CreateCampground, UpdateCampground,
};
use wildspot_shared::models::review::Review;

use crate::app::AppState;
use crate::error::{validate_form, AppError, AppResult};
use crate::middleware::session::{PageContext, RequireUser, SessionHandle};
use crate::routes::{empty_string_as_none, parse_id};
use crate::views;

/// Campground form payload, shared by create and update
#[derive(Debug, Deserialize, Validate)]
pub struct CampgroundForm {
    #[validate(length(min = 1, max = 100, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, max = 100, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,

    #[validate(length(max = 2000, message = "Description is too long"))]
    #[serde(default)]
    pub description: String,

    #[validate(url(message = "Image must be a valid URL"))]
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image_url: Option<String>,
}

impl CampgroundForm {
    /// Builds the stored image list from the optional URL field
    fn images(&self) -> Vec<CampgroundImage> {
        self.image_url
            .as_ref()
            .map(|url| {
                let filename = url
                    .rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .unwrap_or("external")
                    .to_string();
                vec![CampgroundImage {
                    url: url.clone(),
                    filename,
                }]
            })
            .unwrap_or_default()
    }
}

/// `GET /campgrounds`
pub async fn index(
    State(state): State<AppState>,
    Extension(page): Extension<PageContext>,
) -> AppResult<Markup> {
    let campgrounds = Campground::list(&state.db).await?;

    Ok(views::campgrounds::index(&page, &campgrounds))
}

/// `GET /campgrounds/new`
pub async fn new_form(
    Extension(page): Extension<PageContext>,
    RequireUser(_user): RequireUser,
) -> Markup {
    views::campgrounds::new_form(&page)
}

/// `POST /campgrounds`
pub async fn create(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    RequireUser(user): RequireUser,
    Form(form): Form<CampgroundForm>,
) -> AppResult<Response> {
    validate_form(&form)?;

    let campground = Campground::create(
        &state.db,
        CreateCampground {
            title: form.title.clone(),
            description: form.description.clone(),
            location: form.location.clone(),
            price: form.price,
            images: form.images(),
            owner_id: user.id,
        },
    )
    .await?;

    session
        .flash_success("Successfully made a new campground!")
        .await?;

    tracing::info!(campground_id = %campground.id, owner_id = %user.id, "Campground created");

    Ok(Redirect::to(&format!("/campgrounds/{}", campground.id)).into_response())
}

/// `GET /campgrounds/:id`
pub async fn show(
    State(state): State<AppState>,
    Extension(page): Extension<PageContext>,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = parse_id(&id, "Campground")?;

    let campground = Campground::find_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    let reviews = Review::list_for_campground(&state.db, id).await?;

    Ok(views::campgrounds::show(&page, &campground, &reviews))
}

/// `GET /campgrounds/:id/edit`
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(page): Extension<PageContext>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> AppResult<Markup> {
    let id = parse_id(&id, "Campground")?;

    let campground = Campground::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    ensure_campground_owner(&campground, user.id)?;

    Ok(views::campgrounds::edit_form(&page, &campground))
}

/// `PUT /campgrounds/:id`
pub async fn update(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
    Form(form): Form<CampgroundForm>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Campground")?;
    validate_form(&form)?;

    let campground = Campground::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    ensure_campground_owner(&campground, user.id)?;

    Campground::update(
        &state.db,
        id,
        UpdateCampground {
            title: form.title.clone(),
            description: form.description.clone(),
            location: form.location.clone(),
            price: form.price,
            images: form.images(),
        },
    )
    .await?;

    session
        .flash_success("Successfully updated campground!")
        .await?;

    Ok(Redirect::to(&format!("/campgrounds/{}", id)).into_response())
}

/// `DELETE /campgrounds/:id`
///
/// Reviews referencing the campground are removed by the FK cascade.
pub async fn destroy(
    State(state): State<AppState>,
    Extension(session): Extension<SessionHandle>,
    RequireUser(user): RequireUser,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = parse_id(&id, "Campground")?;

    let campground = Campground::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Campground not found".to_string()))?;

    ensure_campground_owner(&campground, user.id)?;

    Campground::delete(&state.db, id).await?;

    session.flash_success("Campground deleted").await?;

    tracing::info!(campground_id = %id, "Campground deleted");

    Ok(Redirect::to("/campgrounds").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CampgroundForm {
        CampgroundForm {
            title: "Granite Basin".to_string(),
            location: "Moab, Utah".to_string(),
            price: 24.5,
            description: "Alpine lake access".to_string(),
            image_url: Some("https://images.unsplash.com/photo.jpg".to_string()),
        }
    }

    #[test]
    fn test_form_validation_accepts_valid_input() {
        assert!(validate_form(&valid_form()).is_ok());
    }

    #[test]
    fn test_form_validation_rejects_negative_price() {
        let form = CampgroundForm {
            price: -1.0,
            ..valid_form()
        };

        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn test_form_validation_rejects_empty_title() {
        let form = CampgroundForm {
            title: String::new(),
            ..valid_form()
        };

        assert!(validate_form(&form).is_err());
    }

    #[test]
    fn test_images_built_from_url() {
        let images = valid_form().images();
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].filename, "photo.jpg");
    }

    #[test]
    fn test_images_empty_without_url() {
        let form = CampgroundForm {
            image_url: None,
            ..valid_form()
        };

        assert!(form.images().is_empty());
    }
}
