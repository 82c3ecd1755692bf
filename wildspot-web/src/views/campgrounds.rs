/// Campground pages: index, show, and the new/edit forms

use maud::{html, Markup};

use wildspot_shared::models::campground::{Campground, CampgroundWithOwner};
use wildspot_shared::models::review::ReviewWithAuthor;

use crate::middleware::session::PageContext;
use crate::views::layout;

/// Placeholder shown when a listing has no images
const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1504280390367-361c6d9f38f4?w=800";

fn card_image(campground: &Campground) -> &str {
    campground
        .images
        .first()
        .map(|image| image.url.as_str())
        .unwrap_or(FALLBACK_IMAGE)
}

pub fn index(context: &PageContext, campgrounds: &[Campground]) -> Markup {
    layout::page(
        context,
        "All Campgrounds",
        html! {
            h1 { "All Campgrounds" }
            @if campgrounds.is_empty() {
                p class="text-muted" { "No campgrounds yet. Be the first to add one!" }
            }
            @for campground in campgrounds {
                div class="card mb-3" {
                    div class="row g-0" {
                        div class="col-md-4" {
                            img class="img-fluid" src=(card_image(campground)) alt=(campground.title);
                        }
                        div class="col-md-8" {
                            div class="card-body" {
                                h5 class="card-title" { (campground.title) }
                                p class="card-text" { (campground.description) }
                                p class="card-text" {
                                    small class="text-muted" { (campground.location) }
                                }
                                a class="btn btn-primary" href={ "/campgrounds/" (campground.id) } {
                                    "View " (campground.title)
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn show(
    context: &PageContext,
    campground: &CampgroundWithOwner,
    reviews: &[ReviewWithAuthor],
) -> Markup {
    let viewer_id = context.current_user.as_ref().map(|user| user.id);
    let is_owner = viewer_id == Some(campground.owner_id);

    layout::page(
        context,
        &campground.title,
        html! {
            div class="row" {
                div class="col-md-6" {
                    div class="card mb-3" {
                        @if let Some(image) = campground.images.first() {
                            img class="card-img-top" src=(image.url) alt=(campground.title);
                        }
                        div class="card-body" {
                            h3 class="card-title" { (campground.title) }
                            p class="card-text" { (campground.description) }
                        }
                        ul class="list-group list-group-flush" {
                            li class="list-group-item text-muted" { (campground.location) }
                            li class="list-group-item" { "Submitted by " (campground.owner_username) }
                            li class="list-group-item" { "$" (campground.price) "/night" }
                        }
                        @if is_owner {
                            div class="card-body" {
                                a class="btn btn-info me-2" href={ "/campgrounds/" (campground.id) "/edit" } { "Edit" }
                                form class="d-inline" action={ "/campgrounds/" (campground.id) "?_method=DELETE" } method="post" {
                                    button class="btn btn-danger" type="submit" { "Delete" }
                                }
                            }
                        }
                    }
                }
                div class="col-md-6" {
                    @if context.current_user.is_some() {
                        (review_form(campground))
                    }
                    @for review in reviews {
                        (review_card(campground, review, viewer_id, campground.owner_id))
                    }
                }
            }
        },
    )
}

fn review_form(campground: &CampgroundWithOwner) -> Markup {
    html! {
        h4 { "Leave a Review" }
        form class="mb-4" action={ "/campgrounds/" (campground.id) "/reviews" } method="post" {
            div class="mb-3" {
                label class="form-label" for="rating" { "Rating" }
                select class="form-select" id="rating" name="rating" {
                    @for value in 1..=5 {
                        option value=(value) selected[value == 5] { (value) }
                    }
                }
            }
            div class="mb-3" {
                label class="form-label" for="body" { "Review" }
                textarea class="form-control" id="body" name="body" rows="3" required {}
            }
            button class="btn btn-success" type="submit" { "Submit" }
        }
    }
}

fn review_card(
    campground: &CampgroundWithOwner,
    review: &ReviewWithAuthor,
    viewer_id: Option<uuid::Uuid>,
    owner_id: uuid::Uuid,
) -> Markup {
    let may_delete = viewer_id
        .map(|id| id == review.author_id || id == owner_id)
        .unwrap_or(false);

    html! {
        div class="card mb-3" {
            div class="card-body" {
                h5 class="card-title" { (review.author_username) }
                h6 class="card-subtitle mb-2 text-muted" { "Rating: " (review.rating) " / 5" }
                p class="card-text" { (review.body) }
                @if may_delete {
                    form action={ "/campgrounds/" (campground.id) "/reviews/" (review.id) "?_method=DELETE" } method="post" {
                        button class="btn btn-sm btn-danger" type="submit" { "Delete" }
                    }
                }
            }
        }
    }
}

pub fn new_form(context: &PageContext) -> Markup {
    layout::page(
        context,
        "New Campground",
        html! {
            div class="row justify-content-center" {
                div class="col-md-6" {
                    h1 { "New Campground" }
                    form action="/campgrounds" method="post" {
                        (campground_fields(None))
                        button class="btn btn-success" type="submit" { "Create Campground" }
                    }
                }
            }
        },
    )
}

pub fn edit_form(context: &PageContext, campground: &Campground) -> Markup {
    layout::page(
        context,
        "Edit Campground",
        html! {
            div class="row justify-content-center" {
                div class="col-md-6" {
                    h1 { "Edit Campground" }
                    form action={ "/campgrounds/" (campground.id) "?_method=PUT" } method="post" {
                        (campground_fields(Some(campground)))
                        button class="btn btn-success" type="submit" { "Update Campground" }
                    }
                }
            }
        },
    )
}

fn campground_fields(existing: Option<&Campground>) -> Markup {
    let title = existing.map(|c| c.title.as_str()).unwrap_or("");
    let location = existing.map(|c| c.location.as_str()).unwrap_or("");
    let description = existing.map(|c| c.description.as_str()).unwrap_or("");
    let price = existing.map(|c| c.price.to_string()).unwrap_or_default();
    let image_url = existing
        .and_then(|c| c.images.first())
        .map(|image| image.url.as_str())
        .unwrap_or("");

    html! {
        div class="mb-3" {
            label class="form-label" for="title" { "Title" }
            input class="form-control" type="text" id="title" name="title" value=(title) required;
        }
        div class="mb-3" {
            label class="form-label" for="location" { "Location" }
            input class="form-control" type="text" id="location" name="location" value=(location) required;
        }
        div class="mb-3" {
            label class="form-label" for="price" { "Campground Price" }
            div class="input-group" {
                span class="input-group-text" { "$" }
                input class="form-control" type="number" step="0.01" min="0" id="price" name="price" value=(price) required;
            }
        }
        div class="mb-3" {
            label class="form-label" for="image_url" { "Image URL" }
            input class="form-control" type="url" id="image_url" name="image_url" value=(image_url);
        }
        div class="mb-3" {
            label class="form-label" for="description" { "Description" }
            textarea class="form-control" id="description" name="description" rows="4" { (description) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;
    use uuid::Uuid;
    use wildspot_shared::models::campground::CampgroundImage;
    use wildspot_shared::models::session::FlashMessages;
    use wildspot_shared::models::user::User;

    fn anonymous() -> PageContext {
        PageContext {
            current_user: None,
            flash: FlashMessages::default(),
        }
    }

    fn signed_in(user_id: Uuid) -> PageContext {
        PageContext {
            current_user: Some(User {
                id: user_id,
                username: "ranger".to_string(),
                email: "ranger@example.com".to_string(),
                password_hash: "hash".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }),
            flash: FlashMessages::default(),
        }
    }

    fn campground(owner_id: Uuid) -> Campground {
        Campground {
            id: Uuid::new_v4(),
            title: "Granite Basin".to_string(),
            description: "Alpine lake access".to_string(),
            location: "Moab, Utah".to_string(),
            price: 24.5,
            images: Json(vec![CampgroundImage {
                url: "https://images.unsplash.com/photo".to_string(),
                filename: "photo".to_string(),
            }]),
            owner_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn with_owner(campground: &Campground) -> CampgroundWithOwner {
        CampgroundWithOwner {
            id: campground.id,
            title: campground.title.clone(),
            description: campground.description.clone(),
            location: campground.location.clone(),
            price: campground.price,
            images: campground.images.clone(),
            owner_id: campground.owner_id,
            owner_username: "owner".to_string(),
            created_at: campground.created_at,
        }
    }

    #[test]
    fn test_index_lists_campgrounds() {
        let cg = campground(Uuid::new_v4());
        let rendered = index(&anonymous(), std::slice::from_ref(&cg)).into_string();

        assert!(rendered.contains("Granite Basin"));
        assert!(rendered.contains(&format!("/campgrounds/{}", cg.id)));
    }

    #[test]
    fn test_show_hides_owner_actions_from_strangers() {
        let cg = campground(Uuid::new_v4());
        let rendered = show(&signed_in(Uuid::new_v4()), &with_owner(&cg), &[]).into_string();

        assert!(!rendered.contains("?_method=DELETE"));
        assert!(!rendered.contains("/edit"));
        // But signed-in users get the review form
        assert!(rendered.contains("Leave a Review"));
    }

    #[test]
    fn test_show_offers_owner_actions_to_owner() {
        let owner = Uuid::new_v4();
        let cg = campground(owner);
        let rendered = show(&signed_in(owner), &with_owner(&cg), &[]).into_string();

        assert!(rendered.contains(&format!("/campgrounds/{}?_method=DELETE", cg.id)));
        assert!(rendered.contains(&format!("/campgrounds/{}/edit", cg.id)));
    }

    #[test]
    fn test_show_hides_review_form_from_anonymous() {
        let cg = campground(Uuid::new_v4());
        let rendered = show(&anonymous(), &with_owner(&cg), &[]).into_string();

        assert!(!rendered.contains("Leave a Review"));
    }

    #[test]
    fn test_edit_form_prefills_fields() {
        let owner = Uuid::new_v4();
        let cg = campground(owner);
        let rendered = edit_form(&signed_in(owner), &cg).into_string();

        assert!(rendered.contains(r#"value="Granite Basin""#));
        assert!(rendered.contains("?_method=PUT"));
    }
}
