/// Integration tests for the Wildspot web server
///
/// These tests verify the full request pipeline end-to-end:
/// - Login sets the session cookie, and the cookie resolves the same user
/// - Flash messages are one-shot
/// - Ownership checks reject non-owner mutations
/// - Deleting a campground removes its reviews
/// - Operator-shaped input keys are neutralized
///
/// All tests here need PostgreSQL (`DATABASE_URL`, `SESSION_SECRET`) and are
/// `#[ignore]`d so the default suite runs without infrastructure:
///
/// ```bash
/// cargo test -p wildspot-web --test integration_test -- --ignored
/// ```

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use tower::Service as _;

use wildspot_shared::models::campground::{Campground, CampgroundImage, CreateCampground};
use wildspot_shared::models::review::{CreateReview, Review};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Seeds a campground owned by the context user
async fn seed_campground(ctx: &TestContext) -> Campground {
    Campground::create(
        &ctx.db,
        CreateCampground {
            title: "Granite Basin".to_string(),
            description: "Alpine lake access".to_string(),
            location: "Moab, Utah".to_string(),
            price: 24.5,
            images: vec![CampgroundImage {
                url: "https://images.unsplash.com/photo".to_string(),
                filename: "photo".to_string(),
            }],
            owner_id: ctx.user.id,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_login_sets_cookie_and_cookie_resolves_user() {
    let ctx = TestContext::new().await.unwrap();

    let cookie = ctx.login(&ctx.user.username).await;
    assert!(cookie.starts_with("session="));

    // Presenting the cookie on the next request resolves the same user
    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .uri("/")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = common::body_string(response).await;
    assert!(html.contains(&format!("Signed in as {}", ctx.user.username)));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_flash_messages_are_one_shot() {
    let ctx = TestContext::new().await.unwrap();

    // Login queues a "Welcome back!" flash for the next request
    let cookie = ctx.login(&ctx.user.username).await;

    let first = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .uri("/campgrounds")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let first_html = common::body_string(first).await;
    assert!(
        first_html.contains("Welcome back!"),
        "flash must be visible on the immediately following request"
    );

    let second = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .uri("/campgrounds")
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let second_html = common::body_string(second).await;
    assert!(
        !second_html.contains("Welcome back!"),
        "flash must be absent after being shown once"
    );

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_anonymous_mutation_redirects_to_login() {
    let ctx = TestContext::new().await.unwrap();
    let campground = seed_campground(&ctx).await;

    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/campgrounds/{}?_method=DELETE", campground.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get("location").unwrap(), "/login");

    // Nothing was deleted
    assert!(Campground::find_by_id(&ctx.db, campground.id)
        .await
        .unwrap()
        .is_some());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_non_owner_mutation_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let campground = seed_campground(&ctx).await;

    // A different signed-in user
    let intruder = common::create_test_user(&ctx.db).await.unwrap();
    let cookie = ctx.login(&intruder.username).await;

    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/campgrounds/{}?_method=PUT", campground.id))
                .header("content-type", FORM_CONTENT_TYPE)
                .header("cookie", &cookie)
                .body(Body::from(
                    "title=Stolen&location=Nowhere&price=1&description=&image_url=",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The campground is unchanged
    let unchanged = Campground::find_by_id(&ctx.db, campground.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.title, "Granite Basin");

    wildspot_shared::models::user::User::delete(&ctx.db, intruder.id)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_deleting_campground_removes_reviews() {
    let ctx = TestContext::new().await.unwrap();
    let campground = seed_campground(&ctx).await;

    for rating in 1..=3 {
        Review::create(
            &ctx.db,
            CreateReview {
                campground_id: campground.id,
                author_id: ctx.user.id,
                rating,
                body: "Quiet and shaded.".to_string(),
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(
        Review::count_for_campground(&ctx.db, campground.id)
            .await
            .unwrap(),
        3
    );

    let cookie = ctx.login(&ctx.user.username).await;
    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/campgrounds/{}?_method=DELETE", campground.id))
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // No orphaned reviews remain
    assert!(Campground::find_by_id(&ctx.db, campground.id)
        .await
        .unwrap()
        .is_none());
    assert_eq!(
        Review::count_for_campground(&ctx.db, campground.id)
            .await
            .unwrap(),
        0
    );

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_operator_keys_are_neutralized() {
    let ctx = TestContext::new().await.unwrap();
    let cookie = ctx.login(&ctx.user.username).await;

    // Operator-shaped keys ride along with an otherwise valid submission
    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri("/campgrounds?$where=1")
                .header("content-type", FORM_CONTENT_TYPE)
                .header("cookie", &cookie)
                .body(Body::from(
                    "title=Sanitized&location=Somewhere&price=5&description=&image_url=&$gt=999",
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // The submission succeeds; the operator keys were rewritten to inert
    // names and ignored by the typed form payload
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/campgrounds/"));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_review_lifecycle_via_routes() {
    let ctx = TestContext::new().await.unwrap();
    let campground = seed_campground(&ctx).await;
    let cookie = ctx.login(&ctx.user.username).await;

    // Create a review through the route
    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!("/campgrounds/{}/reviews", campground.id))
                .header("content-type", FORM_CONTENT_TYPE)
                .header("cookie", &cookie)
                .body(Body::from("rating=4&body=Quiet+and+shaded"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let reviews = Review::list_for_campground(&ctx.db, campground.id)
        .await
        .unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating, 4);

    // Delete it through the route (author)
    let response = ctx
        .app
        .clone()
        .call(
            Request::builder()
                .method("POST")
                .uri(format!(
                    "/campgrounds/{}/reviews/{}?_method=DELETE",
                    campground.id, reviews[0].id
                ))
                .header("cookie", &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    assert_eq!(
        Review::count_for_campground(&ctx.db, campground.id)
            .await
            .unwrap(),
        0
    );

    ctx.cleanup().await.unwrap();
}
