/// Method override middleware
///
/// HTML forms can only submit GET and POST. A POST carrying a `_method`
/// query parameter is rewritten to the named verb before routing, so edit
/// and delete forms can target the PUT/DELETE routes:
///
/// ```html
/// <form action="/campgrounds/123?_method=DELETE" method="POST">
/// ```
///
/// Only POST requests are rewritten, and only to PUT, PATCH, or DELETE.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

/// Query parameter holding the override verb
const OVERRIDE_PARAM: &str = "_method";

/// Extracts the override verb from a raw query string
fn override_method(query: &str) -> Option<Method> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == OVERRIDE_PARAM)
        .and_then(|(_, value)| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}

/// Middleware entry point
pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(method) = req.uri().query().and_then(override_method) {
            *req.method_mut() = method;
        }
    }

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::StatusCode,
        middleware,
        routing::{delete, post, put},
        Router,
    };
    use tower::Service as _;

    fn test_app() -> Router {
        Router::new()
            .route("/thing", post(|| async { "posted" }))
            .route("/thing", put(|| async { "put" }))
            .route("/thing", delete(|| async { "deleted" }))
            .layer(middleware::from_fn(method_override))
    }

    #[test]
    fn test_override_method_parsing() {
        assert_eq!(override_method("_method=DELETE"), Some(Method::DELETE));
        assert_eq!(override_method("_method=put"), Some(Method::PUT));
        assert_eq!(override_method("a=1&_method=PATCH"), Some(Method::PATCH));
        assert_eq!(override_method("_method=TRACE"), None);
        assert_eq!(override_method("method=DELETE"), None);
    }

    #[tokio::test]
    async fn test_post_with_override_routes_as_delete() {
        let mut app = test_app();

        let response = app
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/thing?_method=DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"deleted");
    }

    #[tokio::test]
    async fn test_post_without_override_stays_post() {
        let mut app = test_app();

        let response = app
            .call(
                Request::builder()
                    .method("POST")
                    .uri("/thing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"posted");
    }

    #[tokio::test]
    async fn test_get_is_never_rewritten() {
        let mut app = Router::new()
            .route("/thing", axum::routing::get(|| async { "got" }))
            .layer(middleware::from_fn(method_override));

        let response = app
            .call(
                Request::builder()
                    .uri("/thing?_method=DELETE")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"got");
    }
}
