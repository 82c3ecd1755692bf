/// Input sanitation middleware
///
/// Strips database-operator-like characters from request input *keys* before
/// any extractor runs. Query-string keys and urlencoded form field names have
/// `$` and `.` (raw or percent-encoded) replaced with `_`, so operator-shaped
/// keys like `$gt` or `owner.id` cannot alter query semantics downstream.
/// Values are left untouched.
///
/// # Example
///
/// A request to `/campgrounds?$where=1` reaches the router as
/// `/campgrounds?_where=1`; a form field named `title.$ne` becomes
/// `title___ne`.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, ValidationErrorDetail};

/// Largest urlencoded body the sanitizer will buffer
const MAX_FORM_BODY_BYTES: usize = 1024 * 1024;

/// Replaces operator characters in a single input key
///
/// `$` and `.` are replaced with `_`, in both raw and percent-encoded
/// (`%24`, `%2E`) spellings. Everything else, including bracket syntax like
/// `campground[title]`, passes through unchanged.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut rest = key;

    while !rest.is_empty() {
        let b = rest.as_bytes();
        if b[0] == b'$' || b[0] == b'.' {
            out.push('_');
            rest = &rest[1..];
        } else if b[0] == b'%'
            && b.len() >= 3
            && b[1] == b'2'
            && (b[2] == b'4' || b[2] == b'E' || b[2] == b'e')
        {
            out.push('_');
            rest = &rest[3..];
        } else {
            let ch = rest.chars().next().expect("non-empty remainder");
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

/// Sanitizes the keys of an urlencoded pair list
///
/// Works on raw (still percent-encoded) `k=v&k=v` text so it can run before
/// any decoding; only the key side of each pair is rewritten.
pub fn sanitize_pairs(input: &str) -> String {
    input
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => format!("{}={}", sanitize_key(key), value),
            None => sanitize_key(pair),
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Middleware entry point
///
/// Rewrites the query string in place and, for urlencoded bodies, buffers
/// and rewrites the form field names.
pub async fn sanitize_input(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    if let Some(query) = parts.uri.query() {
        let cleaned = sanitize_pairs(query);
        if cleaned != query {
            let rewritten = format!("{}?{}", parts.uri.path(), cleaned);
            parts.uri = rewritten
                .parse::<Uri>()
                .map_err(|e| AppError::Internal(format!("Failed to rewrite URI: {}", e)))?;
        }
    }

    let is_form = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false);

    let req = if is_form {
        let bytes = to_bytes(body, MAX_FORM_BODY_BYTES).await.map_err(|_| {
            AppError::Validation(vec![ValidationErrorDetail {
                field: "body".to_string(),
                message: "Request body too large".to_string(),
            }])
        })?;

        let raw = String::from_utf8_lossy(&bytes);
        let cleaned = sanitize_pairs(&raw);

        if cleaned != raw {
            parts
                .headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(cleaned.len()));
            Request::from_parts(parts, Body::from(cleaned))
        } else {
            Request::from_parts(parts, Body::from(bytes))
        }
    } else {
        Request::from_parts(parts, body)
    };

    Ok(next.run(req).await)
}
