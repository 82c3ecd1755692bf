/// Security headers middleware
///
/// This module provides middleware to add security-related HTTP headers to
/// all responses, following OWASP recommendations.
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff` - Prevents MIME type sniffing
/// - `X-Frame-Options: DENY` - Prevents clickjacking
/// - `X-XSS-Protection: 1; mode=block` - Enables XSS protection in older browsers
/// - `Strict-Transport-Security` - Forces HTTPS (production only)
/// - `Content-Security-Policy` - Same-origin default with fixed allow-lists
///   for the external script/style/connect/image origins the pages use
/// - `Referrer-Policy: strict-origin-when-cross-origin` - Controls referrer information
/// - `Permissions-Policy` - Controls browser features
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use wildspot_web::middleware::security::SecurityHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(SecurityHeadersLayer::new(true, Some("demo"))); // true = production mode
/// ```

use axum::{extract::Request, response::Response};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// External origins allowed to serve scripts
const SCRIPT_SRC_URLS: &[&str] = &[
    "https://stackpath.bootstrapcdn.com/",
    "https://kit.fontawesome.com/",
    "https://cdnjs.cloudflare.com/",
    "https://cdn.jsdelivr.net",
    "https://cdn.maptiler.com",
];

/// External origins allowed to serve stylesheets
const STYLE_SRC_URLS: &[&str] = &[
    "https://kit-free.fontawesome.com/",
    "https://stackpath.bootstrapcdn.com/",
    "https://fonts.googleapis.com/",
    "https://use.fontawesome.com/",
    "https://cdn.jsdelivr.net",
    "https://cdn.maptiler.com",
];

/// External origins the browser may connect to (map tiles)
const CONNECT_SRC_URLS: &[&str] = &["https://api.maptiler.com/"];

/// External origins allowed to serve images, beyond the image host account
const IMG_SRC_URLS: &[&str] = &["https://images.unsplash.com/", "https://api.maptiler.com/"];

/// Builds the Content-Security-Policy header value
///
/// Same-origin by default; each directive appends its fixed allow-list. The
/// configured image-hosting account is appended to `img-src` when present.
fn content_security_policy(cloudinary_cloud_name: Option<&str>) -> String {
    let mut img_src = vec!["'self'".to_string(), "blob:".to_string(), "data:".to_string()];
    if let Some(account) = cloudinary_cloud_name {
        img_src.push(format!("https://res.cloudinary.com/{}/", account));
    }
    img_src.extend(IMG_SRC_URLS.iter().map(|s| s.to_string()));

    let directives = [
        "default-src 'self'".to_string(),
        format!("connect-src 'self' {}", CONNECT_SRC_URLS.join(" ")),
        format!(
            "script-src 'unsafe-inline' 'self' {}",
            SCRIPT_SRC_URLS.join(" ")
        ),
        format!(
            "style-src 'self' 'unsafe-inline' {}",
            STYLE_SRC_URLS.join(" ")
        ),
        "worker-src 'self' blob:".to_string(),
        "object-src 'none'".to_string(),
        format!("img-src {}", img_src.join(" ")),
        "font-src 'self'".to_string(),
        "frame-ancestors 'none'".to_string(),
    ];

    directives.join("; ")
}

/// Security headers middleware layer
#[derive(Clone)]
pub struct SecurityHeadersLayer {
    /// Whether to enable HSTS (HTTPS-only, should be true in production)
    enable_hsts: bool,

    /// Pre-built Content-Security-Policy value
    csp: String,
}

impl SecurityHeadersLayer {
    /// Creates a new security headers layer
    ///
    /// # Arguments
    ///
    /// * `enable_hsts` - Whether to enable HSTS (use true for production with HTTPS)
    /// * `cloudinary_cloud_name` - Image-hosting account added to the CSP img-src
    pub fn new(enable_hsts: bool, cloudinary_cloud_name: Option<&str>) -> Self {
        Self {
            enable_hsts,
            csp: content_security_policy(cloudinary_cloud_name),
        }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            enable_hsts: self.enable_hsts,
            csp: self.csp.clone(),
        }
    }
}

/// Security headers middleware service
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    enable_hsts: bool,
    csp: String,
}

impl<S> Service<Request> for SecurityHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let enable_hsts = self.enable_hsts;
        let csp = self.csp.clone();

        Box::pin(async move {
            let mut response = future.await?;

            let headers = response.headers_mut();

            // Prevent MIME type sniffing
            headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());

            // Prevent clickjacking
            headers.insert("X-Frame-Options", "DENY".parse().unwrap());

            // Enable XSS protection (for older browsers)
            headers.insert("X-XSS-Protection", "1; mode=block".parse().unwrap());

            // Control referrer information
            headers.insert(
                "Referrer-Policy",
                "strict-origin-when-cross-origin".parse().unwrap(),
            );

            // Disable potentially dangerous browser features
            headers.insert(
                "Permissions-Policy",
                "geolocation=(), microphone=(), camera=(), payment=(), usb=()"
                    .parse()
                    .unwrap(),
            );

            if let Ok(value) = csp.parse() {
                headers.insert("Content-Security-Policy", value);
            }

            // HSTS (only in production with HTTPS)
            if enable_hsts {
                headers.insert(
                    "Strict-Transport-Security",
                    "max-age=31536000; includeSubDomains; preload".parse().unwrap(),
                );
            }

            Ok(response)
        })
    }
}
