/// Landing page handler

use axum::Extension;
use maud::Markup;

use crate::middleware::session::PageContext;
use crate::views;

/// `GET /`
pub async fn home(Extension(page): Extension<PageContext>) -> Markup {
    views::home::render(&page)
}
