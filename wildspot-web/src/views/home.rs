/// Landing page

use maud::{html, Markup};

use crate::middleware::session::PageContext;
use crate::views::layout;

pub fn render(context: &PageContext) -> Markup {
    layout::page(
        context,
        "Home",
        html! {
            div class="text-center py-5" {
                h1 class="display-4" { "Wildspot" }
                p class="lead" {
                    "Find and review campgrounds, or list your own."
                }
                a class="btn btn-success btn-lg" href="/campgrounds" { "View Campgrounds" }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildspot_shared::models::session::FlashMessages;

    #[test]
    fn test_home_renders() {
        let context = PageContext {
            current_user: None,
            flash: FlashMessages::default(),
        };

        let rendered = render(&context).into_string();
        assert!(rendered.contains("View Campgrounds"));
    }
}
