/// Shared document shell
///
/// Every page renders inside this layout: Bootstrap scaffolding, the navbar
/// (with login/register or logout depending on the current user), and the
/// flash alert block. Flash queues come from the [`PageContext`] the session
/// middleware built for this request, so rendering the layout is what
/// consumes them.

use maud::{html, Markup, DOCTYPE};

use wildspot_shared::models::session::FlashMessages;

use crate::middleware::session::PageContext;

/// Renders a full page around `content`
pub fn page(context: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Wildspot" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
                link rel="stylesheet" href="/public/stylesheets/app.css";
            }
            body class="d-flex flex-column min-vh-100" {
                (navbar(context))
                main class="container mt-4 flex-grow-1" {
                    (flash_alerts(&context.flash))
                    (content)
                }
                (footer())
                script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js" {}
            }
        }
    }
}

fn navbar(context: &PageContext) -> Markup {
    html! {
        nav class="navbar navbar-expand-md navbar-dark bg-dark" {
            div class="container-fluid" {
                a class="navbar-brand" href="/" { "Wildspot" }
                div class="navbar-nav me-auto" {
                    a class="nav-link" href="/" { "Home" }
                    a class="nav-link" href="/campgrounds" { "Campgrounds" }
                    a class="nav-link" href="/campgrounds/new" { "New Campground" }
                }
                div class="navbar-nav" {
                    @match &context.current_user {
                        Some(user) => {
                            span class="navbar-text me-3" { "Signed in as " (user.username) }
                            form class="d-inline" action="/logout" method="post" {
                                button class="btn btn-link nav-link" type="submit" { "Logout" }
                            }
                        },
                        None => {
                            a class="nav-link" href="/login" { "Login" }
                            a class="nav-link" href="/register" { "Register" }
                        },
                    }
                }
            }
        }
    }
}

fn flash_alerts(flash: &FlashMessages) -> Markup {
    html! {
        @for message in &flash.success {
            div class="alert alert-success" role="alert" { (message) }
        }
        @for message in &flash.error {
            div class="alert alert-danger" role="alert" { (message) }
        }
    }
}

fn footer() -> Markup {
    html! {
        footer class="footer bg-dark py-3 mt-5" {
            div class="container" {
                span class="text-muted" { "© Wildspot" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anonymous_context() -> PageContext {
        PageContext {
            current_user: None,
            flash: FlashMessages::default(),
        }
    }

    #[test]
    fn test_page_renders_title_and_content() {
        let markup = page(
            &anonymous_context(),
            "Campgrounds",
            html! { h1 { "All Campgrounds" } },
        );

        let rendered = markup.into_string();
        assert!(rendered.contains("<title>Campgrounds | Wildspot</title>"));
        assert!(rendered.contains("All Campgrounds"));
        assert!(rendered.contains("Login"));
        assert!(!rendered.contains("Logout"));
    }

    #[test]
    fn test_flash_alerts_render_both_queues() {
        let flash = FlashMessages {
            success: vec!["Welcome back!".to_string()],
            error: vec!["Invalid username or password".to_string()],
        };

        let rendered = flash_alerts(&flash).into_string();
        assert!(rendered.contains("alert-success"));
        assert!(rendered.contains("Welcome back!"));
        assert!(rendered.contains("alert-danger"));
        assert!(rendered.contains("Invalid username or password"));
    }

    #[test]
    fn test_dynamic_content_is_escaped() {
        let flash = FlashMessages {
            success: vec!["<script>alert(1)</script>".to_string()],
            error: vec![],
        };

        let rendered = flash_alerts(&flash).into_string();
        assert!(!rendered.contains("<script>alert(1)</script>"));
        assert!(rendered.contains("&lt;script&gt;"));
    }
}
