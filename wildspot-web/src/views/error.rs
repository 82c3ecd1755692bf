/// Error page
///
/// The terminal state of the error pipeline: a standalone HTML page showing
/// the status code and message. It does not use the session-aware layout —
/// errors can surface before the session middleware has run (unmatched
/// routes, early middleware failures), so the page carries only a minimal
/// navbar.

use axum::http::StatusCode;
use maud::{html, Markup, DOCTYPE};

/// Renders the error page for a status + message
pub fn render(status: StatusCode, message: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Error | Wildspot" }
                link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
            }
            body {
                nav class="navbar navbar-dark bg-dark" {
                    div class="container-fluid" {
                        a class="navbar-brand" href="/" { "Wildspot" }
                    }
                }
                main class="container mt-5" {
                    div class="alert alert-danger" role="alert" {
                        h4 class="alert-heading" { (status.as_u16()) " " (reason) }
                        p { (message) }
                    }
                    a class="btn btn-secondary" href="/campgrounds" { "Back to campgrounds" }
                }
            }
        }
    }
}
