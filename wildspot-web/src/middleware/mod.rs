/// Middleware layers for the web server
///
/// This module contains the middleware the request pipeline is assembled
/// from, as an explicit ordered list of typed tower layers:
///
/// - `security`: security headers + Content-Security-Policy allow-lists
/// - `sanitize`: strips database-operator-like characters from input keys
/// - `method_override`: POST + `_method` simulates PUT/DELETE for HTML forms
/// - `session`: cookie-backed sessions, flash queues, current user, and the
///   `RequireUser` login gate

pub mod method_override;
pub mod sanitize;
pub mod security;
pub mod session;
