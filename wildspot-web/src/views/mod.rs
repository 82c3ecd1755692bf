/// HTML views
///
/// All pages are rendered server-side with maud compile-time templates;
/// dynamic content is HTML-escaped by maud. Each submodule owns the views
/// for one route group; `layout` provides the shared document shell with
/// navbar and flash alerts.

pub mod campgrounds;
pub mod error;
pub mod home;
pub mod layout;
pub mod users;
