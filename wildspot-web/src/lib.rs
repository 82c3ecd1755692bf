//! # Wildspot Web Server Library
//!
//! This library provides the core functionality for the Wildspot web
//! server: a server-rendered campground listing and review site.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTML error pages
//! - `middleware`: Security headers, input sanitation, method override,
//!   sessions
//! - `routes`: Route handlers (users, campgrounds, reviews)
//! - `views`: maud HTML templates

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod views;
