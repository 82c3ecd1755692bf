//! # Wildspot Shared Library
//!
//! This crate contains the data layer and authentication primitives used by
//! the Wildspot web server.
//!
//! ## Module Organization
//!
//! - `models`: Database models (users, campgrounds, reviews, sessions)
//! - `auth`: Password hashing, credential checks, session tokens,
//!   ownership rules
//! - `db`: Connection pool and migration runner

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the Wildspot shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
