//! # libris_core
//!
//! Core domain logic for Libris: credentials, tokens and owned books.

pub mod auth;
pub mod books;
pub mod db;
pub mod migrate;
pub mod models;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
