//! Business logic between handlers and `libris_core`.

pub mod auth;
pub mod books;
