//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";
pub const POST_AUTH_REGISTER: &str = "/api/auth/register";
pub const POST_AUTH_LOGIN: &str = "/api/auth/login";
pub const BOOKS: &str = "/api/books";
pub const BOOKS_ID: &str = "/api/books/{id}";
