//! Book persistence, scoped to the owning user.
//!
//! Every query takes the caller's user ID and filters on it. A book owned by
//! someone else is indistinguishable from one that does not exist.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::warn;

/// Appends the ownership predicate shared by all single-book queries.
/// Binds `?1` = book ID and `?2` = owner ID.
macro_rules! owned_book {
    ($sql:literal) => {
        concat!($sql, " WHERE id = ?1 AND user_id = ?2")
    };
}

/// Book store errors.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Book not found")]
    NotFound,

    #[error("Book was modified concurrently")]
    ConcurrencyConflict,

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),
}

/// Row returned by book queries.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub user_id: i64,
}

/// The mutable text fields of a book.
#[derive(Debug, Clone, Default)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl BookFields {
    /// All three fields are required and must not be blank.
    pub fn validate(&self) -> Result<(), BookError> {
        for (name, value) in [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(BookError::Validation(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

/// List the owner's books, oldest first.
pub async fn list_books(pool: &SqlitePool, owner_id: i64) -> Result<Vec<BookRow>, BookError> {
    let rows = sqlx::query_as::<_, BookRow>(
        "SELECT id, title, author, description, user_id FROM books WHERE user_id = ?1 ORDER BY id",
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Get a book by ID (scoped to owner).
pub async fn get_book(pool: &SqlitePool, owner_id: i64, book_id: i64) -> Result<BookRow, BookError> {
    sqlx::query_as::<_, BookRow>(owned_book!(
        "SELECT id, title, author, description, user_id FROM books"
    ))
    .bind(book_id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?
    .ok_or(BookError::NotFound)
}

/// Check whether the owner has a book with this ID.
pub async fn book_exists(pool: &SqlitePool, owner_id: i64, book_id: i64) -> Result<bool, BookError> {
    let exists = sqlx::query_scalar::<_, bool>(concat!(
        owned_book!("SELECT EXISTS(SELECT 1 FROM books"),
        ")"
    ))
    .bind(book_id)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Create a book owned by `owner_id`.
pub async fn create_book(
    pool: &SqlitePool,
    owner_id: i64,
    fields: &BookFields,
) -> Result<BookRow, BookError> {
    fields.validate()?;
    let row = sqlx::query_as::<_, BookRow>(
        "INSERT INTO books (title, author, description, user_id) VALUES (?1, ?2, ?3, ?4) \
         RETURNING id, title, author, description, user_id",
    )
    .bind(&fields.title)
    .bind(&fields.author)
    .bind(&fields.description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Overwrite the text fields of an owned book. The owner never changes.
pub async fn update_book(
    pool: &SqlitePool,
    owner_id: i64,
    book_id: i64,
    fields: &BookFields,
) -> Result<BookRow, BookError> {
    fields.validate()?;
    get_book(pool, owner_id, book_id).await?;

    let updated = sqlx::query_as::<_, BookRow>(concat!(
        owned_book!("UPDATE books SET title = ?3, author = ?4, description = ?5"),
        " RETURNING id, title, author, description, user_id"
    ))
    .bind(book_id)
    .bind(owner_id)
    .bind(&fields.title)
    .bind(&fields.author)
    .bind(&fields.description)
    .fetch_optional(pool)
    .await?;

    match updated {
        Some(row) => Ok(row),
        None => Err(missed_write(pool, owner_id, book_id).await),
    }
}

/// Delete an owned book.
pub async fn delete_book(pool: &SqlitePool, owner_id: i64, book_id: i64) -> Result<(), BookError> {
    get_book(pool, owner_id, book_id).await?;

    let result = sqlx::query(owned_book!("DELETE FROM books"))
        .bind(book_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(missed_write(pool, owner_id, book_id).await);
    }
    Ok(())
}

/// Classify a write that matched no row after the book was seen to exist.
///
/// If the row is gone under the same ownership filter it was deleted
/// concurrently, which the caller sees as not found. Anything else is a
/// genuine conflict.
async fn missed_write(pool: &SqlitePool, owner_id: i64, book_id: i64) -> BookError {
    match book_exists(pool, owner_id, book_id).await {
        Ok(false) => BookError::NotFound,
        Ok(true) => {
            warn!(book_id, owner_id, "write matched no rows but book still exists");
            BookError::ConcurrencyConflict
        }
        Err(e) => e,
    }
}
