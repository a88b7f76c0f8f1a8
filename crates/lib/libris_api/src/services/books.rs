//! Book service: owner-scoped CRUD over `libris_core::books`.
//!
//! The owner is always the authenticated caller; nothing in a request body
//! can change it.

use sqlx::SqlitePool;
use tracing::info;

use libris_core::books::{self, BookFields};

use crate::error::AppResult;
use crate::models::BookResponse;

pub async fn list(pool: &SqlitePool, owner_id: i64) -> AppResult<Vec<BookResponse>> {
    let rows = books::list_books(pool, owner_id).await?;
    Ok(rows.into_iter().map(BookResponse::from).collect())
}

pub async fn get(pool: &SqlitePool, owner_id: i64, book_id: i64) -> AppResult<BookResponse> {
    Ok(books::get_book(pool, owner_id, book_id).await?.into())
}

pub async fn create(
    pool: &SqlitePool,
    owner_id: i64,
    fields: BookFields,
) -> AppResult<BookResponse> {
    let row = books::create_book(pool, owner_id, &fields).await?;
    info!(book_id = row.id, owner_id, "book created");
    Ok(row.into())
}

pub async fn update(
    pool: &SqlitePool,
    owner_id: i64,
    book_id: i64,
    fields: BookFields,
) -> AppResult<()> {
    books::update_book(pool, owner_id, book_id, &fields).await?;
    info!(book_id, owner_id, "book updated");
    Ok(())
}

pub async fn delete(pool: &SqlitePool, owner_id: i64, book_id: i64) -> AppResult<()> {
    books::delete_book(pool, owner_id, book_id).await?;
    info!(book_id, owner_id, "book deleted");
    Ok(())
}
