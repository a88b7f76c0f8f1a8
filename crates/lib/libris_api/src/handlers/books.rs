//! Book request handlers. All routes sit behind `require_auth`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{BookRequest, BookResponse};
use crate::services::books;

/// `GET /api/books`: the caller's books.
pub async fn list_books_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> AppResult<Json<Vec<BookResponse>>> {
    Ok(Json(books::list(&state.pool, user.id).await?))
}

/// `GET /api/books/{id}`: one of the caller's books.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookResponse>> {
    Ok(Json(books::get(&state.pool, user.id, id).await?))
}

/// `POST /api/books`: create a book owned by the caller.
pub async fn create_book_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let Json(body) = body?;
    let book = books::create(&state.pool, user.id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// `PUT /api/books/{id}`: overwrite title, author and description.
pub async fn update_book_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> AppResult<StatusCode> {
    let Json(body) = body?;
    books::update(&state.pool, user.id, id, body.into()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/books/{id}`
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    books::delete(&state.pool, user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
