use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookFilter, BookId, BookPayload, CreatedBook, Review},
    routes::AppState,
};

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<CreatedBook>)> {
    let book_id = state.books.add_book(payload).await?;
    Ok((StatusCode::CREATED, Json(CreatedBook { book_id })))
}

pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<BookFilter>,
) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(state.books.get_books(filter).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> AppResult<Json<Book>> {
    Ok(Json(state.books.get_book(book_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
    Json(payload): Json<BookPayload>,
) -> AppResult<StatusCode> {
    state.books.update_book(book_id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> AppResult<StatusCode> {
    state.books.delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// All reviews of one book
pub async fn reviews(
    State(state): State<AppState>,
    Path(book_id): Path<BookId>,
) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.reviews.get_book_reviews(book_id).await?))
}
