use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{Book, BookId},
    routes::AppState,
};

/// Top rated books, best first
pub async fn books(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.recommendations.recommendations().await?;
    tracing::info!(
        request_id = %request_id,
        count = books.len(),
        "Recommendations served"
    );
    Ok(Json(books))
}

/// Ids of the top rated books, best first
pub async fn book_ids(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<Vec<BookId>>> {
    let ids = state.recommendations.top_rated_book_ids().await?;
    tracing::info!(
        request_id = %request_id,
        count = ids.len(),
        "Recommended book ids served"
    );
    Ok(Json(ids))
}
