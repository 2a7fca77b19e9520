use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{BookId, Review, ReviewPayload},
    routes::AppState,
};

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ReviewPayload>,
) -> AppResult<StatusCode> {
    state.reviews.add_review(user.id(), payload).await?;
    Ok(StatusCode::CREATED)
}

pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Review>>> {
    Ok(Json(state.reviews.get_all_reviews(user.id()).await?))
}

pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<BookId>,
) -> AppResult<Json<Review>> {
    Ok(Json(state.reviews.get_review(user.id(), book_id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<BookId>,
    Json(payload): Json<ReviewPayload>,
) -> AppResult<StatusCode> {
    state
        .reviews
        .update_review(user.id(), book_id, payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(book_id): Path<BookId>,
) -> AppResult<StatusCode> {
    state.reviews.delete_review(user.id(), book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
