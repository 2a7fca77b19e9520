use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

pub mod books;
pub mod recommendations;
pub mod reviews;
pub mod state;
pub mod users;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/register", post(users::register))
        .route("/auth", post(users::authenticate))
        // Catalog
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/:book_id",
            get(books::get).patch(books::update).delete(books::delete),
        )
        .route("/books/:book_id/reviews", get(books::reviews))
        // Caller's reviews
        .route("/reviews", get(reviews::list).post(reviews::create))
        .route(
            "/reviews/:book_id",
            get(reviews::get)
                .patch(reviews::update)
                .delete(reviews::delete),
        )
        // Recommendations
        .route("/recommendations", get(recommendations::books))
        .route("/recommendations/ids", get(recommendations::book_ids))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
