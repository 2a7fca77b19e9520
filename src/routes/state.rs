use std::sync::Arc;

use sqlx::PgPool;

use crate::{
    config::Config,
    db::{
        BookRepository, InMemoryStore, PgBookRepository, PgReviewRepository, PgUserRepository,
        ReviewRepository, UserRepository,
    },
    services::{AuthService, BookService, RecommendationService, RecommendationSettings, ReviewService},
};

/// Shared application state
///
/// Every service is built once from injected repositories and shared by
/// reference across requests.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub books: Arc<BookService>,
    pub reviews: Arc<ReviewService>,
    pub recommendations: Arc<RecommendationService>,
}

impl AppState {
    /// Wires services on top of the given repositories
    pub fn new(
        books: Arc<dyn BookRepository>,
        reviews: Arc<dyn ReviewRepository>,
        users: Arc<dyn UserRepository>,
        config: &Config,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                users,
                &config.jwt_secret,
                config.token_ttl_minutes,
            )),
            books: Arc::new(BookService::new(books.clone())),
            reviews: Arc::new(ReviewService::new(reviews.clone(), books.clone())),
            recommendations: Arc::new(RecommendationService::new(
                reviews,
                books,
                RecommendationSettings::from(config),
            )),
        }
    }

    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgBookRepository::new(pool.clone())),
            Arc::new(PgReviewRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            config,
        )
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory(config: &Config) -> Self {
        let store = InMemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
            config,
        )
    }
}
