//! Storage abstractions
//!
//! Services depend on these traits rather than on a concrete backend, so the
//! same service code runs against Postgres in production and the in-memory
//! store in tests.

use crate::{
    error::AppResult,
    models::{Book, BookId, BookUpdate, Review, ReviewUpdate, User, UserId},
};

/// Persistence for the book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, book: &Book) -> AppResult<()>;

    async fn find_all(&self) -> AppResult<Vec<Book>>;

    /// Books whose title matches exactly
    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>>;

    /// Batch lookup
    ///
    /// Ids without a record are skipped. The result order is not guaranteed to
    /// follow `ids`.
    async fn find_by_ids(&self, ids: &[BookId]) -> AppResult<Vec<Book>>;

    async fn update(&self, id: BookId, update: &BookUpdate) -> AppResult<()>;

    async fn delete(&self, id: BookId) -> AppResult<()>;
}

/// Persistence for reviews, keyed by `(user_id, book_id)`
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> AppResult<()>;

    /// Every review in the system
    async fn find_all(&self) -> AppResult<Vec<Review>>;

    async fn find_by_book(&self, book_id: BookId) -> AppResult<Vec<Review>>;

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Review>>;

    async fn find(&self, user_id: UserId, book_id: BookId) -> AppResult<Option<Review>>;

    async fn update(
        &self,
        user_id: UserId,
        book_id: BookId,
        update: &ReviewUpdate,
    ) -> AppResult<()>;

    async fn delete(&self, user_id: UserId, book_id: BookId) -> AppResult<()>;
}

/// Persistence for user accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> AppResult<()>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
