use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod book;
pub mod review;
pub mod user;

pub use book::{Book, BookFilter, BookPayload, BookUpdate};
pub use review::{Review, ReviewPayload, ReviewUpdate, MAX_RATING, MAX_REVIEW_TEXT_LEN, MIN_RATING};
pub use user::{Credentials, Token, User};

/// Identifier of a book in the catalog
pub type BookId = Uuid;

/// Identifier of a registered user
pub type UserId = Uuid;

/// Response body for endpoints that create a book
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedBook {
    pub book_id: BookId,
}

/// Response body for user registration
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedUser {
    pub user_id: UserId,
}
