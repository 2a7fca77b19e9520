use serde::{Deserialize, Serialize};

use super::{BookId, UserId};

/// Lowest rating a review may carry
pub const MIN_RATING: i32 = 0;

/// Highest rating a review may carry
pub const MAX_RATING: i32 = 100;

/// Maximum review text length, in characters
pub const MAX_REVIEW_TEXT_LEN: usize = 500;

/// A single user's review of a book
///
/// At most one review exists per `(user_id, book_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Review {
    pub book_id: BookId,
    pub user_id: UserId,
    pub rating: i32,
    pub text: String,
}

/// Request body for creating or patching a review
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReviewPayload {
    pub book_id: Option<BookId>,
    pub rating: Option<i32>,
    pub text: Option<String>,
}

/// Fields to overwrite on an existing review
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewUpdate {
    pub rating: Option<i32>,
    pub text: Option<String>,
}

impl ReviewUpdate {
    pub fn is_empty(&self) -> bool {
        self.rating.is_none() && self.text.is_none()
    }

    /// Applies the present fields to `review`
    pub fn apply_to(&self, review: &mut Review) {
        if let Some(rating) = self.rating {
            review.rating = rating;
        }
        if let Some(text) = &self.text {
            review.text = text.clone();
        }
    }
}
