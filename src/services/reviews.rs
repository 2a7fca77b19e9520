use std::sync::Arc;

use crate::{
    db::{BookRepository, ReviewRepository},
    error::{AppError, AppResult},
    models::{
        BookId, Review, ReviewPayload, ReviewUpdate, UserId, MAX_RATING, MAX_REVIEW_TEXT_LEN,
        MIN_RATING,
    },
};

fn validate_rating(rating: i32) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::InvalidInput(format!(
            "Review rating should be in range [{}, {}]",
            MIN_RATING, MAX_RATING
        )));
    }
    Ok(())
}

fn validate_text(text: &str) -> AppResult<()> {
    if text.chars().count() > MAX_REVIEW_TEXT_LEN {
        return Err(AppError::InvalidInput(format!(
            "Review text should not exceed {} symbols",
            MAX_REVIEW_TEXT_LEN
        )));
    }
    Ok(())
}

/// Per-user review management
///
/// This is the only write path into the rating store, so every review it
/// persists has a rating in `[0, 100]`, bounded text and an existing book.
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    books: Arc<dyn BookRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { reviews, books }
    }

    pub async fn add_review(&self, user_id: UserId, payload: ReviewPayload) -> AppResult<()> {
        let book_id = payload
            .book_id
            .ok_or_else(|| AppError::InvalidInput("Review should have a book_id".to_string()))?;

        if self.reviews.find(user_id, book_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Review for book {} already exists",
                book_id
            )));
        }

        let rating = payload
            .rating
            .ok_or_else(|| AppError::InvalidInput("Review should have a rating".to_string()))?;
        validate_rating(rating)?;

        let text = payload.text.unwrap_or_default();
        validate_text(&text)?;

        self.ensure_book_exists(book_id).await?;

        let review = Review {
            book_id,
            user_id,
            rating,
            text,
        };
        self.reviews.create(&review).await?;

        tracing::info!(user_id = %user_id, book_id = %book_id, rating, "Review added");
        Ok(())
    }

    pub async fn get_review(&self, user_id: UserId, book_id: BookId) -> AppResult<Review> {
        self.ensure_book_exists(book_id).await?;
        self.reviews
            .find(user_id, book_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Review of the book '{}' not found", book_id))
            })
    }

    /// Every review written by `user_id`
    pub async fn get_all_reviews(&self, user_id: UserId) -> AppResult<Vec<Review>> {
        self.reviews.find_by_user(user_id).await
    }

    /// Every review of `book_id`, from all users
    pub async fn get_book_reviews(&self, book_id: BookId) -> AppResult<Vec<Review>> {
        self.ensure_book_exists(book_id).await?;
        self.reviews.find_by_book(book_id).await
    }

    pub async fn update_review(
        &self,
        user_id: UserId,
        book_id: BookId,
        payload: ReviewPayload,
    ) -> AppResult<()> {
        self.get_review(user_id, book_id).await?;

        if let Some(rating) = payload.rating {
            validate_rating(rating)?;
        }
        if let Some(text) = &payload.text {
            validate_text(text)?;
        }

        let update = ReviewUpdate {
            rating: payload.rating,
            text: payload.text,
        };
        self.reviews.update(user_id, book_id, &update).await
    }

    pub async fn delete_review(&self, user_id: UserId, book_id: BookId) -> AppResult<()> {
        self.reviews.delete(user_id, book_id).await
    }

    async fn ensure_book_exists(&self, book_id: BookId) -> AppResult<()> {
        match self.books.find_by_id(book_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::InvalidInput(format!(
                "Book with id '{}' not found",
                book_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{MockBookRepository, MockReviewRepository};
    use crate::models::Book;
    use uuid::Uuid;

    fn books_with(book_id: BookId) -> MockBookRepository {
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().returning(move |id| {
            Ok((id == book_id).then(|| Book {
                id,
                title: "Dune".to_string(),
                description: None,
            }))
        });
        books
    }

    fn payload(book_id: BookId, rating: i32, text: &str) -> ReviewPayload {
        ReviewPayload {
            book_id: Some(book_id),
            rating: Some(rating),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(0).is_ok());
        assert!(validate_rating(100).is_ok());
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(101).is_err());
    }

    #[test]
    fn test_text_length_counts_characters() {
        assert!(validate_text(&"é".repeat(MAX_REVIEW_TEXT_LEN)).is_ok());
        assert!(validate_text(&"a".repeat(MAX_REVIEW_TEXT_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_add_review_persists() {
        let (user_id, book_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find().returning(|_, _| Ok(None));
        reviews
            .expect_create()
            .withf(move |review| {
                review.user_id == user_id && review.book_id == book_id && review.rating == 73
            })
            .times(1)
            .returning(|_| Ok(()));
        let service = ReviewService::new(Arc::new(reviews), Arc::new(books_with(book_id)));

        assert!(service
            .add_review(user_id, payload(book_id, 73, "Great"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_add_review_twice_conflicts() {
        let (user_id, book_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find().returning(move |user_id, book_id| {
            Ok(Some(Review {
                book_id,
                user_id,
                rating: 50,
                text: String::new(),
            }))
        });
        reviews.expect_create().never();
        let service = ReviewService::new(Arc::new(reviews), Arc::new(books_with(book_id)));

        let result = service.add_review(user_id, payload(book_id, 60, "")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_add_review_rejects_invalid_input() {
        let (user_id, book_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find().returning(|_, _| Ok(None));
        reviews.expect_create().never();
        let service = ReviewService::new(Arc::new(reviews), Arc::new(books_with(book_id)));

        let invalid = vec![
            ReviewPayload {
                book_id: None,
                rating: Some(50),
                text: None,
            },
            ReviewPayload {
                book_id: Some(book_id),
                rating: None,
                text: None,
            },
            payload(book_id, 101, ""),
            payload(book_id, -5, ""),
            payload(book_id, 50, &"x".repeat(501)),
            payload(Uuid::new_v4(), 50, ""),
        ];

        for request in invalid {
            let result = service.add_review(user_id, request).await;
            assert!(matches!(result, Err(AppError::InvalidInput(_))));
        }
    }

    #[tokio::test]
    async fn test_get_review_missing_is_not_found() {
        let (user_id, book_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find().returning(|_, _| Ok(None));
        let service = ReviewService::new(Arc::new(reviews), Arc::new(books_with(book_id)));

        let result = service.get_review(user_id, book_id).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_review_validates_rating() {
        let (user_id, book_id) = (Uuid::new_v4(), Uuid::new_v4());
        let mut reviews = MockReviewRepository::new();
        reviews.expect_find().returning(move |user_id, book_id| {
            Ok(Some(Review {
                book_id,
                user_id,
                rating: 50,
                text: String::new(),
            }))
        });
        reviews.expect_update().never();
        let service = ReviewService::new(Arc::new(reviews), Arc::new(books_with(book_id)));

        let request = ReviewPayload {
            book_id: None,
            rating: Some(150),
            text: None,
        };
        let result = service.update_review(user_id, book_id, request).await;

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }
}
