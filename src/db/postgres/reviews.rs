use sqlx::PgPool;

use super::conflict_on_duplicate;
use crate::{
    db::ReviewRepository,
    error::AppResult,
    models::{BookId, Review, ReviewUpdate, UserId},
};

/// Rating store backed by `catalog.book_review`
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: &Review) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO catalog.book_review (book_id, user_id, rating, text) VALUES ($1, $2, $3, $4)",
        )
        .bind(review.book_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.text)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            conflict_on_duplicate(e, || {
                format!("Review for book {} already exists", review.book_id)
            })
        })?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT book_id, user_id, rating, text FROM catalog.book_review",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn find_by_book(&self, book_id: BookId) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT book_id, user_id, rating, text FROM catalog.book_review WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT book_id, user_id, rating, text FROM catalog.book_review WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn find(&self, user_id: UserId, book_id: BookId) -> AppResult<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT book_id, user_id, rating, text
            FROM catalog.book_review
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(review)
    }

    async fn update(
        &self,
        user_id: UserId,
        book_id: BookId,
        update: &ReviewUpdate,
    ) -> AppResult<()> {
        if update.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            UPDATE catalog.book_review
            SET rating = COALESCE($3, rating),
                text = COALESCE($4, text)
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(update.rating)
        .bind(&update.text)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, user_id: UserId, book_id: BookId) -> AppResult<()> {
        sqlx::query("DELETE FROM catalog.book_review WHERE user_id = $1 AND book_id = $2")
            .bind(user_id)
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
