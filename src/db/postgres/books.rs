use sqlx::PgPool;

use crate::{
    db::BookRepository,
    error::AppResult,
    models::{Book, BookId, BookUpdate},
};

/// Book catalog backed by `catalog.book`
#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, book: &Book) -> AppResult<()> {
        sqlx::query("INSERT INTO catalog.book (id, title, description) VALUES ($1, $2, $3)")
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.description)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>("SELECT id, title, description FROM catalog.book")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, description FROM catalog.book WHERE title = $1",
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, description FROM catalog.book WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> AppResult<Vec<Book>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, description FROM catalog.book WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn update(&self, id: BookId, update: &BookUpdate) -> AppResult<()> {
        if update.is_empty() {
            return Ok(());
        }

        sqlx::query(
            r#"
            UPDATE catalog.book
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: BookId) -> AppResult<()> {
        sqlx::query("DELETE FROM catalog.book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
