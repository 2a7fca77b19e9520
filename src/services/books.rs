use std::sync::Arc;

use uuid::Uuid;

use crate::{
    db::BookRepository,
    error::{AppError, AppResult},
    models::{Book, BookFilter, BookId, BookPayload, BookUpdate},
};

/// Catalog management
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    /// Adds a book and returns its generated id
    pub async fn add_book(&self, payload: BookPayload) -> AppResult<BookId> {
        let title = payload
            .title
            .filter(|title| !title.trim().is_empty())
            .ok_or_else(|| AppError::InvalidInput("Book should have a title".to_string()))?;

        let book = Book {
            id: Uuid::new_v4(),
            title,
            description: payload.description,
        };
        self.repository.create(&book).await?;

        tracing::info!(book_id = %book.id, "Book added");
        Ok(book.id)
    }

    /// All books, or only those with exactly the filtered title
    pub async fn get_books(&self, filter: BookFilter) -> AppResult<Vec<Book>> {
        match filter.title {
            Some(title) => self.repository.find_by_title(&title).await,
            None => self.repository.find_all().await,
        }
    }

    pub async fn get_book(&self, book_id: BookId) -> AppResult<Book> {
        self.repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id '{}' not found", book_id)))
    }

    pub async fn update_book(&self, book_id: BookId, payload: BookPayload) -> AppResult<()> {
        self.get_book(book_id).await?;
        self.repository
            .update(book_id, &BookUpdate::from(payload))
            .await
    }

    /// Deleting an unknown book is not an error
    pub async fn delete_book(&self, book_id: BookId) -> AppResult<()> {
        self.repository.delete(book_id).await?;
        tracing::info!(book_id = %book_id, "Book deleted");
        Ok(())
    }
}
