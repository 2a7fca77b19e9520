use serde::{Deserialize, Serialize};

use super::BookId;

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: Option<String>,
}

/// Request body for creating or patching a book
///
/// Every field is optional so the same shape serves both operations; creation
/// rejects a missing title.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Fields to overwrite on an existing book
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BookUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }

    /// Applies the present fields to `book`
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(description) = &self.description {
            book.description = Some(description.clone());
        }
    }
}

impl From<BookPayload> for BookUpdate {
    fn from(payload: BookPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
        }
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookFilter {
    pub title: Option<String>,
}
