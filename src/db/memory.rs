use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    db::{BookRepository, ReviewRepository, UserRepository},
    error::{AppError, AppResult},
    models::{Book, BookId, BookUpdate, Review, ReviewUpdate, User, UserId},
};

/// In-process store implementing every repository trait
///
/// Clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    books: HashMap<BookId, Book>,
    reviews: HashMap<(UserId, BookId), Review>,
    users: HashMap<String, User>,
}

impl InMemoryStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BookRepository for InMemoryStore {
    async fn create(&self, book: &Book) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().cloned().collect())
    }

    async fn find_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner
            .books
            .values()
            .filter(|book| book.title == title)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[BookId]) -> AppResult<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(ids.iter().filter_map(|id| inner.books.get(id)).cloned().collect())
    }

    async fn update(&self, id: BookId, update: &BookUpdate) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(book) = inner.books.get_mut(&id) {
            update.apply_to(book);
        }
        Ok(())
    }

    async fn delete(&self, id: BookId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.books.remove(&id);
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReviewRepository for InMemoryStore {
    async fn create(&self, review: &Review) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let key = (review.user_id, review.book_id);
        if inner.reviews.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "Review for book {} already exists",
                review.book_id
            )));
        }
        inner.reviews.insert(key, review.clone());
        Ok(())
    }

    async fn find_all(&self) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner.reviews.values().cloned().collect())
    }

    async fn find_by_book(&self, book_id: BookId) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .values()
            .filter(|review| review.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Vec<Review>> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .values()
            .filter(|review| review.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(&self, user_id: UserId, book_id: BookId) -> AppResult<Option<Review>> {
        let inner = self.inner.read().await;
        Ok(inner.reviews.get(&(user_id, book_id)).cloned())
    }

    async fn update(
        &self,
        user_id: UserId,
        book_id: BookId,
        update: &ReviewUpdate,
    ) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(review) = inner.reviews.get_mut(&(user_id, book_id)) {
            update.apply_to(review);
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, book_id: BookId) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        inner.reviews.remove(&(user_id, book_id));
        Ok(())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.username) {
            return Err(AppError::Conflict(format!(
                "User with username '{}' already exists",
                user.username
            )));
        }
        inner.users.insert(user.username.clone(), user.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn review(user_id: UserId, book_id: BookId, rating: i32) -> Review {
        Review {
            book_id,
            user_id,
            rating,
            text: String::new(),
        }
    }

    #[tokio::test]
    async fn test_find_by_ids_skips_missing_books() {
        let store = InMemoryStore::new();
        let book = Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            description: None,
        };
        assert_ok!(BookRepository::create(&store, &book).await);

        let found = store.find_by_ids(&[Uuid::new_v4(), book.id]).await.unwrap();
        assert_eq!(found, vec![book]);
    }

    #[tokio::test]
    async fn test_book_update_only_touches_present_fields() {
        let store = InMemoryStore::new();
        let id = Uuid::new_v4();
        let book = Book {
            id,
            title: "Dune".to_string(),
            description: Some("Spice".to_string()),
        };
        BookRepository::create(&store, &book).await.unwrap();

        let update = BookUpdate {
            title: Some("Dune Messiah".to_string()),
            description: None,
        };
        BookRepository::update(&store, id, &update).await.unwrap();

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Dune Messiah");
        assert_eq!(stored.description, Some("Spice".to_string()));
    }

    #[tokio::test]
    async fn test_review_key_is_user_and_book() {
        let store = InMemoryStore::new();
        let (alice, bob, book) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        assert_ok!(ReviewRepository::create(&store, &review(alice, book, 80)).await);
        assert_ok!(ReviewRepository::create(&store, &review(bob, book, 40)).await);
        assert_err!(ReviewRepository::create(&store, &review(alice, book, 10)).await);

        assert_eq!(store.find_by_book(book).await.unwrap().len(), 2);
        assert_eq!(store.find_by_user(alice).await.unwrap().len(), 1);

        ReviewRepository::delete(&store, alice, book).await.unwrap();
        assert!(store.find(alice, book).await.unwrap().is_none());
        assert_eq!(ReviewRepository::find_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        let user = User {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            secret_hash: "hash".to_string(),
        };

        UserRepository::create(&clone, &user).await.unwrap();
        assert_eq!(store.find_by_username("reader").await.unwrap(), Some(user));
    }
}
