pub mod memory;
pub mod postgres;
pub mod repository;

pub use memory::InMemoryStore;
pub use postgres::{create_pool, run_migrations, PgBookRepository, PgReviewRepository, PgUserRepository};
pub use repository::{BookRepository, ReviewRepository, UserRepository};
