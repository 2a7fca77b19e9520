use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::AppError;

pub mod books;
pub mod reviews;
pub mod users;

pub use books::PgBookRepository;
pub use reviews::PgReviewRepository;
pub use users::PgUserRepository;

/// Creates a PostgreSQL connection pool
///
/// Establishes a pool of database connections for efficient reuse.
/// The pool automatically manages connection lifecycle and limits.
pub async fn create_pool(database_url: &str, max_connections: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Applies the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Turns a unique-constraint violation into `Conflict`
///
/// Services check for duplicates before inserting, but two concurrent requests
/// can both pass that check; the constraint then rejects the slower insert.
pub(crate) fn conflict_on_duplicate(
    error: sqlx::Error,
    message: impl FnOnce() -> String,
) -> AppError {
    match error {
        sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
            AppError::Conflict(message())
        }
        other => AppError::Database(other),
    }
}
