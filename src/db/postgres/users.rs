use sqlx::PgPool;

use super::conflict_on_duplicate;
use crate::{db::UserRepository, error::AppResult, models::User};

/// Account storage backed by `users.identity`
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AppResult<()> {
        sqlx::query("INSERT INTO users.identity (id, username, secret_hash) VALUES ($1, $2, $3)")
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.secret_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                conflict_on_duplicate(e, || {
                    format!("User with username '{}' already exists", user.username)
                })
            })?;
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, secret_hash FROM users.identity WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
