use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::UserRepository,
    error::{AppError, AppResult},
    models::{Token, User, UserId},
};

/// Claims carried by an access token
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

/// Account registration, password login and bearer token validation
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_secret: &str, token_ttl_minutes: i64) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_ttl: Duration::minutes(token_ttl_minutes),
        }
    }

    /// Creates an account and returns its id
    pub async fn register_user(&self, username: &str, password: &str) -> AppResult<UserId> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username and password are required".to_string(),
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with username '{}' already exists",
                username
            )));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            secret_hash: hash_password(password)?,
        };
        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    /// Checks credentials and issues a token for the user
    pub async fn login(&self, username: &str, password: &str) -> AppResult<Token> {
        let user = self.get_user(username).await?;
        if !verify_password(password, &user.secret_hash)? {
            return Err(AppError::Unauthorized("Password is wrong".to_string()));
        }
        self.create_token(&user)
    }

    pub fn create_token(&self, user: &User) -> AppResult<Token> {
        let expire_at = Utc::now() + self.token_ttl;
        let claims = Claims {
            sub: user.username.clone(),
            exp: expire_at.timestamp() as usize,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))?;

        Ok(Token {
            access_token,
            expire_at,
        })
    }

    /// Resolves a bearer token to the account it was issued for
    pub async fn user_from_token(&self, token: &str) -> AppResult<User> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| {
                tracing::debug!(error = %e, "Rejected access token");
                AppError::Unauthorized("Token is invalid".to_string())
            },
        )?;
        self.get_user(&data.claims.sub).await
    }

    async fn get_user(&self, username: &str) -> AppResult<User> {
        self.users.find_by_username(username).await?.ok_or_else(|| {
            AppError::Unauthorized(format!("User with username '{}' doesn't exist", username))
        })
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, secret_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(secret_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is malformed: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    fn service(ttl_minutes: i64) -> AuthService {
        AuthService::new(Arc::new(InMemoryStore::new()), "test-secret", ttl_minutes)
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service(60);
        let user_id = service.register_user("reader", "pw").await.unwrap();

        let token = service.login("reader", "pw").await.unwrap();
        assert!(token.expire_at > Utc::now());

        let user = service.user_from_token(&token.access_token).await.unwrap();
        assert_eq!(user.id, user_id);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let service = service(60);
        service.register_user("reader", "pw").await.unwrap();

        let result = service.register_user("reader", "other").await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let service = service(60);
        service.register_user("reader", "pw").await.unwrap();

        let result = service.login("reader", "nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_unknown_user_is_unauthorized() {
        let result = service(60).login("ghost", "pw").await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_expired_and_forged_tokens_rejected() {
        let service = service(-10);
        service.register_user("reader", "pw").await.unwrap();
        let expired = service.login("reader", "pw").await.unwrap();

        assert!(matches!(
            service.user_from_token(&expired.access_token).await,
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            service.user_from_token("not-a-token").await,
            Err(AppError::Unauthorized(_))
        ));
    }
}
