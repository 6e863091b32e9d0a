use sqlx::PgPool;
use std::sync::Arc;
use thiserror::Error;

use crate::auth::{AuthError, AuthService};
use crate::database::manager::unique_violation;
use crate::database::models::User;
use crate::validation::is_valid_email;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email inválido")]
    InvalidEmail,

    #[error("Email já cadastrado")]
    EmailTaken,

    // Identical for unknown email and wrong password, so responses don't
    // reveal which accounts exist
    #[error("Email ou senha incorretos")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Account registration and login against the users table.
pub struct UserService {
    pool: PgPool,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(pool: PgPool, auth: Arc<AuthService>) -> Self {
        Self { pool, auth }
    }

    /// Create an account: validate the email shape, refuse duplicates,
    /// store only the bcrypt hash. Returns the persisted row.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, UserError> {
        if !is_valid_email(email) {
            return Err(UserError::InvalidEmail);
        }

        if self.email_exists(email).await? {
            return Err(UserError::EmailTaken);
        }

        let hash = self.auth.hash_password(password)?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(&hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match unique_violation(&e).as_deref() {
            // Concurrent registration slipped past the check; the
            // constraint is the authority
            Some("users_email_key") => UserError::EmailTaken,
            _ => UserError::Database(e),
        })?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Verify credentials and issue a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, UserError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

        if !self.auth.verify_password(password, &user.password) {
            return Err(UserError::InvalidCredentials);
        }

        let token = self.auth.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(token)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE email = $1")
            .bind(email)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }
}
