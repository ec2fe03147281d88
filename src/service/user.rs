//! User Service
//!
//! The credential store: creates users with bcrypt-hashed passwords and
//! authenticates client-credentials pairs against them. Lookup misses and
//! password mismatches are indistinguishable to callers, which keeps user
//! enumeration off the table.

use sqlx::PgPool;
use thiserror::Error;

use crate::models::requests::CreateUserRequest;
use crate::models::user::{User, UserRow};
use crate::utils::error::AppError;
use crate::utils::security::{hash_password_with_cost, verify_password, DEFAULT_BCRYPT_COST};
use crate::utils::validation::normalize_email;

/// Errors of the user service
#[derive(Error, Debug)]
pub enum UserServiceError {
    /// A user with the same email already exists
    #[error("A user with this email already exists")]
    EmailAlreadyExists,

    /// A user with the same username already exists
    #[error("A user with this username already exists")]
    UsernameAlreadyExists,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing operation failed
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

impl From<UserServiceError> for AppError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::EmailAlreadyExists => {
                AppError::DuplicateEntry("A user with this email already exists".to_string())
            }
            UserServiceError::UsernameAlreadyExists => {
                AppError::DuplicateEntry("A user with this username already exists".to_string())
            }
            UserServiceError::Database(e) => AppError::Database(e),
            UserServiceError::Hashing(e) => AppError::Hashing(e),
        }
    }
}

/// Result type for user service operations
pub type UserServiceResult<T> = Result<T, UserServiceError>;

/// Credential store backed by the users table.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// Lower the hashing cost, e.g. for tests.
    pub fn with_bcrypt_cost(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Create a new user. Email uniqueness is checked before username; the
    /// first violation wins. Store-level constraints back the same checks,
    /// so a concurrent insert still surfaces as a duplicate.
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
        is_superuser: bool,
    ) -> UserServiceResult<User> {
        let email = normalize_email(&request.email);

        let email_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(&email)
        .fetch_one(&self.pool)
        .await?;
        if email_taken {
            return Err(UserServiceError::EmailAlreadyExists);
        }

        let username_taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(&request.username)
        .fetch_one(&self.pool)
        .await?;
        if username_taken {
            return Err(UserServiceError::UsernameAlreadyExists);
        }

        let hashed_password = hash_password_with_cost(&request.password, self.bcrypt_cost)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, hashed_password, is_active, is_superuser)
            VALUES ($1, $2, $3, TRUE, $4)
            RETURNING id, username, email, hashed_password, is_active, is_superuser
            "#,
        )
        .bind(&request.username)
        .bind(&email)
        .bind(&hashed_password)
        .bind(is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                if db_err.constraint() == Some("users_username_key") {
                    UserServiceError::UsernameAlreadyExists
                } else {
                    UserServiceError::EmailAlreadyExists
                }
            }
            _ => UserServiceError::Database(e),
        })?;

        log::info!("created user {}", row.email);
        Ok(row.into())
    }

    /// Verify a client-credentials pair. Returns `None` both when the
    /// identifier is unknown and when the secret does not match.
    pub async fn authenticate(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> UserServiceResult<Option<User>> {
        let email = normalize_email(client_id);

        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, hashed_password, is_active, is_superuser \
             FROM users WHERE email = $1",
        )
        .bind(&email)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        if verify_password(client_secret, &row.hashed_password)? {
            Ok(Some(row.into()))
        } else {
            Ok(None)
        }
    }

    /// Resolve a token subject to a user.
    pub async fn find_by_email(&self, email: &str) -> UserServiceResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, email, hashed_password, is_active, is_superuser \
             FROM users WHERE email = $1",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Total number of users, irrespective of status.
    pub async fn count(&self) -> UserServiceResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Store round-trip used by the liveness endpoint.
    pub async fn health_check(&self) -> UserServiceResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
