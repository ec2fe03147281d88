//! User Model
//!
//! Credential store records and their API-facing projection.

use serde::{Deserialize, Serialize};

/// A user of the data exchange, as used internally after authentication.
///
/// Never serialized with the password hash; see [`UserRow`] for the
/// database-side representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Internal user representation including the password hash.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<UserRow> for User {
    /// Strips the password hash so it can never reach a response body.
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            is_active: row.is_active,
            is_superuser: row.is_superuser,
        }
    }
}

/// The public projection returned by the user-creation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            username: user.username,
            email: user.email,
            is_active: user.is_active,
        }
    }
}
