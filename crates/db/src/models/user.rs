//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablero_core::types::{DbId, Timestamp};
use validator::Validate;

/// A user row from the `users` table. The password hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Request body for creating a user (admin endpoint). The plaintext
/// password is hashed in the api layer before it reaches the repository.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUser {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Defaults to `user` if omitted.
    pub role: Option<String>,
}

/// Insert values for the `users` table (password already hashed).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub role: String,
}

/// Minimal projection used to resolve display names for log metadata.
#[derive(Debug, Clone, FromRow)]
pub struct UserRef {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
}
