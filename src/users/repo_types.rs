use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,          // assigned by the store
    pub email: String,    // unique
    #[serde(skip_serializing)]
    pub password: String, // Argon2 hash, not exposed in JSON
}
