use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account that owns todos and categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}
