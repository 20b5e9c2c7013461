use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User-owned label that can be attached to any number of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
}

/// Request body for `POST /category`. Ownership always comes from the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub text: String,
}
