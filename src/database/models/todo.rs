use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub text: String,
    pub user_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewTodo {
    pub text: String,
    pub user_id: i64,
}
