use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewTodo, Todo, User};

/// Persistence primitives the API is written against.
///
/// Lookups return `Ok(None)` for a missing row; callers decide whether that is a 404.
/// `link` and `unlink` report whether the association actually changed so the
/// caller can tell a mutation from a no-op.
#[async_trait]
pub trait TodoStore: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    async fn get_todo(&self, id: i64) -> Result<Option<Todo>, DatabaseError>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DatabaseError>;

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError>;

    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, DatabaseError>;

    async fn insert_category(&self, text: &str, user_id: i64) -> Result<Category, DatabaseError>;

    async fn link(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError>;

    async fn unlink(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError>;

    /// Todos associated with the category, ordered by todo id.
    async fn todos_for_category(&self, category_id: i64) -> Result<Vec<Todo>, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}
