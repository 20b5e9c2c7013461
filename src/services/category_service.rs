use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, Todo};
use crate::database::store::TodoStore;

#[derive(Debug, thiserror::Error)]
pub enum CategoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

const TODO_OR_CATEGORY_NOT_FOUND: &str = "Todo or Category not found";
const CATEGORY_NOT_FOUND: &str = "Category not found";
const NOT_AUTHORIZED: &str = "Not authorized";

/// Category operations, each authorized against the calling user's id.
#[derive(Clone)]
pub struct CategoryService {
    store: Arc<dyn TodoStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Create a category owned by the caller.
    pub async fn create_category(&self, text: &str, caller_id: i64) -> Result<Category, CategoryError> {
        let category = self.store.insert_category(text, caller_id).await?;
        info!("User {} created category {} ({:?})", caller_id, category.id, category.text);
        Ok(category)
    }

    /// Attach a category to one of the caller's todos. Attaching twice is a no-op.
    pub async fn attach_category(
        &self,
        todo_id: i64,
        category_id: i64,
        caller_id: i64,
    ) -> Result<String, CategoryError> {
        let (todo, category) = self.load_owned_todo(todo_id, category_id, caller_id).await?;

        if self.store.link(todo.id, category.id).await? {
            info!("User {} attached category {} to todo {}", caller_id, category.id, todo.id);
        } else {
            debug!("Category {} already attached to todo {}", category.id, todo.id);
        }

        Ok(format!("Category '{}' added to todo '{}'", category.text, todo.text))
    }

    /// Detach a category from one of the caller's todos. Detaching an absent link is a no-op.
    pub async fn detach_category(
        &self,
        todo_id: i64,
        category_id: i64,
        caller_id: i64,
    ) -> Result<String, CategoryError> {
        let (todo, category) = self.load_owned_todo(todo_id, category_id, caller_id).await?;

        if self.store.unlink(todo.id, category.id).await? {
            info!("User {} detached category {} from todo {}", caller_id, category.id, todo.id);
        } else {
            debug!("Category {} was not attached to todo {}", category.id, todo.id);
        }

        Ok(format!("Category '{}' removed from todo '{}'", category.text, todo.text))
    }

    /// Todos carrying the category. Only the category owner may list them.
    pub async fn list_todos_for_category(
        &self,
        category_id: i64,
        caller_id: i64,
    ) -> Result<Vec<Todo>, CategoryError> {
        let category = self
            .store
            .get_category(category_id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;

        if category.user_id != caller_id {
            warn!("User {} denied listing category {} owned by {}", caller_id, category.id, category.user_id);
            return Err(CategoryError::Forbidden(NOT_AUTHORIZED.to_string()));
        }

        Ok(self.store.todos_for_category(category.id).await?)
    }

    // Only the todo's owner is checked; the category may belong to anyone.
    // TODO: decide with product whether attaching another user's category should be forbidden.
    async fn load_owned_todo(
        &self,
        todo_id: i64,
        category_id: i64,
        caller_id: i64,
    ) -> Result<(Todo, Category), CategoryError> {
        let todo = self.store.get_todo(todo_id).await?;
        let category = self.store.get_category(category_id).await?;

        let (todo, category) = match (todo, category) {
            (Some(todo), Some(category)) => (todo, category),
            _ => return Err(CategoryError::NotFound(TODO_OR_CATEGORY_NOT_FOUND.to_string())),
        };

        if todo.user_id != caller_id {
            warn!("User {} denied access to todo {} owned by {}", caller_id, todo.id, todo.user_id);
            return Err(CategoryError::Forbidden(NOT_AUTHORIZED.to_string()));
        }

        Ok((todo, category))
    }
}
