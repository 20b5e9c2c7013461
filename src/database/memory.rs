use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewTodo, Todo, User};
use crate::database::store::TodoStore;

/// Process-local store used for development and tests.
///
/// Every table lives behind one lock, so each call is atomic with respect to
/// the others.
#[derive(Default)]
pub struct MemoryTodoStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    todos: BTreeMap<i64, Todo>,
    categories: BTreeMap<i64, Category>,
    // (todo_id, category_id)
    links: BTreeSet<(i64, i64)>,
    next_user_id: i64,
    next_todo_id: i64,
    next_category_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_todo(&self, id: i64) -> Result<Option<Todo>, DatabaseError> {
        Ok(self.tables.read().await.todos.get(&id).cloned())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DatabaseError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_user_id);
        let user = User {
            id,
            username: username.to_string(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&todo.user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", todo.user_id)));
        }
        let id = next_id(&mut tables.next_todo_id);
        let todo = Todo {
            id,
            text: todo.text,
            user_id: todo.user_id,
        };
        tables.todos.insert(id, todo.clone());
        Ok(todo)
    }

    async fn insert_category(&self, text: &str, user_id: i64) -> Result<Category, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(DatabaseError::NotFound(format!("user {}", user_id)));
        }
        let id = next_id(&mut tables.next_category_id);
        let category = Category {
            id,
            text: text.to_string(),
            user_id,
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn link(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.todos.contains_key(&todo_id) || !tables.categories.contains_key(&category_id) {
            return Err(DatabaseError::NotFound(format!(
                "todo {} or category {}",
                todo_id, category_id
            )));
        }
        Ok(tables.links.insert((todo_id, category_id)))
    }

    async fn unlink(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError> {
        Ok(self.tables.write().await.links.remove(&(todo_id, category_id)))
    }

    async fn todos_for_category(&self, category_id: i64) -> Result<Vec<Todo>, DatabaseError> {
        let tables = self.tables.read().await;
        // BTreeSet iteration is ordered by todo_id, matching the SQL ORDER BY.
        let todos = tables
            .links
            .iter()
            .filter(|(_, cat)| *cat == category_id)
            .filter_map(|(todo_id, _)| tables.todos.get(todo_id).cloned())
            .collect();
        Ok(todos)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn assigns_sequential_ids_per_table() {
        let store = MemoryTodoStore::new();
        let alice = store.insert_user("alice").await.unwrap();
        let bob = store.insert_user("bob").await.unwrap();
        assert_eq!((alice.id, bob.id), (1, 2));

        let cat = store.insert_category("Work", alice.id).await.unwrap();
        assert_eq!(cat.id, 1);
        let todo = store
            .insert_todo(NewTodo { text: "Ship it".into(), user_id: bob.id })
            .await
            .unwrap();
        assert_eq!(todo.id, 1);
    }

    #[tokio::test]
    async fn link_reports_changes_and_keeps_set_semantics() {
        let store = MemoryTodoStore::new();
        let user = store.insert_user("alice").await.unwrap();
        let cat = store.insert_category("Home", user.id).await.unwrap();
        let a = store.insert_todo(NewTodo { text: "a".into(), user_id: user.id }).await.unwrap();
        let b = store.insert_todo(NewTodo { text: "b".into(), user_id: user.id }).await.unwrap();

        assert!(store.link(b.id, cat.id).await.unwrap());
        assert!(store.link(a.id, cat.id).await.unwrap());
        assert!(!store.link(a.id, cat.id).await.unwrap());

        let ids: Vec<i64> = store.todos_for_category(cat.id).await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);

        assert!(store.unlink(a.id, cat.id).await.unwrap());
        assert!(!store.unlink(a.id, cat.id).await.unwrap());
        assert_eq!(store.todos_for_category(cat.id).await.unwrap(), vec![b]);
    }

    #[tokio::test]
    async fn rejects_rows_for_unknown_owners() {
        let store = MemoryTodoStore::new();
        assert!(matches!(
            store.insert_category("Orphan", 42).await,
            Err(DatabaseError::NotFound(_))
        ));
        assert!(matches!(store.link(1, 1).await, Err(DatabaseError::NotFound(_))));
    }
}
