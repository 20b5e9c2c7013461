use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::{Category, NewTodo, Todo, User};
use crate::database::store::TodoStore;

/// Schema statements, applied in order. Each one is idempotent.
const MIGRATIONS: &[(&str, &str)] = &[
    (
        "create_users",
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE
        )",
    ),
    (
        "create_todos",
        "CREATE TABLE IF NOT EXISTS todos (
            id BIGSERIAL PRIMARY KEY,
            text TEXT NOT NULL,
            user_id BIGINT NOT NULL REFERENCES users(id)
        )",
    ),
    (
        "create_categories",
        "CREATE TABLE IF NOT EXISTS categories (
            id BIGSERIAL PRIMARY KEY,
            text TEXT NOT NULL,
            user_id BIGINT NOT NULL REFERENCES users(id)
        )",
    ),
    (
        "create_todo_categories",
        "CREATE TABLE IF NOT EXISTS todo_categories (
            todo_id BIGINT NOT NULL REFERENCES todos(id) ON DELETE CASCADE,
            category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
            PRIMARY KEY (todo_id, category_id)
        )",
    ),
    (
        "index_todo_categories_category",
        "CREATE INDEX IF NOT EXISTS todo_categories_category_idx ON todo_categories (category_id)",
    ),
];

/// Advisory lock key serializing concurrent `migrate` calls
const MIGRATION_LOCK: i64 = 0x746f_646f_6361_74;

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create any missing tables inside a single transaction.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(MIGRATION_LOCK)
            .execute(&mut *tx)
            .await?;
        for (name, sql) in MIGRATIONS {
            sqlx::query(sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| DatabaseError::MigrationError(format!("{}: {}", name, e)))?;
            debug!("Applied migration {}", name);
        }
        tx.commit().await?;
        info!("Database schema is up to date ({} steps)", MIGRATIONS.len());
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn get_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_todo(&self, id: i64) -> Result<Option<Todo>, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>("SELECT id, text, user_id FROM todos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(todo)
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, text, user_id FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn insert_user(&self, username: &str) -> Result<User, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username) VALUES ($1) RETURNING id, username",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_todo(&self, todo: NewTodo) -> Result<Todo, DatabaseError> {
        let todo = sqlx::query_as::<_, Todo>(
            "INSERT INTO todos (text, user_id) VALUES ($1, $2) RETURNING id, text, user_id",
        )
        .bind(&todo.text)
        .bind(todo.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(todo)
    }

    async fn insert_category(&self, text: &str, user_id: i64) -> Result<Category, DatabaseError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (text, user_id) VALUES ($1, $2) RETURNING id, text, user_id",
        )
        .bind(text)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    async fn link(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError> {
        // The composite primary key makes concurrent inserts of the same pair collapse.
        let result = sqlx::query(
            "INSERT INTO todo_categories (todo_id, category_id) VALUES ($1, $2)
             ON CONFLICT (todo_id, category_id) DO NOTHING",
        )
        .bind(todo_id)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn unlink(&self, todo_id: i64, category_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "DELETE FROM todo_categories WHERE todo_id = $1 AND category_id = $2",
        )
        .bind(todo_id)
        .bind(category_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn todos_for_category(&self, category_id: i64) -> Result<Vec<Todo>, DatabaseError> {
        let todos = sqlx::query_as::<_, Todo>(
            "SELECT t.id, t.text, t.user_id
             FROM todos t
             JOIN todo_categories tc ON tc.todo_id = t.id
             WHERE tc.category_id = $1
             ORDER BY t.id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(todos)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
