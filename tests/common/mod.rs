#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use todo_category_api::auth::{generate_jwt, Claims};
use todo_category_api::config::AppConfig;
use todo_category_api::database::models::{NewTodo, Todo, User};
use todo_category_api::database::{MemoryTodoStore, TodoStore};
use todo_category_api::{app, AppState};

/// In-process server bound to an ephemeral port, backed by the in-memory store.
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryTodoStore>,
    pub config: AppConfig,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let config = AppConfig::development();
        let store = Arc::new(MemoryTodoStore::new());
        let router = app(AppState::new(config.clone(), store.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind test listener")?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            store,
            config,
            client: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create a user directly in the store and return a bearer token for it.
    pub async fn user(&self, username: &str) -> Result<(User, String)> {
        let user = self.store.insert_user(username).await?;
        let token = self.token_for(&user)?;
        Ok((user, token))
    }

    pub fn token_for(&self, user: &User) -> Result<String> {
        Ok(generate_jwt(&Claims::new(user.id, &user.username, 1)?, &self.config.security)?)
    }

    pub async fn todo(&self, owner: &User, text: &str) -> Result<Todo> {
        Ok(self
            .store
            .insert_todo(NewTodo { text: text.to_string(), user_id: owner.id })
            .await?)
    }
}
