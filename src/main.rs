use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use todo_category_api::config::{AppConfig, Environment};
use todo_category_api::database::{DatabaseManager, MemoryTodoStore, PgTodoStore, TodoStore};
use todo_category_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting Todo Category API in {:?} mode", config.environment);

    let (store, pg) = open_store(&config).await?;
    let bind_addr = config.bind_addr();
    let router = app(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Todo Category API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    if let Some(pg) = pg {
        pg.close().await;
        tracing::info!("Closed database pool");
    }

    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<(Arc<dyn TodoStore>, Option<PgTodoStore>)> {
    if config.database.url.is_none() && config.environment == Environment::Development {
        tracing::warn!("DATABASE_URL not set, using in-memory store; data is lost on exit");
        let store: Arc<dyn TodoStore> = Arc::new(MemoryTodoStore::new());
        return Ok((store, None));
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    let store = PgTodoStore::new(pool);
    if config.database.run_migrations {
        store.migrate().await?;
    }
    let shared: Arc<dyn TodoStore> = Arc::new(store.clone());
    Ok((shared, Some(store)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
