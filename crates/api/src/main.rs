use std::sync::Arc;

use anyhow::Context;
use usergate_api::{AppContext, ServerConfig, build_app};
use usergate_infra::{InMemoryUserStore, PostgresUserStore, UserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    usergate_observability::init();

    let config = ServerConfig::from_env().context("invalid configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let users: Arc<dyn UserStore> = match &config.database {
        Some(db) => Arc::new(
            PostgresUserStore::connect(db)
                .await
                .context("failed to connect to the database")?,
        ),
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store (data is lost on exit)");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let app = build_app(AppContext::from_config(&config, users));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
