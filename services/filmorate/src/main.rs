use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use filmorate::config::FilmorateConfig;
use filmorate::infra::{DbStore, MemoryStore, Store};
use filmorate::router::build_router;
use filmorate::state::AppState;
use filmorate_core::config::Config as _;
use filmorate_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let config = FilmorateConfig::from_env().context("load configuration")?;

    let store = match &config.database_url {
        Some(url) => {
            let db = Database::connect(url)
                .await
                .context("failed to connect to database")?;
            Store::Postgres(DbStore { db })
        }
        None => Store::Memory(MemoryStore::new()),
    };
    info!(backend = store.backend(), "store ready");

    let router = build_router(AppState { store });
    let http_addr = format!("0.0.0.0:{}", config.filmorate_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind {http_addr}"))?;

    info!("filmorate listening on {http_addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
