mod config;
mod db;
mod errors;
mod models;
mod page_client;
mod records;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, ensure_schema};
use crate::models::bookmark::Bookmark;
use crate::models::note::Note;
use crate::page_client::HttpPageFetcher;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{EntityStore, MemoryStore, PgStore};

type Stores = (Arc<dyn EntityStore<Note>>, Arc<dyn EntityStore<Bookmark>>);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Notemark API v{}", env!("CARGO_PKG_VERSION"));

    let (notes, bookmarks) = build_stores(&config).await?;

    let fetcher = HttpPageFetcher::new(config.title_fetch_timeout, config.title_fetch_max_bytes)?;
    info!(
        "Title fetcher initialized (timeout {:?}, cap {} bytes)",
        config.title_fetch_timeout, config.title_fetch_max_bytes
    );

    let state = AppState::new(
        notes,
        bookmarks,
        Arc::new(fetcher),
        config.title_fetch_timeout,
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the store backend from `DATABASE_URL`.
async fn build_stores(config: &Config) -> Result<Stores> {
    if config.uses_memory_store() {
        info!("Using in-memory store; records are lost on exit");
        let notes: Arc<dyn EntityStore<Note>> = Arc::new(MemoryStore::<Note>::new());
        let bookmarks: Arc<dyn EntityStore<Bookmark>> = Arc::new(MemoryStore::<Bookmark>::new());
        return Ok((notes, bookmarks));
    }

    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;
    let store = PgStore::new(pool);
    let notes: Arc<dyn EntityStore<Note>> = Arc::new(store.clone());
    let bookmarks: Arc<dyn EntityStore<Bookmark>> = Arc::new(store);
    Ok((notes, bookmarks))
}
