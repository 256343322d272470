//! Postboard server
//!
//! Serves the post API over a SQLite document store and a filesystem blob store.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use postboard::blob::FsBlobStore;
use postboard::config::Config;
use postboard::service::BackendPostService;
use postboard::store::SqliteDocumentStore;
use postboard::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting postboard");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Blob directory: {:?}", config.blob_dir);
    tracing::info!("Public URL: {}", config.public_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize stores
    let documents = Arc::new(SqliteDocumentStore::open(&config.db_path).await?);
    let blobs = Arc::new(FsBlobStore::open(&config.blob_dir, &config.public_url).await?);
    let service = Arc::new(BackendPostService::new(documents, blobs));

    let state = AppState {
        service,
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
