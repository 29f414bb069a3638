//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Useful for development and debugging when you only want the REST server
//! (with OpenAPI/Swagger UI). The workspace's main `sketchdeck-run` binary is
//! the production entry point and adds transport timeouts.

use api_rest::{build_router, AppState};
use sketch_blobs::FsBlobStore;
use sketch_core::{constants::DEFAULT_DATA_DIR, CoreConfig, FileCoordinator, FileService, UserService};
use sketch_store::Database;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Sketchdeck REST API server.
///
/// # Environment Variables
/// - `SKETCH_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SKETCH_DATA_DIR`: Directory for database and blobs (default: "sketch_data")
/// - `SKETCH_SEED_DOCUMENT`: Optional path of the seed document payload
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory or stores cannot be opened, or
/// - the server address cannot be bound.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SKETCH_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("-- Starting Sketchdeck REST API on {}", addr);

    let data_dir =
        std::env::var("SKETCH_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let seed_document = std::env::var("SKETCH_SEED_DOCUMENT").ok().map(PathBuf::from);

    let cfg = CoreConfig::new(PathBuf::from(data_dir), seed_document)?;

    let database = Database::open(&cfg.database_path())?;
    let blobs = Arc::new(FsBlobStore::new(&cfg.blobs_dir())?);
    let coordinator = Arc::new(FileCoordinator::new(
        database.metadata(),
        blobs,
        cfg.seed_document_path().map(Into::into),
    ));

    let state = AppState {
        files: FileService::new(coordinator),
        users: UserService::new(database.users()).with_session_ttl(cfg.session_ttl()),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
