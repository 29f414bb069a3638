use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, AppState};
use sketch_blobs::FsBlobStore;
use sketch_core::constants::DEFAULT_DATA_DIR;
use sketch_core::{CoreConfig, FileCoordinator, FileService, UserService};
use sketch_store::Database;

/// Fixed request timeout at the transport boundary. Store calls themselves
/// carry no per-operation cancellation; this bounds the whole request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Main entry point for the Sketchdeck backend.
///
/// Serves the REST API (with OpenAPI/Swagger UI) over the metadata database
/// and the blob store, both rooted in the configured data directory.
///
/// # Environment Variables
/// - `SKETCH_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `SKETCH_DATA_DIR`: Directory for database and blobs (default: "sketch_data")
/// - `SKETCH_SEED_DOCUMENT`: Optional path of the seed document payload
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sketchdeck_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("sketch_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("SKETCH_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = std::env::var("SKETCH_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.into());
    let seed_document = std::env::var("SKETCH_SEED_DOCUMENT").ok().map(PathBuf::from);

    tracing::info!("++ Starting Sketchdeck REST on {}", rest_addr);
    tracing::info!("++ Data directory: {}", data_dir);

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

    let app = build_router(state).layer(TimeoutLayer::new(REQUEST_TIMEOUT));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
