//! Town Square API server entry point.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use townsquare_api::build_router;
use townsquare_api::config::AppConfig;
use townsquare_api::error::AppError;
use townsquare_api::state::AppState;
use townsquare_content::domain::library::ReferenceLibrary;
use townsquare_core::clock::SystemClock;
use townsquare_grimoire::domain::model::Game;
use townsquare_store::memory_repository::InMemorySnapshotRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    if let Err(err) = run().await {
        tracing::error!(error = %err, "server stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    tracing::info!("Starting Town Square API server");

    let config = AppConfig::from_env()?;

    let library = ReferenceLibrary::load(&config.scripts_dir, &config.layouts_dir)?;
    tracing::info!(
        scripts = library.scripts().len(),
        layouts = library.layouts().len(),
        "reference documents loaded"
    );

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemorySnapshotRepository::<Game>::new()),
        Arc::new(library),
    );
    let app = build_router(app_state);

    let addr = config.bind_address()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
