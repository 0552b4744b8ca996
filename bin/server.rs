// Review Analyzer - Web Server
// Seeds the review store, then serves GET/POST on /

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use review_analyzer::{
    load_csv, router, AppState, Config, LocationRegistry, ReviewStore, VaderScorer, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("review_analyzer=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Invalid server configuration")?;
    tracing::info!("Review Analyzer v{}", VERSION);

    let registry = Arc::new(LocationRegistry::new());

    // Seed data is optional; a malformed file is not
    let seed = if config.seed_path.exists() {
        load_csv(&config.seed_path)?
    } else {
        tracing::warn!(
            "Seed file {} not found, starting with an empty store",
            config.seed_path.display()
        );
        Vec::new()
    };
    let store = Arc::new(ReviewStore::seeded(seed, &registry));

    let state = AppState::new(store, registry, Arc::new(VaderScorer::new()));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Listening on port {}...", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
