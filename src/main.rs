use std::{path::Path, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use peerpost_api::{
    create_router,
    services::{RecommendationResolver, SimilarityStore, SqlitePostStore},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    // Artifacts must load before any traffic is served
    let similarity = SimilarityStore::load(
        Path::new(&config.posts_path),
        Path::new(&config.similarity_path),
    )
    .context("Failed to load similarity artifacts")?;

    let resolver = RecommendationResolver::new(Arc::new(similarity), config.recommendation_limit);
    let store = SqlitePostStore::new(&config.database_path);
    let state = AppState::new(Arc::new(store), resolver, config.default_category.as_str());

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        addr = %addr,
        database = %config.database_path,
        debug = config.debug,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
