use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use voter_lookup::config::{init_tracing, ServerConfig};
use voter_lookup::search::engine::VoterDirectory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::parse();

    tracing::info!("Starting voter lookup on {}", config.bind);

    // 1. Read-only dataset:
    let directory = Arc::new(
        VoterDirectory::open(
            &config.database,
            config.max_connections,
            config.match_options(),
        )
        .await?,
    );

    // 2. HTTP Router:
    let app = voter_lookup::router(directory);

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("HTTP server listening on {}", config.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
