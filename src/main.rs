use std::sync::Arc;

use word_stats::config::{Config, USAGE};
use word_stats::search::engine::QueryEngine;
use word_stats::search::handlers::routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }

    let config = Config::from_env_and_args()?;

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    tracing::info!("Corpus pattern: {}", config.corpus_pattern);
    tracing::info!(
        "Workers: {} per word (file scans), {} per query (word updates)",
        config.file_workers,
        config.word_workers
    );
    tracing::info!("Duplicate words are counted {}", config.duplicates);
    if let Some(timeout) = config.scan.timeout {
        tracing::info!("Per-file scan timeout: {:?}", timeout);
    }

    let engine = Arc::new(QueryEngine::from_config(&config));
    let app = routes(engine);

    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
