//! Extraction server binary
//!
//! Run with: cargo run -p doc-extract --bin doc-extract-server

use doc_extract::{config::ExtractConfig, server::ExtractServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_extract=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ExtractConfig::from_env()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Data directory: {}", config.storage.data_dir.display());
    tracing::info!("  - PDF backend: {:?}", config.pdf.backend);
    tracing::info!("  - Max upload size: {} bytes", config.server.max_upload_size);

    // Create and start server
    let server = ExtractServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("  Ready:  http://{}/ready", server.address());
    println!("\nEndpoints:");
    println!("  POST /api/upload         - Store a document");
    println!("  POST /api/extract        - Extract text from a stored document");
    println!("  GET  /api/documents/:id  - Get a document record");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
