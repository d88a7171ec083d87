//! # Ledger Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the store adapter
//! - Create the ledger service with the configured administrator identity
//! - Start the HTTP server

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ledger_hex::{AdminIdentity, LedgerService, inbound::HttpServer};
use ledger_repo::build_repo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ledger_app=debug,ledger_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting ledger server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build the store (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Create the ledger service; the administrator identity is injected
    // into the authorization guard here, not read from global state.
    let admin = AdminIdentity::new(config.admin_email, config.admin_password);
    let service = LedgerService::new(repo, admin);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
