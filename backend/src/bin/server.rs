//! atsched HTTP server binary.
//!
//! Loads configuration, creates the repository, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin atsched-server
//!
//! # Explicit configuration file and port
//! ATSCHED_CONFIG=./atsched.toml PORT=9000 cargo run --bin atsched-server
//! ```
//!
//! # Environment Variables
//!
//! - `ATSCHED_CONFIG`: Path to a TOML configuration file (default: search for `atsched.toml`)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use atsched::config::AppConfig;
use atsched::db::RepositoryFactory;
use atsched::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Library code logs through `log`; the subscriber picks those records up too
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting atsched HTTP server");

    let config = AppConfig::from_env_or_default().context("Failed to load configuration")?;
    let repository =
        RepositoryFactory::from_config(&config).context("Failed to create repository")?;
    info!(
        "Repository initialized ({}), default site {}",
        config.repository.repo_type, config.observatory.telescope
    );

    let state = AppState::new(repository).with_site(config.observatory.clone());
    let app = create_router(state);

    // Hostnames resolve here, so HOST=localhost is accepted
    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
