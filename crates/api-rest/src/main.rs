//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the assessment REST API on its own.
//!
//! ## Intended use
//! Useful for development when you only want the REST server with OpenAPI/Swagger UI.
//! The workspace's main `skillnaav-run` binary serves the same router with graceful
//! shutdown.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{rest_addr_from_lookup, router, AppState};
use skillnaav_core::UpstreamConfig;

/// Main entry point for the SkillNaav REST API server
///
/// # Environment Variables
/// - `SKILLNAAV_REST_ADDR`: Server address (default: "0.0.0.0:$PORT")
/// - `PORT`: Server port when no address is given (default: 5000)
/// - `OPENAI_API_KEY`: Bearer token for the text-generation service (required)
/// - `OPENAI_API_URL`, `OPENAI_MODEL`, `OPENAI_MAX_TOKENS`, `OPENAI_TEMPERATURE`,
///   `OPENAI_TIMEOUT_SECS`: optional upstream overrides
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the upstream configuration is missing or invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("skillnaav_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lookup = |key: &str| std::env::var(key).ok();
    let addr = rest_addr_from_lookup(lookup);
    let cfg = UpstreamConfig::from_lookup(lookup)?;

    tracing::info!("-- Starting SkillNaav REST API on {}", addr);
    tracing::info!("-- Upstream: {} ({})", cfg.api_url(), cfg.model());

    let app = router(AppState::from_config(cfg)?);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
