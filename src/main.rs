use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, rest_addr_from_lookup, router};
use skillnaav_core::UpstreamConfig;

/// Main entry point for the SkillNaav service
///
/// Resolves configuration once, wires the OpenAI-backed generation client into the
/// assessment service and serves the REST API until interrupted.
///
/// # Environment Variables
/// - `SKILLNAAV_REST_ADDR`: REST server address (default: "0.0.0.0:$PORT")
/// - `PORT`: REST server port when no address is given (default: 5000)
/// - `OPENAI_API_KEY`: Bearer token for the text-generation service (required)
/// - `OPENAI_API_URL`, `OPENAI_MODEL`, `OPENAI_MAX_TOKENS`, `OPENAI_TEMPERATURE`,
///   `OPENAI_TIMEOUT_SECS`: optional upstream overrides
///
/// # Returns
/// * `Ok(())` - If the server starts and shuts down cleanly
/// * `Err(anyhow::Error)` - If configuration, binding or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillnaav_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("skillnaav_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lookup = |key: &str| std::env::var(key).ok();
    let rest_addr = rest_addr_from_lookup(lookup);
    let cfg = UpstreamConfig::from_lookup(lookup)?;

    tracing::info!("++ Starting SkillNaav REST on {}", rest_addr);
    tracing::info!("++ Upstream model {} at {}", cfg.model(), cfg.api_url());

    let app = router(AppState::from_config(cfg)?);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("++ SkillNaav REST stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
