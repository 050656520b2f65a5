//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own.
//!
//! ## Intended use
//! Development and debugging against a single crate. The workspace's main `symcheck-run`
//! binary serves the same router.

use api_rest::{router, AppState};
use symcheck_core::{CoreConfig, SymptomService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Start the REST API server on the configured address (default: 0.0.0.0:5000).
///
/// # Environment Variables
/// - `SYMCHECK_REST_ADDR`: Server address (default: "0.0.0.0:5000")
/// - `SYMCHECK_CATALOG_PATH`, `SYMCHECK_MAX_CONDITIONS`, `SYMCHECK_SEARCH_LIMIT`: see [`CoreConfig`]
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration or catalog is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("symcheck_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("SYMCHECK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".into());

    let cfg = CoreConfig::from_env()?;
    let service = SymptomService::from_config(&cfg)?;

    tracing::info!("-- Starting symptom checker REST API on {}", addr);

    let app = router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
