use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use symcheck_core::{CoreConfig, SymptomService};

/// Main entry point for the symptom checker.
///
/// Loads configuration and the condition catalog once, then serves the REST API with
/// OpenAPI/Swagger documentation. A catalog that fails to load stops the process before the
/// listener is bound.
///
/// # Environment Variables
/// - `SYMCHECK_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `SYMCHECK_CATALOG_PATH`: YAML catalog replacing the embedded one
/// - `SYMCHECK_MAX_CONDITIONS`: Conditions returned per analysis (default: 5)
/// - `SYMCHECK_SEARCH_LIMIT`: Results returned per search (default: 10)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, catalog loading, or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("symcheck=info".parse()?)
                .add_directive("symcheck_core=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("SYMCHECK_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:5000".into())
        .parse()?;

    let cfg = CoreConfig::from_env()?;
    let service = SymptomService::from_config(&cfg).inspect_err(|e| {
        tracing::error!("failed to load condition catalog: {e}");
    })?;

    tracing::info!(
        conditions = service.knowledge_base().conditions().len(),
        emergency_rules = service.knowledge_base().emergency_rules().len(),
        "++ Catalog loaded"
    );
    tracing::info!("++ Starting symptom checker REST on {}", rest_addr);
    tracing::info!("++ Swagger UI at http://{}/swagger-ui", rest_addr);

    let app = router(AppState::new(service));
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
