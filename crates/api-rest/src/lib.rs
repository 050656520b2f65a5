//! # API REST
//!
//! REST API for the symptom checker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON error bodies, CORS, request tracing)
//!
//! Uses `api-shared` for DTOs and validation, and `symcheck-core` for the analysis itself.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod handlers;

pub use error::ApiError;

use api_shared::dto;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use symcheck_core::SymptomService;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared by every handler.
///
/// Holds the analysis service; the knowledge base inside it is read-only, so no locking.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SymptomService>,
}

impl AppState {
    pub fn new(service: SymptomService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::analyze,
        handlers::common_symptoms,
        handlers::search_conditions,
        handlers::emergency_check,
        handlers::health_tips,
    ),
    components(schemas(
        dto::HealthRes,
        dto::AnalyzeReq,
        dto::AnalysisRes,
        dto::InputData,
        dto::CommonSymptomsRes,
        dto::ConditionSummary,
        dto::SearchConditionsRes,
        dto::EmergencyCheckReq,
        dto::EmergencyCheckRes,
        dto::WarningSign,
        dto::HealthTipsRes,
        dto::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the full REST router: API routes, Swagger UI, JSON 404 fallback, CORS and tracing.
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/symptoms/common", get(handlers::common_symptoms))
        .route("/api/conditions/search", get(handlers::search_conditions))
        .route("/api/emergency/check", post(handlers::emergency_check))
        .route("/api/health-tips", get(handlers::health_tips))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback(handlers::not_found);
    with_middleware(routes).with_state(state)
}

// Panics are caught innermost so the 500 still passes through tracing and CORS.
fn with_middleware(routes: Router<AppState>) -> Router<AppState> {
    routes
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
