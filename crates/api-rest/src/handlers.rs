use crate::error::ApiError;
use crate::AppState;
use api_shared::validation::{
    validate_analyze_req, validate_emergency_symptoms, validate_search_query,
};
use api_shared::{
    AnalysisRes, AnalyzeReq, CommonSymptomsRes, ConditionSummary, EmergencyCheckReq,
    EmergencyCheckRes, ErrorRes, HealthRes, HealthService, HealthTipsQuery, HealthTipsRes,
    SearchConditionsRes, SearchQuery, ValidationError,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::response::Json;

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body = AnalyzeReq,
    responses(
        (status = 200, description = "Analysis result", body = AnalysisRes),
        (status = 400, description = "Missing fields or invalid values", body = ErrorRes)
    )
)]
/// Analyse a symptom description.
///
/// All value errors are collected and returned together. A description that matches nothing
/// still returns 200 with a generic, low-confidence result.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - the body is not JSON,
/// - a required field is missing, or
/// - any value fails validation.
#[axum::debug_handler]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeReq>, JsonRejection>,
) -> Result<Json<AnalysisRes>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::MalformedBody(e.body_text()))?;
    let request = validate_analyze_req(&req)?;

    tracing::info!(
        age = request.age,
        gender = request.gender.as_str(),
        "analysing symptoms"
    );

    let result = state.service.analyze(&request);
    Ok(Json(AnalysisRes::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/symptoms/common",
    responses(
        (status = 200, description = "Every catalog keyword, sorted", body = CommonSymptomsRes)
    )
)]
#[axum::debug_handler]
pub async fn common_symptoms(State(state): State<AppState>) -> Json<CommonSymptomsRes> {
    Json(CommonSymptomsRes::from(state.service.common_symptoms()))
}

#[utoipa::path(
    get,
    path = "/api/conditions/search",
    params(
        ("q" = Option<String>, Query, description = "Name or keyword fragment, at least 2 characters")
    ),
    responses(
        (status = 200, description = "Matching conditions", body = SearchConditionsRes),
        (status = 400, description = "Query too short", body = ErrorRes)
    )
)]
/// Search conditions by name or keyword.
#[axum::debug_handler]
pub async fn search_conditions(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchConditionsRes>, ApiError> {
    let query = validate_search_query(params.q.as_deref()).map_err(|e| match e {
        ValidationError::Invalid(errors) => {
            ApiError::InvalidQuery(errors.into_iter().next().unwrap_or_default())
        }
        other => ApiError::Validation(other),
    })?;

    let results: Vec<ConditionSummary> = state
        .service
        .search_conditions(query)
        .into_iter()
        .map(ConditionSummary::from)
        .collect();

    Ok(Json(SearchConditionsRes {
        query: query.to_owned(),
        count: results.len(),
        results,
    }))
}

#[utoipa::path(
    post,
    path = "/api/emergency/check",
    request_body = EmergencyCheckReq,
    responses(
        (status = 200, description = "Emergency findings", body = EmergencyCheckRes),
        (status = 400, description = "No symptoms provided", body = ErrorRes)
    )
)]
/// Run only the emergency detector over free text.
#[axum::debug_handler]
pub async fn emergency_check(
    State(state): State<AppState>,
    payload: Result<Json<EmergencyCheckReq>, JsonRejection>,
) -> Result<Json<EmergencyCheckRes>, ApiError> {
    let Json(req) = payload.map_err(|_| ApiError::NoSymptoms)?;
    let text = validate_emergency_symptoms(req.symptoms.as_deref())
        .map_err(|_| ApiError::NoSymptoms)?;

    let check = state.service.check_emergency(text);
    if check.is_emergency {
        tracing::warn!(
            findings = check.findings.len(),
            "emergency check found warning signs"
        );
    }
    Ok(Json(EmergencyCheckRes::from(check)))
}

#[utoipa::path(
    get,
    path = "/api/health-tips",
    params(
        ("condition" = Option<String>, Query, description = "Exact condition name")
    ),
    responses(
        (status = 200, description = "Condition self-care tips followed by general tips", body = HealthTipsRes)
    )
)]
#[axum::debug_handler]
pub async fn health_tips(
    State(state): State<AppState>,
    Query(params): Query<HealthTipsQuery>,
) -> Json<HealthTipsRes> {
    let tips = state.service.health_tips(params.condition.as_deref());
    Json(HealthTipsRes {
        condition: params.condition,
        tips,
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
