use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::budget::editor::update_category;
use crate::budget::report::build_allocation_report;
use crate::budget::tables::AllocationTables;
use crate::budget::{AllocationReport, BudgetBreakdown, BudgetCategory};
use crate::config::Config;
use crate::itinerary::editor::{apply_edit, ItineraryEdit};
use crate::itinerary::pipeline::generate_itinerary;
use crate::itinerary::DayPlan;
use crate::trip::{TripParameters, TripRequest};

#[derive(Clone)]
struct ApiState {
    config: Config,
    tables: Arc<AllocationTables>,
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocateResponse {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: AllocationReport,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCategoryRequest {
    breakdown: BudgetBreakdown,
    total_budget: f64,
    category: String,
    value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateCategoryResponse {
    breakdown: BudgetBreakdown,
    total: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItineraryResponse {
    generated_at: DateTime<Utc>,
    days: Vec<DayPlan>,
}

#[derive(Debug, Clone, Deserialize)]
struct EditRequest {
    days: Vec<DayPlan>,
    edit: ItineraryEdit,
}

#[derive(Debug, Serialize)]
struct EditResponse {
    days: Vec<DayPlan>,
}

pub fn router(config: Config, tables: AllocationTables) -> Router {
    let state = ApiState {
        config,
        tables: Arc::new(tables),
    };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/budget/allocate", post(allocate))
        .route("/budget/category", post(set_category))
        .route("/itinerary/generate", post(itinerary))
        .route("/itinerary/edit", post(edit_itinerary))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let app = router(config, AllocationTables::standard());
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn allocate(
    State(state): State<ApiState>,
    Json(request): Json<TripRequest>,
) -> ApiResult<AllocateResponse> {
    let params = resolve_params(&state, request)?;
    let report = build_allocation_report(&params, &state.tables);
    info!(
        destination = %params.destination,
        total_budget = params.total_budget,
        "allocated budget"
    );
    Ok(ok(AllocateResponse {
        generated_at: Utc::now(),
        report,
    }))
}

async fn set_category(
    Json(request): Json<UpdateCategoryRequest>,
) -> ApiResult<UpdateCategoryResponse> {
    if !request.total_budget.is_finite() || request.total_budget < 0.0 {
        return Err(ApiError::bad_request(format!(
            "total budget must be a finite number >= 0, got {}",
            request.total_budget
        )));
    }
    let category = BudgetCategory::from_str(&request.category)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    let breakdown = update_category(
        &request.breakdown,
        request.total_budget,
        category,
        request.value,
    );
    Ok(ok(UpdateCategoryResponse {
        total: breakdown.total(),
        breakdown,
    }))
}

async fn itinerary(
    State(state): State<ApiState>,
    Json(mut request): Json<TripRequest>,
) -> ApiResult<ItineraryResponse> {
    // The itinerary does not depend on the budget.
    request.total_budget.get_or_insert(0.0);
    let params = resolve_params(&state, request)?;
    let days = generate_itinerary(&params);
    info!(
        destination = %params.destination,
        days = days.len(),
        "generated itinerary"
    );
    Ok(ok(ItineraryResponse {
        generated_at: Utc::now(),
        days,
    }))
}

async fn edit_itinerary(Json(request): Json<EditRequest>) -> ApiResult<EditResponse> {
    let days = apply_edit(&request.days, &request.edit).map_err(|e| {
        warn!("rejected itinerary edit: {e}");
        ApiError::bad_request(e.to_string())
    })?;
    Ok(ok(EditResponse { days }))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

fn resolve_params(
    state: &ApiState,
    mut request: TripRequest,
) -> std::result::Result<TripParameters, ApiError> {
    if request.travel_style.is_none() {
        request.travel_style = Some(state.config.defaults.travel_style.to_string());
    }
    TripParameters::try_from(request).map_err(|e| {
        warn!("rejected trip request: {e}");
        ApiError::bad_request(e.to_string())
    })
}
