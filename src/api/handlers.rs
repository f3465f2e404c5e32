//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{CashFlowResponse, ErrorResponse, ScenariosResponse, SimulateRequest};
use crate::engine::cash_flow::breakeven_month;
use crate::params::ParameterBag;
use crate::region::DEFAULT_REGION;

/// Sizes and prices a project.
///
/// `POST /simulate` → 200 + `SimulationResult` JSON
/// unknown `project_type` → 400 + `ErrorResponse`
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SimulateRequest>,
) -> impl IntoResponse {
    state
        .engine
        .size_and_project(&req.project_type, &req.parameters, &req.region_code)
        .map(Json)
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })
}

/// Prices an installed power under the four scenario tiers.
///
/// `POST /scenarios` with `installed_power_kwp` and optional `region_code`.
/// Numbers may be strings; malformed values read as zero.
pub async fn scenarios(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParameterBag>,
) -> Json<ScenariosResponse> {
    let region = body.text("region_code").unwrap_or(DEFAULT_REGION);
    let scenarios = state
        .engine
        .generate_investment_scenarios(body.non_negative("installed_power_kwp"), region);
    Json(ScenariosResponse { scenarios })
}

/// Builds the monthly cash-flow series.
///
/// `POST /cash-flow` with `total_investment`, `monthly_savings` and optional
/// `months` (default 24, capped at the system lifetime in months).
pub async fn cash_flow(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParameterBag>,
) -> Json<CashFlowResponse> {
    let months = body
        .positive("months")
        .map(|m| m.min(f64::from(u32::MAX)) as u32);
    let points = state.engine.build_cash_flow_series(
        body.non_negative("total_investment"),
        body.number("monthly_savings"),
        months,
    );
    Json(CashFlowResponse {
        breakeven_month: breakeven_month(&points),
        points,
    })
}
