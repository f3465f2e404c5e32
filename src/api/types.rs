//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::engine::types::{CashFlowPoint, InvestmentScenario};
use crate::params::ParameterBag;
use crate::region::DEFAULT_REGION;

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

/// Body of `POST /simulate`.
#[derive(Debug, Deserialize)]
pub struct SimulateRequest {
    pub project_type: String,
    #[serde(default)]
    pub parameters: ParameterBag,
    #[serde(default = "default_region")]
    pub region_code: String,
}

#[derive(Debug, Serialize)]
pub struct ScenariosResponse {
    pub scenarios: Vec<InvestmentScenario>,
}

#[derive(Debug, Serialize)]
pub struct CashFlowResponse {
    /// First month with non-negative accumulated flow.
    pub breakeven_month: Option<u32>,
    pub points: Vec<CashFlowPoint>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
