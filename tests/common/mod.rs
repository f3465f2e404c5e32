//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use serde_json::json;
use solar_viability::{Engine, EngineConfig, ParameterBag};

/// Engine with the baseline configuration.
pub fn default_engine() -> Engine {
    Engine::new(EngineConfig::baseline())
}

/// Converts a JSON object literal into a parameter bag.
pub fn bag(value: serde_json::Value) -> ParameterBag {
    serde_json::from_value(value).expect("parameters should be a JSON object")
}

/// 24 units × 250 kWh/month (6000 kWh/month) with room for every panel.
pub fn residential_6000() -> ParameterBag {
    bag(json!({
        "num_units": "24",
        "consumption_per_unit_kwh_month": "250",
        "available_area_m2": "1000",
    }))
}

/// Asserts `actual` is within `tol` of `expected`.
pub fn assert_close(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{what}: expected {expected} ± {tol}, got {actual}"
    );
}
