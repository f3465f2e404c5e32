//! End-to-end sizing and projection for the reference residential project.

mod common;

use common::{assert_close, bag, default_engine, residential_6000};
use serde_json::json;
use solar_viability::engine::adapters::ProjectType;
use solar_viability::{EngineConfig, EngineError};

#[test]
fn go_residential_sizes_81_panels() {
    let engine = default_engine();
    let result = engine
        .size_and_project("residential", &residential_6000(), "GO")
        .expect("residential is supported");

    let specs = &result.technical_specs;
    assert_eq!(specs.panel_count, 81);
    assert_close(specs.installed_power_kwp, 44.225, 0.01, "installed kWp");
    assert_close(specs.monthly_generation_kwh, 6000.0, 1e-6, "monthly generation");
    assert_close(specs.annual_generation_kwh, 72_000.0, 1e-6, "annual generation");
    assert_close(specs.coverage_percentage, 100.0, 1e-9, "coverage");
    assert_close(specs.irradiation_used, 5.8, 1e-12, "irradiation");
    assert_close(specs.system_efficiency_used, 0.7797, 1e-4, "efficiency");
    assert!(!specs.area_limited);
}

#[test]
fn go_residential_financials() {
    let engine = default_engine();
    let result = engine
        .size_and_project("residential", &residential_6000(), "GO")
        .expect("residential is supported");

    let fa = &result.financial_analysis;
    assert_close(fa.total_investment, 229_972.0, 5.0, "investment");
    assert_close(fa.monthly_savings, 3900.0, 1e-6, "monthly savings");
    assert_close(fa.annual_savings, 46_800.0, 1e-6, "annual savings");

    let payback = fa.payback_years.expect("project pays back");
    assert!((4.0..5.0).contains(&payback), "payback {payback}");
    assert_close(payback, 4.43, 0.01, "payback");

    assert_close(
        fa.net_profit_25_years,
        fa.total_savings_25_years - fa.total_investment,
        1e-6,
        "net profit identity",
    );
    assert_close(
        fa.roi_25_years,
        fa.net_profit_25_years / fa.total_investment * 100.0,
        1e-9,
        "roi identity",
    );
}

#[test]
fn tight_roof_caps_the_system() {
    let engine = default_engine();
    let params = bag(json!({
        "num_units": 24,
        "consumption_per_unit_kwh_month": 250,
        "available_area_m2": 100,
    }));
    let result = engine
        .size_and_project("residential", &params, "GO")
        .expect("residential is supported");

    let specs = &result.technical_specs;
    assert!(specs.area_limited);
    assert_eq!(specs.panel_count, 36);
    assert_close(specs.installed_power_kwp, 19.8, 1e-9, "capped kWp");
    assert!(specs.used_area_m2 <= 100.0);
    assert!(specs.coverage_percentage < 100.0);
    assert_close(specs.required_power_kwp, 44.225, 0.01, "required kWp");
}

#[test]
fn unknown_project_type_is_the_only_error() {
    let engine = default_engine();
    let err = engine
        .size_and_project("spaceship", &residential_6000(), "GO")
        .expect_err("unknown type must fail");
    assert!(matches!(err, EngineError::UnsupportedProjectType(ref t) if t == "spaceship"));

    let garbage = bag(json!({"num_units": "lots", "consumption_per_unit_kwh_month": null}));
    let result = engine
        .size_and_project("residential", &garbage, "nowhere")
        .expect("bad numbers never fail");
    assert_eq!(result.technical_specs.panel_count, 0);
    assert_eq!(result.financial_analysis.total_investment, 0.0);
    assert_eq!(result.financial_analysis.payback_years, None);
}

#[test]
fn every_project_type_produces_a_result() {
    let engine = default_engine();
    let cases = [
        (
            "commercial",
            json!({"monthly_consumption_kwh": 10000, "available_area_m2": 0}),
        ),
        (
            "ev_charging",
            json!({"num_parking_spots": 40, "charging_points_percentage": 25,
                   "energy_per_charge_kwh": 30, "charges_per_day": 2,
                   "include_storage": true}),
        ),
        (
            "common_areas",
            json!({"num_elevators": 2, "has_pool": "yes",
                   "num_lighting_points": 50, "backup_hours": 4,
                   "critical_consumption_per_hour_kwh": 3}),
        ),
    ];

    for (name, params) in cases {
        let result = engine
            .size_and_project(name, &bag(params), "SP")
            .unwrap_or_else(|e| panic!("{name} failed: {e}"));
        assert_eq!(result.project_details.project_type.as_str(), name);
        assert!(result.technical_specs.installed_power_kwp > 0.0, "{name}");
        assert!(result.financial_analysis.payback_years.is_some(), "{name}");
    }
}

#[test]
fn ev_storage_adds_to_investment() {
    let engine = default_engine();
    let base = json!({"num_parking_spots": 40, "charging_points_percentage": 25,
                      "energy_per_charge_kwh": 30, "charges_per_day": 2});
    let mut with_storage = base.clone();
    with_storage["include_storage"] = json!(true);

    let plain = engine
        .size_and_project("ev_charging", &bag(base), "GO")
        .expect("supported");
    let stored = engine
        .size_and_project("ev_charging", &bag(with_storage), "GO")
        .expect("supported");

    assert_eq!(plain.project_details.charging_points, Some(10));
    // 10 points × 30 kWh × 2 charges × 1.2 buffer
    let kwh = stored
        .project_details
        .battery_capacity_kwh
        .expect("storage requested");
    assert_close(kwh, 720.0, 1e-9, "battery kWh");
    assert_close(
        stored.financial_analysis.total_investment - plain.financial_analysis.total_investment,
        720.0 * 2800.0,
        1e-6,
        "battery cost",
    );
}

#[test]
fn config_file_overrides_reach_the_result() {
    let cfg = EngineConfig::from_toml_str(
        "[financial]\ntariff_per_kwh = 0.0\n\n[[regions]]\nregion_code = \"GO\"\nirradiation_kwh_m2_day = 6.0\ncost_multiplier = 1.0\nlabor_multiplier = 1.0\n",
    )
    .expect("valid config");
    let engine = solar_viability::Engine::new(cfg);
    let result = engine
        .size_and_project("residential", &residential_6000(), "GO")
        .expect("supported");

    assert_close(result.technical_specs.irradiation_used, 6.0, 1e-12, "override");
    assert_eq!(result.financial_analysis.monthly_savings, 0.0);
    assert_eq!(result.financial_analysis.payback_years, None);
    assert!(result.financial_analysis.net_profit_25_years < 0.0);
}

#[test]
fn result_serializes_with_snake_case_keys() {
    let engine = default_engine();
    let result = engine
        .size_and_project("Residential", &residential_6000(), "go")
        .expect("case-insensitive type");
    assert_eq!(result.project_details.project_type, ProjectType::Residential);
    assert_eq!(result.project_details.region_code, "GO");

    let json = serde_json::to_value(&result).expect("serializable");
    assert_eq!(json["technical_specs"]["panel_count"], 81);
    assert_eq!(json["project_details"]["project_type"], "residential");
    assert!(json["financial_analysis"]["roi_25_years"].is_number());
}

#[test]
fn commercial_report_keeps_declared_consumption() {
    let engine = default_engine();
    let result = engine
        .size_and_project(
            "commercial",
            &bag(json!({"monthly_consumption_kwh": 10000})),
            "GO",
        )
        .expect("commercial is supported");

    let details = &result.project_details;
    assert_eq!(details.raw_monthly_consumption_kwh, 10_000.0);
    assert_eq!(details.daytime_fraction, Some(0.7));
    assert_close(
        result.technical_specs.monthly_consumption_kwh,
        7000.0,
        1e-9,
        "sized consumption",
    );

    let report = result.to_string();
    assert!(
        report.contains("Declared consumption:  10000 kWh/month (70% daytime offset)"),
        "{report}"
    );

    let residential = engine
        .size_and_project("residential", &residential_6000(), "GO")
        .expect("residential is supported");
    assert_eq!(residential.project_details.daytime_fraction, None);
    assert_eq!(residential.project_details.raw_monthly_consumption_kwh, 6000.0);
    assert!(!residential.to_string().contains("Declared consumption"));
}
