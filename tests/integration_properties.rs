//! Seeded randomized checks of the sizing and projection invariants.

mod common;

use common::{assert_close, bag, default_engine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use solar_viability::engine::finance::{self, FinancialAssumptions};
use solar_viability::engine::types::SimulationResult;
use solar_viability::equipment::PanelSpec;
use solar_viability::{Engine, EngineConfig};

const CASES: usize = 200;

const REGIONS: &[&str] = &["AC", "BA", "GO", "MG", "PR", "RJ", "RS", "SP", "default"];

fn commercial(engine: &Engine, kwh: f64, area: f64, region: &str) -> SimulationResult {
    engine
        .size_and_project(
            "commercial",
            &bag(json!({"monthly_consumption_kwh": kwh, "available_area_m2": area})),
            region,
        )
        .expect("commercial is supported")
}

#[test]
fn panel_count_covers_required_power() {
    let engine = default_engine();
    let panel_kwp = engine.config().panel.nominal_power_kwp();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..CASES {
        let kwh = rng.random_range(1.0..50_000.0);
        let region = REGIONS[rng.random_range(0..REGIONS.len())];
        let specs = commercial(&engine, kwh, 0.0, region).technical_specs;

        let n = f64::from(specs.panel_count);
        assert!(n * panel_kwp >= specs.installed_power_kwp - 1e-9, "{kwh} in {region}");
        assert!((n - 1.0) * panel_kwp < specs.installed_power_kwp, "{kwh} in {region}");
        assert!(!specs.area_limited);
        assert_close(specs.coverage_percentage, 100.0, 1e-9, "uncapped coverage");
    }
}

#[test]
fn area_cap_never_exceeds_roof() {
    let engine = default_engine();
    let panel = engine.config().panel.clone();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..CASES {
        let kwh = rng.random_range(100.0..50_000.0);
        let area = rng.random_range(1.0..2_000.0);
        let specs = commercial(&engine, kwh, area, "GO").technical_specs;

        if specs.area_limited {
            assert!(specs.used_area_m2 <= area + 1e-9, "used {} > {area}", specs.used_area_m2);
            assert_eq!(specs.panel_count, (area / panel.area_m2).floor() as u32);
            assert!(specs.coverage_percentage < 100.0);
            assert!(specs.installed_power_kwp <= specs.required_power_kwp);
        } else {
            assert!(specs.used_area_m2 <= area + 1e-9);
        }
    }
}

#[test]
fn bigger_demand_never_shrinks_the_system() {
    let engine = default_engine();
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..CASES {
        let low = rng.random_range(0.0..20_000.0);
        let high = low + rng.random_range(0.0..20_000.0);
        let region = REGIONS[rng.random_range(0..REGIONS.len())];

        let a = commercial(&engine, low, 0.0, region);
        let b = commercial(&engine, high, 0.0, region);
        assert!(b.technical_specs.installed_power_kwp >= a.technical_specs.installed_power_kwp);
        assert!(b.technical_specs.panel_count >= a.technical_specs.panel_count);
        assert!(b.financial_analysis.total_investment >= a.financial_analysis.total_investment);
        assert!(b.financial_analysis.monthly_savings >= a.financial_analysis.monthly_savings);
    }
}

#[test]
fn net_profit_is_savings_minus_investment() {
    let engine = default_engine();
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..CASES {
        let kwh = rng.random_range(0.0..30_000.0);
        let fa = commercial(&engine, kwh, 0.0, "MG").financial_analysis;
        assert_close(
            fa.net_profit_25_years,
            fa.total_savings_25_years - fa.total_investment,
            1e-6,
            "net profit",
        );
        if let Some(p) = fa.payback_years {
            assert!((0.0..=25.0).contains(&p), "payback {p}");
        }
    }
}

#[test]
fn unaffordable_investment_has_no_payback() {
    let assumptions = FinancialAssumptions::default();
    let panel = PanelSpec::default();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..CASES {
        let monthly_gen = rng.random_range(10.0..10_000.0);
        let years = finance::yearly_projection(monthly_gen, 0.0, &assumptions, &panel);
        let lifetime = years.last().map_or(0.0, |y| y.cumulative_savings);
        let investment = lifetime * rng.random_range(1.01..10.0);

        assert_eq!(finance::payback_years(&years, investment), None);
        assert!(finance::payback_years(&years, lifetime * 0.5).is_some());
    }
}

#[test]
fn unknown_regions_fall_back_to_default() {
    let engine = default_engine();
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..50 {
        let code: String = (0..3)
            .map(|_| char::from(rng.random_range(b'0'..=b'9')))
            .collect();
        let kwh = rng.random_range(100.0..10_000.0);
        let unknown = commercial(&engine, kwh, 0.0, &code);
        let fallback = commercial(&engine, kwh, 0.0, "default");
        assert_eq!(unknown, fallback, "region {code}");
    }
}

#[test]
fn scenarios_are_priced_independently() {
    let engine = default_engine();
    let mut rng = StdRng::seed_from_u64(31);

    for _ in 0..CASES {
        let kwp = rng.random_range(0.5..200.0);
        let region = REGIONS[rng.random_range(0..REGIONS.len())];
        let scenarios = engine.generate_investment_scenarios(kwp, region);
        assert_eq!(scenarios.len(), 4);

        for s in &scenarios {
            assert_close(
                s.total_cost,
                s.panels_cost + s.inverters_cost + s.installation_cost,
                1e-6,
                "scenario total",
            );
        }
        // Same generation for every tier, so cheaper means faster payback.
        let mut by_cost: Vec<_> = scenarios.iter().collect();
        by_cost.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
        for pair in by_cost.windows(2) {
            let (cheap, dear) = (pair[0].payback_years, pair[1].payback_years);
            if let (Some(c), Some(d)) = (cheap, dear) {
                assert!(c <= d + 1e-9, "{} ({c}) vs {} ({d})", pair[0].label, pair[1].label);
            }
        }
    }
}

#[test]
fn cash_flow_breaks_even_at_ceiling_of_ratio() {
    let engine = Engine::new(EngineConfig::baseline());
    let mut rng = StdRng::seed_from_u64(77);

    for _ in 0..CASES {
        let savings = rng.random_range(10.0..5_000.0);
        let months = rng.random_range(1..120u32);
        let investment = savings * rng.random_range(0.0..150.0);
        let points = engine.build_cash_flow_series(investment, savings, Some(months));

        assert_eq!(points.len(), months as usize);
        let ratio = investment / savings;
        if (ratio - ratio.round()).abs() < 1e-6 {
            continue;
        }
        let expected = ratio.ceil().max(1.0) as u32;
        let found = solar_viability::engine::cash_flow::breakeven_month(&points);
        if expected <= months {
            assert_eq!(found, Some(expected));
        } else {
            assert_eq!(found, None);
        }
    }
}
