//! Sizing and financial-projection engine.
//!
//! [`Engine`] holds an immutable configuration and exposes the three entry
//! points; every call is a pure function of its arguments and that
//! configuration, so one engine can serve concurrent callers.

/// Project-type adapters.
pub mod adapters;
/// Short-horizon monthly cash-flow series.
pub mod cash_flow;
pub mod finance;
/// Investment scenario comparison.
pub mod scenarios;
pub mod sizing;
pub mod types;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::params::ParameterBag;
use crate::region::RegionTable;

use adapters::{ProjectParameters, ProjectType};
use types::{CashFlowPoint, InvestmentScenario, ProjectDetails, SimulationResult};

/// Stateless calculation engine bound to one configuration.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    regions: RegionTable,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::baseline())
    }
}

impl Engine {
    /// Creates an engine. The configuration is expected to have passed
    /// [`EngineConfig::validate`].
    pub fn new(config: EngineConfig) -> Self {
        let regions = config.region_table();
        Self { config, regions }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn regions(&self) -> &RegionTable {
        &self.regions
    }

    /// Longest cash-flow series this engine builds: the configured system
    /// lifetime in months, never below the default chart length nor above
    /// [`cash_flow::MAX_MONTHS`].
    pub fn max_cash_flow_months(&self) -> u32 {
        self.config
            .financial
            .system_lifetime_years
            .saturating_mul(12)
            .clamp(cash_flow::DEFAULT_MONTHS, cash_flow::MAX_MONTHS)
    }

    /// Sizes and prices a project from raw form parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedProjectType`] when `project_type`
    /// names no known category. Nothing else fails: bad numbers read as zero
    /// and unknown regions use the default profile.
    pub fn size_and_project(
        &self,
        project_type: &str,
        parameters: &ParameterBag,
        region_code: &str,
    ) -> Result<SimulationResult, EngineError> {
        let project_type: ProjectType = project_type.parse()?;
        let params = ProjectParameters::from_bag(project_type, parameters);
        Ok(self.run(&params, region_code))
    }

    /// Sizes and prices already-typed project parameters.
    pub fn run(&self, params: &ProjectParameters, region_code: &str) -> SimulationResult {
        let cfg = &self.config;
        let region = self.regions.lookup(region_code);
        let load = adapters::adapt(params, &cfg.policy, &cfg.fixtures);

        let specs = sizing::size_system(
            load.monthly_consumption_kwh,
            region,
            &cfg.panel,
            &cfg.efficiency,
            load.available_area_m2,
        );

        let battery_cost = load
            .battery_capacity_kwh
            .map_or(0.0, |kwh| kwh * cfg.policy.battery_cost_per_kwh);
        let investment = finance::default_investment(specs.installed_power_kwp, region, &cfg.financial)
            + battery_cost;
        let analysis = finance::project(
            specs.installed_power_kwp,
            specs.monthly_generation_kwh,
            Some(investment),
            region,
            &cfg.financial,
            &cfg.panel,
        );

        log::debug!(
            "{} project in {}: investment {:.2}, payback {:?}",
            params.project_type(),
            region.region_code,
            analysis.total_investment,
            analysis.payback_years
        );

        SimulationResult {
            technical_specs: specs,
            financial_analysis: analysis,
            project_details: ProjectDetails {
                project_type: params.project_type(),
                region_code: region.region_code.clone(),
                charging_points: load.charging_points,
                battery_capacity_kwh: load.battery_capacity_kwh,
                battery_cost,
                raw_monthly_consumption_kwh: load.declared_consumption_kwh,
                daytime_fraction: load.daytime_fraction,
            },
        }
    }

    /// Prices `installed_power_kwp` under the four tiers in `region_code`.
    pub fn generate_investment_scenarios(
        &self,
        installed_power_kwp: f64,
        region_code: &str,
    ) -> Vec<InvestmentScenario> {
        let cfg = &self.config;
        scenarios::generate_scenarios(
            installed_power_kwp,
            self.regions.lookup(region_code),
            &cfg.scenarios,
            &cfg.financial,
            &cfg.panel,
            &cfg.efficiency,
        )
    }

    /// Monthly cash-flow series; `months` defaults to 24 and is clamped to
    /// [`max_cash_flow_months`](Self::max_cash_flow_months).
    pub fn build_cash_flow_series(
        &self,
        total_investment: f64,
        monthly_savings: f64,
        months: Option<u32>,
    ) -> Vec<CashFlowPoint> {
        let max = self.max_cash_flow_months();
        let requested = months.unwrap_or(cash_flow::DEFAULT_MONTHS);
        if requested > max {
            log::warn!("cash flow of {requested} months requested, capped at {max}");
        }
        cash_flow::build_monthly_cash_flow(total_investment, monthly_savings, requested.min(max))
    }
}
