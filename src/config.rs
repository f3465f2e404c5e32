//! TOML-based engine configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::engine::adapters::{AdapterPolicy, FixtureConsumption};
use crate::engine::finance::FinancialAssumptions;
use crate::engine::scenarios::{ScenarioPricing, TierPricing};
use crate::equipment::{PanelSpec, SystemEfficiencyProfile};
use crate::error::ConfigError;
use crate::region::{RegionProfile, RegionTable};

/// Top-level engine configuration parsed from TOML.
///
/// All fields have defaults matching the baseline assumptions. Load from
/// TOML with [`EngineConfig::from_toml_file`] or use
/// [`EngineConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Panel model used for all sizing.
    pub panel: PanelSpec,
    /// System derating factors.
    pub efficiency: SystemEfficiencyProfile,
    /// Tariff and cost assumptions.
    pub financial: FinancialAssumptions,
    /// Project-type adapter knobs.
    pub policy: AdapterPolicy,
    /// Per-fixture consumption for common-area projects.
    pub fixtures: FixtureConsumption,
    /// Per-tier pricing for the investment scenario comparison.
    pub scenarios: ScenarioPricing,
    /// Region entries replacing or extending the built-in table.
    pub regions: Vec<RegionProfile>,
}

impl EngineConfig {
    /// Returns the baseline configuration.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Built-in region table with this configuration's overrides applied.
    pub fn region_table(&self) -> RegionTable {
        RegionTable::builtin().with_overrides(&self.regions)
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let p = &self.panel;
        if p.nominal_power_wp <= 0.0 {
            errors.push(ConfigError::new("panel.nominal_power_wp", "must be > 0"));
        }
        if p.area_m2 <= 0.0 {
            errors.push(ConfigError::new("panel.area_m2", "must be > 0"));
        }
        if !(0.0..1.0).contains(&p.annual_degradation_fraction) {
            errors.push(ConfigError::new(
                "panel.annual_degradation_fraction",
                "must be in [0.0, 1.0)",
            ));
        }

        let overall = self.efficiency.overall();
        if !(overall > 0.0 && overall < 1.0) {
            errors.push(ConfigError::new(
                "efficiency",
                format!("overall efficiency must be in (0.0, 1.0), got {overall:.4}"),
            ));
        }

        let f = &self.financial;
        if f.tariff_per_kwh < 0.0 {
            errors.push(ConfigError::new("financial.tariff_per_kwh", "must be >= 0"));
        }
        if f.annual_tariff_increase_fraction <= -1.0 {
            errors.push(ConfigError::new(
                "financial.annual_tariff_increase_fraction",
                "must be > -1.0",
            ));
        }
        if f.installation_cost_per_wp < 0.0 {
            errors.push(ConfigError::new(
                "financial.installation_cost_per_wp",
                "must be >= 0",
            ));
        }
        if !(1..=100).contains(&f.system_lifetime_years) {
            errors.push(ConfigError::new(
                "financial.system_lifetime_years",
                "must be in [1, 100]",
            ));
        }
        if !(0.0..1.0).contains(&f.maintenance_annual_fraction) {
            errors.push(ConfigError::new(
                "financial.maintenance_annual_fraction",
                "must be in [0.0, 1.0)",
            ));
        }

        let pol = &self.policy;
        if !(pol.commercial_daytime_fraction > 0.0 && pol.commercial_daytime_fraction <= 1.0) {
            errors.push(ConfigError::new(
                "policy.commercial_daytime_fraction",
                "must be in (0.0, 1.0]",
            ));
        }
        if pol.ev_battery_buffer < 1.0 {
            errors.push(ConfigError::new("policy.ev_battery_buffer", "must be >= 1.0"));
        }
        if pol.battery_cost_per_kwh < 0.0 {
            errors.push(ConfigError::new("policy.battery_cost_per_kwh", "must be >= 0"));
        }

        let fx = &self.fixtures;
        for (name, value) in [
            ("elevator_kwh_day", fx.elevator_kwh_day),
            ("pool_kwh_day", fx.pool_kwh_day),
            ("security_kwh_day", fx.security_kwh_day),
            ("lighting_point_kwh_day", fx.lighting_point_kwh_day),
        ] {
            if value < 0.0 {
                errors.push(ConfigError::new(format!("fixtures.{name}"), "must be >= 0"));
            }
        }

        for (name, tier) in self.scenarios.tiers() {
            validate_tier(name, tier, &mut errors);
        }

        for (i, r) in self.regions.iter().enumerate() {
            if r.region_code.trim().is_empty() {
                errors.push(ConfigError::new(
                    format!("regions[{i}].region_code"),
                    "must not be empty",
                ));
            }
            if r.irradiation_kwh_m2_day <= 0.0 {
                errors.push(ConfigError::new(
                    format!("regions[{i}].irradiation_kwh_m2_day"),
                    "must be > 0",
                ));
            }
            if r.cost_multiplier <= 0.0 || r.labor_multiplier <= 0.0 {
                errors.push(ConfigError::new(
                    format!("regions[{i}]"),
                    "multipliers must be > 0",
                ));
            }
        }

        errors
    }
}

fn validate_tier(name: &str, tier: &TierPricing, errors: &mut Vec<ConfigError>) {
    if tier.panel_cost_per_wp < 0.0 || tier.inverter_cost_per_wp < 0.0 {
        errors.push(ConfigError::new(
            format!("scenarios.{name}"),
            "per-Wp costs must be >= 0",
        ));
    }
    if tier.installation_percentage < 0.0 {
        errors.push(ConfigError::new(
            format!("scenarios.{name}.installation_percentage"),
            "must be >= 0",
        ));
    }
}
