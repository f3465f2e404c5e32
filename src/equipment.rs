//! Panel model and system derating factors.

use serde::{Deserialize, Serialize};

/// Physical and electrical data for the single panel model used in sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelSpec {
    /// Nameplate power under STC (Wp).
    pub nominal_power_wp: f64,
    /// Module footprint (m²).
    pub area_m2: f64,
    /// Module conversion efficiency (0.0–1.0). Informational.
    pub efficiency_fraction: f64,
    /// Yearly output loss (0.0–1.0).
    pub annual_degradation_fraction: f64,
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self {
            nominal_power_wp: 550.0,
            area_m2: 2.74,
            efficiency_fraction: 0.213,
            annual_degradation_fraction: 0.005,
        }
    }
}

impl PanelSpec {
    /// Nameplate power in kWp.
    pub fn nominal_power_kwp(&self) -> f64 {
        self.nominal_power_wp / 1000.0
    }
}

/// Derating fractions that combine multiplicatively into one system efficiency.
///
/// Each field is the fraction of energy *kept* after that loss (0.97 means a
/// 3% loss).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemEfficiencyProfile {
    pub inverter: f64,
    pub temperature: f64,
    pub soiling: f64,
    pub wiring: f64,
    pub mismatch: f64,
}

impl Default for SystemEfficiencyProfile {
    fn default() -> Self {
        Self {
            inverter: 0.96,
            temperature: 0.89,
            soiling: 0.97,
            wiring: 0.98,
            mismatch: 0.96,
        }
    }
}

impl SystemEfficiencyProfile {
    /// Product of all derating fractions.
    pub fn overall(&self) -> f64 {
        self.inverter * self.temperature * self.soiling * self.wiring * self.mismatch
    }
}
