//! Four priced alternatives for the same installed power.

use serde::{Deserialize, Serialize};

use crate::equipment::{PanelSpec, SystemEfficiencyProfile};
use crate::region::RegionProfile;

use super::finance::{self, FinancialAssumptions};
use super::sizing::monthly_generation_per_kwp;
use super::types::InvestmentScenario;

/// Scenario labels, in the order they are returned.
pub const SCENARIO_LABELS: [&str; 4] = [
    "Basic (equipment only)",
    "Complete (with installation)",
    "Premium (top equipment)",
    "Economic (reduced cost)",
];

/// Equipment prices and installation share for one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierPricing {
    pub panel_cost_per_wp: f64,
    pub inverter_cost_per_wp: f64,
    /// Installation as a share of equipment cost (0.25 = 25%).
    pub installation_percentage: f64,
}

impl TierPricing {
    pub const fn new(panel: f64, inverter: f64, installation: f64) -> Self {
        Self {
            panel_cost_per_wp: panel,
            inverter_cost_per_wp: inverter,
            installation_percentage: installation,
        }
    }
}

/// Pricing for the four tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioPricing {
    pub basic: TierPricing,
    pub complete: TierPricing,
    pub premium: TierPricing,
    pub economic: TierPricing,
}

impl Default for ScenarioPricing {
    fn default() -> Self {
        Self {
            basic: TierPricing::new(2.50, 0.80, 0.0),
            complete: TierPricing::new(2.50, 0.80, 0.25),
            premium: TierPricing::new(3.20, 1.10, 0.30),
            economic: TierPricing::new(2.10, 0.60, 0.15),
        }
    }
}

impl ScenarioPricing {
    /// Tiers with their config section names, in label order.
    pub fn tiers(&self) -> [(&'static str, &TierPricing); 4] {
        [
            ("basic", &self.basic),
            ("complete", &self.complete),
            ("premium", &self.premium),
            ("economic", &self.economic),
        ]
    }
}

/// Cost lines for one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub panels_cost: f64,
    pub inverters_cost: f64,
    pub installation_cost: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.panels_cost + self.inverters_cost + self.installation_cost
    }
}

/// Prices `installed_kwp` with `tier`; installation labor scales with the
/// region's labor multiplier.
pub fn cost_breakdown(installed_kwp: f64, tier: &TierPricing, labor_multiplier: f64) -> CostBreakdown {
    let watts = installed_kwp * 1000.0;
    let panels_cost = watts * tier.panel_cost_per_wp;
    let inverters_cost = watts * tier.inverter_cost_per_wp;
    let installation_cost =
        (panels_cost + inverters_cost) * tier.installation_percentage * labor_multiplier;
    CostBreakdown {
        panels_cost,
        inverters_cost,
        installation_cost,
    }
}

/// Builds the four scenarios, each with its own payback projection.
pub fn generate_scenarios(
    installed_kwp: f64,
    region: &RegionProfile,
    pricing: &ScenarioPricing,
    assumptions: &FinancialAssumptions,
    panel: &PanelSpec,
    efficiency: &SystemEfficiencyProfile,
) -> Vec<InvestmentScenario> {
    let kwp = installed_kwp.max(0.0);
    let monthly_generation = kwp * monthly_generation_per_kwp(region, efficiency);

    SCENARIO_LABELS
        .iter()
        .zip(pricing.tiers())
        .map(|(label, (_, tier))| {
            let costs = cost_breakdown(kwp, tier, region.labor_multiplier);
            let total = costs.total();
            let analysis = finance::project(
                kwp,
                monthly_generation,
                Some(total),
                region,
                assumptions,
                panel,
            );
            InvestmentScenario {
                label: (*label).to_string(),
                panels_cost: costs.panels_cost,
                inverters_cost: costs.inverters_cost,
                installation_cost: costs.installation_cost,
                total_cost: total,
                payback_years: analysis.payback_years,
                cost_breakdown_lines: breakdown_lines(&costs, tier),
            }
        })
        .collect()
}

fn breakdown_lines(costs: &CostBreakdown, tier: &TierPricing) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Panels ({:.2}/Wp): {:.2}",
            tier.panel_cost_per_wp, costs.panels_cost
        ),
        format!(
            "Inverters ({:.2}/Wp): {:.2}",
            tier.inverter_cost_per_wp, costs.inverters_cost
        ),
    ];
    if tier.installation_percentage > 0.0 {
        lines.push(format!(
            "Installation ({:.0}%): {:.2}",
            tier.installation_percentage * 100.0,
            costs.installation_cost
        ));
    } else {
        lines.push("Installation: not included".to_string());
    }
    lines.push(format!("Total: {:.2}", costs.total()));
    lines
}
