//! Financial projection: investment, savings, payback and lifetime return.

use serde::{Deserialize, Serialize};

use crate::equipment::PanelSpec;
use crate::region::RegionProfile;

use super::types::FinancialAnalysis;

/// Tariff and cost assumptions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FinancialAssumptions {
    /// Grid energy price today (currency/kWh).
    pub tariff_per_kwh: f64,
    /// Yearly compounding tariff increase (0.06 = 6%).
    pub annual_tariff_increase_fraction: f64,
    /// Turnkey cost per installed Wp before the regional multiplier.
    pub installation_cost_per_wp: f64,
    /// Projection horizon (years).
    pub system_lifetime_years: u32,
    /// Yearly O&M cost as a share of the investment, deducted from savings.
    pub maintenance_annual_fraction: f64,
    /// Reduce generation each year by the panel's degradation rate.
    pub model_degradation: bool,
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            tariff_per_kwh: 0.65,
            annual_tariff_increase_fraction: 0.06,
            installation_cost_per_wp: 5.20,
            system_lifetime_years: 25,
            maintenance_annual_fraction: 0.0,
            model_degradation: false,
        }
    }
}

/// One year of the lifetime projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearProjection {
    /// 1-based year.
    pub year: u32,
    pub tariff_per_kwh: f64,
    pub generation_kwh: f64,
    /// Net savings for the year (after maintenance).
    pub savings: f64,
    /// Running total including this year.
    pub cumulative_savings: f64,
}

/// Turnkey investment for `installed_kwp` in `region`.
pub fn default_investment(
    installed_kwp: f64,
    region: &RegionProfile,
    assumptions: &FinancialAssumptions,
) -> f64 {
    installed_kwp * 1000.0 * assumptions.installation_cost_per_wp * region.cost_multiplier
}

/// Year-by-year savings under compounding tariff escalation.
pub fn yearly_projection(
    monthly_generation_kwh: f64,
    total_investment: f64,
    assumptions: &FinancialAssumptions,
    panel: &PanelSpec,
) -> Vec<YearProjection> {
    let escalation = 1.0 + assumptions.annual_tariff_increase_fraction;
    let degradation = if assumptions.model_degradation {
        1.0 - panel.annual_degradation_fraction
    } else {
        1.0
    };
    let maintenance = total_investment.max(0.0) * assumptions.maintenance_annual_fraction;

    let mut cumulative = 0.0;
    (1..=assumptions.system_lifetime_years)
        .map(|year| {
            let n = i32::try_from(year - 1).unwrap_or(i32::MAX);
            let tariff = assumptions.tariff_per_kwh * escalation.powi(n);
            let generation = monthly_generation_kwh * 12.0 * degradation.powi(n);
            let savings = generation * tariff - maintenance;
            cumulative += savings;
            YearProjection {
                year,
                tariff_per_kwh: tariff,
                generation_kwh: generation,
                savings,
                cumulative_savings: cumulative,
            }
        })
        .collect()
}

/// First fractional year at which cumulative savings reach the investment.
///
/// Interpolates linearly inside the breakeven year. Returns `None` when the
/// projection never reaches the investment or the breakeven year has no
/// positive savings to interpolate over.
pub fn payback_years(years: &[YearProjection], total_investment: f64) -> Option<f64> {
    let mut before = 0.0;
    for y in years {
        if y.savings > 0.0 && y.cumulative_savings >= total_investment {
            let into_year = ((total_investment - before) / y.savings).max(0.0);
            return Some(f64::from(y.year - 1) + into_year);
        }
        before = y.cumulative_savings;
    }
    None
}

/// Projects savings and return for a sized system.
///
/// When `total_investment` is `None` it is derived from installed power, the
/// per-Wp cost and the region's cost multiplier. Lifetime totals come from the
/// same accumulator as the payback search, so
/// `net_profit_25_years == total_savings_25_years - total_investment` holds
/// exactly.
pub fn project(
    installed_kwp: f64,
    monthly_generation_kwh: f64,
    total_investment: Option<f64>,
    region: &RegionProfile,
    assumptions: &FinancialAssumptions,
    panel: &PanelSpec,
) -> FinancialAnalysis {
    let investment =
        total_investment.unwrap_or_else(|| default_investment(installed_kwp, region, assumptions));
    let monthly_savings = monthly_generation_kwh * assumptions.tariff_per_kwh;
    let annual_savings = monthly_savings * 12.0;

    let years = yearly_projection(monthly_generation_kwh, investment, assumptions, panel);
    let total_savings = years.last().map_or(0.0, |y| y.cumulative_savings);
    let payback = payback_years(&years, investment);
    if payback.is_none() {
        log::info!(
            "no breakeven within {} years (investment {investment:.2}, savings {total_savings:.2})",
            assumptions.system_lifetime_years
        );
    }

    let roi = if investment > 0.0 {
        (total_savings - investment) / investment * 100.0
    } else {
        0.0
    };

    FinancialAnalysis {
        total_investment: investment,
        monthly_savings,
        annual_savings,
        payback_years: payback,
        roi_25_years: roi,
        total_savings_25_years: total_savings,
        net_profit_25_years: total_savings - investment,
    }
}
