//! Month-by-month cash flow for the payback chart.
//!
//! The series uses today's tariff for every month. The lifetime projection in
//! [`super::finance`] escalates the tariff yearly; over a two-year window the
//! difference is small, so the chart and the payback figure can disagree
//! slightly by construction.

use super::types::CashFlowPoint;

/// Default chart length in months.
pub const DEFAULT_MONTHS: u32 = 24;

/// Hard ceiling on series length (100 years), whatever the caller asks for.
pub const MAX_MONTHS: u32 = 1200;

/// Builds `months` points with the whole investment paid in month 1.
///
/// `months` above [`MAX_MONTHS`] is clamped.
pub fn build_monthly_cash_flow(
    total_investment: f64,
    monthly_savings: f64,
    months: u32,
) -> Vec<CashFlowPoint> {
    let months = months.min(MAX_MONTHS);
    let mut accumulated = 0.0;
    (1..=months)
        .map(|month| {
            let investment = if month == 1 { total_investment } else { 0.0 };
            let monthly_flow = monthly_savings - investment;
            accumulated += monthly_flow;
            CashFlowPoint {
                month,
                monthly_flow,
                accumulated_flow: accumulated,
                savings: monthly_savings,
                investment,
            }
        })
        .collect()
}

/// First month whose accumulated flow is non-negative.
pub fn breakeven_month(points: &[CashFlowPoint]) -> Option<u32> {
    points
        .iter()
        .find(|p| p.accumulated_flow >= 0.0)
        .map(|p| p.month)
}
