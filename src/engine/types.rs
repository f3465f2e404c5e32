//! Engine output records.
//!
//! Field names are the wire contract: serialized as snake_case, e.g.
//! `technical_specs.panel_count` or `financial_analysis.payback_years`.
//! Values keep full precision; only the `Display` impls round.

use std::fmt;

use serde::Serialize;

use super::adapters::ProjectType;

/// Technical sizing of the PV system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalSpecs {
    /// Installed DC power (kWp).
    pub installed_power_kwp: f64,
    /// Number of panels.
    pub panel_count: u32,
    /// Roof/ground area occupied by the panels (m²).
    pub used_area_m2: f64,
    /// Expected generation per 30-day month (kWh).
    pub monthly_generation_kwh: f64,
    /// Expected generation per year (kWh).
    pub annual_generation_kwh: f64,
    /// Share of the monthly requirement met by generation (%).
    pub coverage_percentage: f64,
    /// Irradiation of the resolved region (kWh/m²/day).
    pub irradiation_used: f64,
    /// Overall system efficiency applied (0.0–1.0).
    pub system_efficiency_used: f64,
    /// Power needed to meet the full requirement (kWp).
    pub required_power_kwp: f64,
    /// Monthly energy requirement the system was sized for (kWh).
    pub monthly_consumption_kwh: f64,
    /// Whether the available area capped the panel count.
    pub area_limited: bool,
}

/// Investment, savings and return over the system lifetime.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialAnalysis {
    pub total_investment: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// Years to break even; `None` (JSON `null`) when the system never pays back.
    pub payback_years: Option<f64>,
    pub roi_25_years: f64,
    pub total_savings_25_years: f64,
    pub net_profit_25_years: f64,
}

/// Project-type specific outputs kept apart from the panel figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetails {
    pub project_type: ProjectType,
    /// Region profile actually used (after fallback).
    pub region_code: String,
    /// EV charging points; unrelated to panel count.
    pub charging_points: Option<u32>,
    /// Storage capacity included in the investment (kWh).
    pub battery_capacity_kwh: Option<f64>,
    /// Storage share of `total_investment`.
    pub battery_cost: f64,
    /// Monthly demand as submitted; differs from
    /// `technical_specs.monthly_consumption_kwh` when a daytime share applies.
    pub raw_monthly_consumption_kwh: f64,
    /// Commercial daytime share used for sizing.
    pub daytime_fraction: Option<f64>,
}

/// Complete response of the primary entry point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub technical_specs: TechnicalSpecs,
    pub financial_analysis: FinancialAnalysis,
    pub project_details: ProjectDetails,
}

/// One priced alternative for the same installed power.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentScenario {
    pub label: String,
    pub panels_cost: f64,
    pub inverters_cost: f64,
    pub installation_cost: f64,
    pub total_cost: f64,
    pub payback_years: Option<f64>,
    pub cost_breakdown_lines: Vec<String>,
}

/// One month of the short-horizon cash-flow chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowPoint {
    /// 1-based month index.
    pub month: u32,
    pub monthly_flow: f64,
    pub accumulated_flow: f64,
    pub savings: f64,
    /// Upfront cost; nonzero only in month 1.
    pub investment: f64,
}

fn fmt_payback(payback: Option<f64>) -> String {
    match payback {
        Some(years) => format!("{years:.1} years"),
        None => "does not pay back within lifetime".to_string(),
    }
}

impl fmt::Display for TechnicalSpecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Technical Specs ---")?;
        writeln!(f, "Monthly requirement:   {:.0} kWh", self.monthly_consumption_kwh)?;
        writeln!(f, "Installed power:       {:.2} kWp", self.installed_power_kwp)?;
        writeln!(f, "Panels:                {}", self.panel_count)?;
        writeln!(f, "Used area:             {:.1} m²", self.used_area_m2)?;
        writeln!(
            f,
            "Generation:            {:.0} kWh/month ({:.0} kWh/year)",
            self.monthly_generation_kwh, self.annual_generation_kwh
        )?;
        writeln!(f, "Coverage:              {:.1}%", self.coverage_percentage)?;
        if self.area_limited {
            writeln!(
                f,
                "Area limited:          yes (full demand needs {:.2} kWp)",
                self.required_power_kwp
            )?;
        }
        write!(
            f,
            "Irradiation / eff.:    {:.2} kWh/m²/day @ {:.1}%",
            self.irradiation_used,
            self.system_efficiency_used * 100.0
        )
    }
}

impl fmt::Display for FinancialAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Financial Analysis ---")?;
        writeln!(f, "Total investment:      {:.2}", self.total_investment)?;
        writeln!(
            f,
            "Savings:               {:.2}/month ({:.2}/year)",
            self.monthly_savings, self.annual_savings
        )?;
        writeln!(f, "Payback:               {}", fmt_payback(self.payback_years))?;
        writeln!(f, "ROI (25 years):        {:.1}%", self.roi_25_years)?;
        writeln!(f, "Savings (25 years):    {:.2}", self.total_savings_25_years)?;
        write!(f, "Net profit (25 years): {:.2}", self.net_profit_25_years)
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.project_details;
        writeln!(f, "Project: {} (region {})", d.project_type, d.region_code)?;
        if let Some(fraction) = d.daytime_fraction {
            writeln!(
                f,
                "Declared consumption:  {:.0} kWh/month ({:.0}% daytime offset)",
                d.raw_monthly_consumption_kwh,
                fraction * 100.0
            )?;
        }
        if let Some(points) = d.charging_points {
            writeln!(f, "Charging points:       {points}")?;
        }
        if let Some(kwh) = d.battery_capacity_kwh {
            writeln!(
                f,
                "Battery storage:       {kwh:.1} kWh (cost {:.2})",
                d.battery_cost
            )?;
        }
        writeln!(f, "{}", self.technical_specs)?;
        write!(f, "{}", self.financial_analysis)
    }
}

impl fmt::Display for InvestmentScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.label)?;
        for line in &self.cost_breakdown_lines {
            writeln!(f, "  {line}")?;
        }
        write!(f, "  Payback: {}", fmt_payback(self.payback_years))
    }
}
