//! Demand-driven PV sizing with an optional area cap.

use crate::equipment::{PanelSpec, SystemEfficiencyProfile};
use crate::region::RegionProfile;

use super::types::TechnicalSpecs;

/// Fixed month length used for every kWh/month figure.
///
/// Real months run 28–31 days; this skews individual months by up to a few
/// percent but keeps monthly and daily figures directly comparable.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Monthly generation of 1 kWp in `region` (kWh/kWp/month).
pub fn monthly_generation_per_kwp(
    region: &RegionProfile,
    efficiency: &SystemEfficiencyProfile,
) -> f64 {
    let daily = region.irradiation_kwh_m2_day * efficiency.overall();
    daily * DAYS_PER_MONTH
}

/// Sizes a system to cover `monthly_consumption_kwh` in `region`.
///
/// The panel count always rounds up. When `available_area_m2` is given and
/// the demand-driven array does not fit, the array shrinks to the panels that
/// fit and every figure (power, generation, coverage) follows the smaller
/// array. The result is never an error: the shortfall shows up as
/// `coverage_percentage < 100` and `area_limited = true`.
pub fn size_system(
    monthly_consumption_kwh: f64,
    region: &RegionProfile,
    panel: &PanelSpec,
    efficiency: &SystemEfficiencyProfile,
    available_area_m2: Option<f64>,
) -> TechnicalSpecs {
    let consumption = monthly_consumption_kwh.max(0.0);
    let per_kwp = monthly_generation_per_kwp(region, efficiency);
    let panel_kwp = panel.nominal_power_kwp();

    let required_kwp = if per_kwp > 0.0 {
        consumption / per_kwp
    } else {
        0.0
    };
    let panel_count = if panel_kwp > 0.0 {
        (required_kwp / panel_kwp).ceil() as u32
    } else {
        0
    };
    let used_area = f64::from(panel_count) * panel.area_m2;

    let mut specs = TechnicalSpecs {
        installed_power_kwp: required_kwp,
        panel_count,
        used_area_m2: used_area,
        monthly_generation_kwh: required_kwp * per_kwp,
        annual_generation_kwh: required_kwp * per_kwp * 12.0,
        coverage_percentage: if consumption > 0.0 { 100.0 } else { 0.0 },
        irradiation_used: region.irradiation_kwh_m2_day,
        system_efficiency_used: efficiency.overall(),
        required_power_kwp: required_kwp,
        monthly_consumption_kwh: consumption,
        area_limited: false,
    };

    match available_area_m2.filter(|a| *a > 0.0) {
        Some(area) if used_area > area && panel.area_m2 > 0.0 => {
            let max_panels = (area / panel.area_m2).floor() as u32;
            let capped_kwp = f64::from(max_panels) * panel_kwp;
            let generation = capped_kwp * per_kwp;
            log::info!(
                "area cap: {area:.1} m² fits {max_panels} of {panel_count} panels \
                 in region {}",
                region.region_code
            );
            specs.installed_power_kwp = capped_kwp;
            specs.panel_count = max_panels;
            specs.used_area_m2 = f64::from(max_panels) * panel.area_m2;
            specs.monthly_generation_kwh = generation;
            specs.annual_generation_kwh = generation * 12.0;
            specs.coverage_percentage = generation / consumption * 100.0;
            specs.area_limited = true;
        }
        _ => {}
    }

    log::debug!(
        "sized {consumption:.1} kWh/month in {}: {:.2} kWp, {} panels",
        region.region_code,
        specs.installed_power_kwp,
        specs.panel_count
    );
    specs
}
