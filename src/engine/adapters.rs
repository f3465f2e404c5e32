//! Project-type adapters: category inputs to a monthly energy requirement.
//!
//! Each category has its own parameter struct, built from a loose
//! [`ParameterBag`] in exactly one place ([`ProjectParameters::from_bag`]),
//! and its own mapping to the generic [`AdaptedLoad`] that sizing consumes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::params::ParameterBag;

use super::sizing::DAYS_PER_MONTH;

/// Supported project categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Residential,
    Commercial,
    EvCharging,
    CommonAreas,
}

impl ProjectType {
    /// Wire names, in declaration order.
    pub const NAMES: &[&str] = &["residential", "commercial", "ev_charging", "common_areas"];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::EvCharging => "ev_charging",
            Self::CommonAreas => "common_areas",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = EngineError;

    /// Accepts the wire names case-insensitively, with `-` or spaces for `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "residential" => Ok(Self::Residential),
            "commercial" => Ok(Self::Commercial),
            "ev_charging" => Ok(Self::EvCharging),
            "common_areas" => Ok(Self::CommonAreas),
            _ => Err(EngineError::UnsupportedProjectType(s.to_string())),
        }
    }
}

/// Adapter knobs that are assumptions rather than physics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterPolicy {
    /// Share of commercial consumption that happens in daylight and can be
    /// offset by self-consumption (0.0–1.0].
    pub commercial_daytime_fraction: f64,
    /// Storage sized as daily EV throughput times this factor.
    pub ev_battery_buffer: f64,
    /// Installed storage cost (currency/kWh).
    pub battery_cost_per_kwh: f64,
}

impl Default for AdapterPolicy {
    fn default() -> Self {
        Self {
            commercial_daytime_fraction: 0.7,
            ev_battery_buffer: 1.2,
            battery_cost_per_kwh: 2800.0,
        }
    }
}

/// Typical daily consumption of common-area fixtures (kWh/day per unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureConsumption {
    pub elevator_kwh_day: f64,
    pub pool_kwh_day: f64,
    pub security_kwh_day: f64,
    pub lighting_point_kwh_day: f64,
}

impl Default for FixtureConsumption {
    fn default() -> Self {
        Self {
            elevator_kwh_day: 15.0,
            pool_kwh_day: 12.0,
            security_kwh_day: 4.8,
            lighting_point_kwh_day: 0.36,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidentialParams {
    pub num_units: f64,
    pub consumption_per_unit_kwh_month: f64,
    /// Development-wide area; not split per unit.
    pub available_area_m2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommercialParams {
    pub monthly_consumption_kwh: f64,
    pub available_area_m2: Option<f64>,
    /// Per-request override of [`AdapterPolicy::commercial_daytime_fraction`].
    pub daytime_fraction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvChargingParams {
    pub num_parking_spots: f64,
    pub charging_points_percentage: f64,
    pub energy_per_charge_kwh: f64,
    pub charges_per_day: f64,
    pub include_storage: bool,
    pub available_area_m2: Option<f64>,
}

/// The two input shapes of the common-area flows.
#[derive(Debug, Clone, PartialEq)]
pub enum CommonAreaLoad {
    /// A measured daily figure.
    Direct { daily_consumption_kwh: f64 },
    /// Fixture counts multiplied by [`FixtureConsumption`].
    Fixtures {
        elevators: f64,
        pools: f64,
        security_systems: f64,
        lighting_points: f64,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommonAreasParams {
    pub load: CommonAreaLoad,
    pub critical_consumption_per_hour_kwh: f64,
    pub backup_hours: f64,
    pub available_area_m2: Option<f64>,
}

/// Normalized inputs for one project, keyed by category.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectParameters {
    Residential(ResidentialParams),
    Commercial(CommercialParams),
    EvCharging(EvChargingParams),
    CommonAreas(CommonAreasParams),
}

/// Generic sizing input produced by an adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct AdaptedLoad {
    /// Demand the system is sized against.
    pub monthly_consumption_kwh: f64,
    /// Demand as declared by the caller, before any daytime share.
    pub declared_consumption_kwh: f64,
    /// Daytime share applied to commercial demand.
    pub daytime_fraction: Option<f64>,
    /// `None` when the caller gave no usable area.
    pub available_area_m2: Option<f64>,
    pub charging_points: Option<u32>,
    pub battery_capacity_kwh: Option<f64>,
}

const AREA_KEYS: &[&str] = &["available_area_m2", "available_area"];

fn area(bag: &ParameterBag) -> Option<f64> {
    AREA_KEYS.iter().find_map(|k| bag.positive(k))
}

impl ProjectParameters {
    /// Builds typed parameters from a loose bag. Missing or malformed numbers
    /// read as zero; this never fails.
    pub fn from_bag(project_type: ProjectType, bag: &ParameterBag) -> Self {
        match project_type {
            ProjectType::Residential => Self::Residential(ResidentialParams {
                num_units: bag.non_negative("num_units"),
                consumption_per_unit_kwh_month: bag.non_negative_any(&[
                    "consumption_per_unit_kwh_month",
                    "consumption_per_unit",
                ]),
                available_area_m2: area(bag),
            }),
            ProjectType::Commercial => Self::Commercial(CommercialParams {
                monthly_consumption_kwh: bag
                    .non_negative_any(&["monthly_consumption_kwh", "monthly_consumption"]),
                available_area_m2: area(bag),
                daytime_fraction: bag.positive("daytime_fraction").map(|f| f.min(1.0)),
            }),
            ProjectType::EvCharging => Self::EvCharging(EvChargingParams {
                num_parking_spots: bag.non_negative("num_parking_spots"),
                charging_points_percentage: bag.non_negative("charging_points_percentage"),
                energy_per_charge_kwh: bag.non_negative("energy_per_charge_kwh"),
                charges_per_day: bag.non_negative("charges_per_day"),
                include_storage: bag.flag("include_storage"),
                available_area_m2: area(bag),
            }),
            ProjectType::CommonAreas => {
                let daily = bag.non_negative("daily_consumption_kwh");
                let load = if daily > 0.0 {
                    CommonAreaLoad::Direct {
                        daily_consumption_kwh: daily,
                    }
                } else {
                    let pools = if bag.contains("num_pools") {
                        bag.non_negative("num_pools")
                    } else if bag.flag("has_pool") {
                        1.0
                    } else {
                        0.0
                    };
                    CommonAreaLoad::Fixtures {
                        elevators: bag.non_negative("num_elevators"),
                        pools,
                        security_systems: bag.non_negative("num_security_systems"),
                        lighting_points: bag.non_negative("num_lighting_points"),
                    }
                };
                Self::CommonAreas(CommonAreasParams {
                    load,
                    critical_consumption_per_hour_kwh: bag
                        .non_negative("critical_consumption_per_hour_kwh"),
                    backup_hours: bag.non_negative("backup_hours"),
                    available_area_m2: area(bag),
                })
            }
        }
    }

    pub fn project_type(&self) -> ProjectType {
        match self {
            Self::Residential(_) => ProjectType::Residential,
            Self::Commercial(_) => ProjectType::Commercial,
            Self::EvCharging(_) => ProjectType::EvCharging,
            Self::CommonAreas(_) => ProjectType::CommonAreas,
        }
    }
}

/// Maps category parameters to the generic sizing input.
pub fn adapt(
    params: &ProjectParameters,
    policy: &AdapterPolicy,
    fixtures: &FixtureConsumption,
) -> AdaptedLoad {
    match params {
        ProjectParameters::Residential(p) => {
            let monthly = p.num_units * p.consumption_per_unit_kwh_month;
            AdaptedLoad {
                monthly_consumption_kwh: monthly,
                declared_consumption_kwh: monthly,
                daytime_fraction: None,
                available_area_m2: p.available_area_m2,
                charging_points: None,
                battery_capacity_kwh: None,
            }
        }
        ProjectParameters::Commercial(p) => {
            let fraction = p
                .daytime_fraction
                .unwrap_or(policy.commercial_daytime_fraction);
            AdaptedLoad {
                monthly_consumption_kwh: p.monthly_consumption_kwh * fraction,
                declared_consumption_kwh: p.monthly_consumption_kwh,
                daytime_fraction: Some(fraction),
                available_area_m2: p.available_area_m2,
                charging_points: None,
                battery_capacity_kwh: None,
            }
        }
        ProjectParameters::EvCharging(p) => {
            let points = (p.num_parking_spots * p.charging_points_percentage / 100.0).floor();
            let daily = points * p.energy_per_charge_kwh * p.charges_per_day;
            let battery = (p.include_storage && daily > 0.0).then(|| daily * policy.ev_battery_buffer);
            AdaptedLoad {
                monthly_consumption_kwh: daily * DAYS_PER_MONTH,
                declared_consumption_kwh: daily * DAYS_PER_MONTH,
                daytime_fraction: None,
                available_area_m2: p.available_area_m2,
                charging_points: Some(points as u32),
                battery_capacity_kwh: battery,
            }
        }
        ProjectParameters::CommonAreas(p) => {
            let daily = match p.load {
                CommonAreaLoad::Direct {
                    daily_consumption_kwh,
                } => daily_consumption_kwh,
                CommonAreaLoad::Fixtures {
                    elevators,
                    pools,
                    security_systems,
                    lighting_points,
                } => {
                    elevators * fixtures.elevator_kwh_day
                        + pools * fixtures.pool_kwh_day
                        + security_systems * fixtures.security_kwh_day
                        + lighting_points * fixtures.lighting_point_kwh_day
                }
            };
            let backup = p.critical_consumption_per_hour_kwh * p.backup_hours;
            AdaptedLoad {
                monthly_consumption_kwh: daily * DAYS_PER_MONTH,
                declared_consumption_kwh: daily * DAYS_PER_MONTH,
                daytime_fraction: None,
                available_area_m2: p.available_area_m2,
                charging_points: None,
                battery_capacity_kwh: (backup > 0.0).then_some(backup),
            }
        }
    }
}
