//! Regional reference tables: solar irradiation and cost multipliers per region.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Region code of the fallback profile.
pub const DEFAULT_REGION: &str = "default";

/// Irradiation and market factors for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionProfile {
    /// Short region code (two-letter state code, or `"default"`).
    pub region_code: String,
    /// Mean global horizontal irradiation (kWh/m²/day).
    pub irradiation_kwh_m2_day: f64,
    /// Multiplier applied to equipment and turnkey installation cost.
    pub cost_multiplier: f64,
    /// Multiplier applied to installation labor.
    pub labor_multiplier: f64,
}

impl RegionProfile {
    pub fn new(code: &str, irradiation: f64, cost: f64, labor: f64) -> Self {
        Self {
            region_code: code.to_string(),
            irradiation_kwh_m2_day: irradiation,
            cost_multiplier: cost,
            labor_multiplier: labor,
        }
    }

    /// Returns the cost and labor multipliers as a pair.
    pub fn factor(&self) -> RegionalFactor {
        RegionalFactor {
            cost: self.cost_multiplier,
            labor: self.labor_multiplier,
        }
    }
}

/// Cost and labor multipliers for a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionalFactor {
    pub cost: f64,
    pub labor: f64,
}

/// Built-in Brazilian state table: `(code, irradiation, cost, labor)`.
const BUILTIN: &[(&str, f64, f64, f64)] = &[
    ("AC", 4.7, 1.20, 1.15),
    ("AL", 5.5, 1.05, 0.95),
    ("AM", 4.6, 1.20, 1.15),
    ("AP", 4.8, 1.20, 1.15),
    ("BA", 5.7, 1.00, 0.95),
    ("CE", 5.7, 1.00, 0.95),
    ("DF", 5.6, 1.05, 1.10),
    ("ES", 5.2, 1.00, 1.00),
    ("GO", 5.8, 1.00, 1.00),
    ("MA", 5.3, 1.05, 0.95),
    ("MG", 5.6, 0.95, 0.95),
    ("MS", 5.4, 1.00, 1.00),
    ("MT", 5.5, 1.05, 1.00),
    ("PA", 4.9, 1.15, 1.05),
    ("PB", 5.8, 1.00, 0.90),
    ("PE", 5.7, 1.00, 0.95),
    ("PI", 5.9, 1.05, 0.90),
    ("PR", 4.8, 0.95, 1.00),
    ("RJ", 5.1, 1.10, 1.15),
    ("RN", 5.9, 1.00, 0.90),
    ("RO", 4.8, 1.15, 1.05),
    ("RR", 4.9, 1.20, 1.15),
    ("RS", 4.6, 0.95, 1.00),
    ("SC", 4.5, 0.95, 1.05),
    ("SE", 5.5, 1.00, 0.95),
    ("SP", 5.0, 1.00, 1.10),
    ("TO", 5.7, 1.05, 1.00),
];

/// Read-only lookup table with a guaranteed fallback entry.
///
/// Every lookup resolves: codes are trimmed and upper-cased, and anything
/// not in the table (including an empty string) yields the default profile.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    default: RegionProfile,
    entries: BTreeMap<String, RegionProfile>,
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RegionTable {
    /// The built-in table of Brazilian federative units.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(code, irr, cost, labor)| {
                (code.to_string(), RegionProfile::new(code, irr, cost, labor))
            })
            .collect();
        Self {
            default: RegionProfile::new(DEFAULT_REGION, 5.2, 1.0, 1.0),
            entries,
        }
    }

    /// Returns a copy of the table with `overrides` replacing or adding entries.
    ///
    /// An override whose code is `"default"` replaces the fallback profile.
    pub fn with_overrides(mut self, overrides: &[RegionProfile]) -> Self {
        for profile in overrides {
            if profile.region_code.eq_ignore_ascii_case(DEFAULT_REGION) {
                self.default = RegionProfile {
                    region_code: DEFAULT_REGION.to_string(),
                    ..profile.clone()
                };
            } else {
                let code = normalize(&profile.region_code);
                self.entries.insert(
                    code.clone(),
                    RegionProfile {
                        region_code: code,
                        ..profile.clone()
                    },
                );
            }
        }
        self
    }

    /// Resolves a region code to its profile, falling back to the default entry.
    pub fn lookup(&self, region_code: &str) -> &RegionProfile {
        match self.entries.get(&normalize(region_code)) {
            Some(profile) => profile,
            None => {
                log::debug!(
                    "region \"{region_code}\" not in table, using \"{DEFAULT_REGION}\""
                );
                &self.default
            }
        }
    }

    pub fn lookup_irradiation(&self, region_code: &str) -> f64 {
        self.lookup(region_code).irradiation_kwh_m2_day
    }

    pub fn lookup_regional_factor(&self, region_code: &str) -> RegionalFactor {
        self.lookup(region_code).factor()
    }

    /// The fallback profile.
    pub fn default_profile(&self) -> &RegionProfile {
        &self.default
    }

    /// All explicit (non-default) profiles, ordered by code.
    pub fn profiles(&self) -> impl Iterator<Item = &RegionProfile> {
        self.entries.values()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_region_resolves() {
        let table = RegionTable::builtin();
        assert_eq!(table.lookup_irradiation("GO"), 5.8);
        assert_eq!(table.lookup_regional_factor("GO").cost, 1.0);
    }

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        let table = RegionTable::builtin();
        assert_eq!(table.lookup(" go ").region_code, "GO");
    }

    #[test]
    fn unknown_region_falls_back_to_default() {
        let table = RegionTable::builtin();
        assert_eq!(
            table.lookup_irradiation("ZZ_UNKNOWN"),
            table.default_profile().irradiation_kwh_m2_day
        );
        assert_eq!(table.lookup("").region_code, DEFAULT_REGION);
    }

    #[test]
    fn builtin_covers_all_states() {
        assert_eq!(RegionTable::builtin().profiles().count(), 27);
    }

    #[test]
    fn overrides_replace_and_extend() {
        let table = RegionTable::builtin().with_overrides(&[
            RegionProfile::new("go", 6.1, 1.1, 1.2),
            RegionProfile::new("XX", 3.0, 2.0, 2.0),
            RegionProfile::new("DEFAULT", 4.0, 1.0, 1.0),
        ]);
        assert_eq!(table.lookup_irradiation("GO"), 6.1);
        assert_eq!(table.lookup_irradiation("xx"), 3.0);
        assert_eq!(table.lookup_irradiation("nowhere"), 4.0);
        assert_eq!(table.default_profile().region_code, DEFAULT_REGION);
    }
}
