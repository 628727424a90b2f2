//! Homeostatic clamping of vital metabolites.
//!
//! The reaction network does not represent every regulatory system of the
//! body (endocrine loops, breathing, hepatic buffering, salvage pathways).
//! This module models their aggregate effect as a data-driven table of
//! correction rules applied after each integration substep, keeping a
//! curated set of vital metabolites inside physiological envelopes.
//!
//! Rules come in two families:
//! - **threshold corrections** that move a species to a target in one
//!   application (glycogenolysis, adenine-pool top-up, bounds and caps);
//!   these reach a fixed point immediately, so reapplying them at the
//!   corrected state changes nothing;
//! - **rate processes** scaled by the substep dt (oxygen resupply, insulin
//!   decay, ROS clearance, slow pool refills) that model continuous
//!   background physiology.
//!
//! Every rule carries a name and an enabled flag so the pure network can be
//! tested with any subset of corrections switched off.
//!
//! Physiological envelopes follow standard clinical reference ranges:
//! fasting blood glucose 4.5-5.3 mM, hepatic glycogen store <= ~100 g,
//! cortisol bounded well inside the diurnal extreme values.

use crate::sim::species::{add, get, SpeciesMap};

/// Glycogen grams mobilized per mM of blood glucose.
pub const GLYCOGEN_G_PER_MM: f64 = 5.0;

/// Adipose grams consumed per mM of glucose made de novo.
pub const ADIPOSE_G_PER_MM: f64 = 20.0;

/// Hepatic glycogen storage ceiling (g).
pub const GLYCOGEN_CAP_G: f64 = 100.0;

/// One clamp rule: a named, individually toggleable correction.
#[derive(Debug, Clone)]
pub struct ClampRule {
    /// Stable rule name used for toggling and logging.
    pub name: &'static str,
    /// Disabled rules are skipped entirely.
    pub enabled: bool,
    kind: RuleKind,
}

/// The correction a rule applies. Thresholds move state to a target;
/// rates integrate a background process over the substep dt.
#[derive(Debug, Clone, Copy)]
enum RuleKind {
    GlucoseFloorGlycogenolysis,
    GlucoseFloorGluconeogenesis,
    GlucoseStorage,
    AtpFloor,
    AdeninePoolTopUp,
    AtpCeiling,
    O2Resupply,
    NadPoolFloor,
    AminoPoolRelease,
    InsulinDecay,
    CortisolBounds,
    RosClearance,
    AcetylCoaFloor,
    PrppFloor,
    CoaFloor,
    AccumulationCaps,
}

/// The homeostatic clamp: an ordered rule table over the state vector.
#[derive(Debug, Clone)]
pub struct HomeostasisTable {
    rules: Vec<ClampRule>,
    /// Basal insulin level the decay rule relaxes toward (units).
    pub insulin_baseline: f64,
}

impl HomeostasisTable {
    /// Standard rule table in application order.
    pub fn new() -> Self {
        let rule = |name, kind| ClampRule {
            name,
            enabled: true,
            kind,
        };
        Self {
            rules: vec![
                rule("glucose_floor_glycogenolysis", RuleKind::GlucoseFloorGlycogenolysis),
                rule("glucose_floor_gluconeogenesis", RuleKind::GlucoseFloorGluconeogenesis),
                rule("glucose_storage", RuleKind::GlucoseStorage),
                rule("atp_floor", RuleKind::AtpFloor),
                rule("adenine_pool_top_up", RuleKind::AdeninePoolTopUp),
                rule("atp_ceiling", RuleKind::AtpCeiling),
                rule("o2_resupply", RuleKind::O2Resupply),
                rule("nad_pool_floor", RuleKind::NadPoolFloor),
                rule("amino_pool_release", RuleKind::AminoPoolRelease),
                rule("insulin_decay", RuleKind::InsulinDecay),
                rule("cortisol_bounds", RuleKind::CortisolBounds),
                rule("ros_clearance", RuleKind::RosClearance),
                rule("acetyl_coa_floor", RuleKind::AcetylCoaFloor),
                rule("prpp_floor", RuleKind::PrppFloor),
                rule("coa_floor", RuleKind::CoaFloor),
                rule("accumulation_caps", RuleKind::AccumulationCaps),
            ],
            insulin_baseline: 1.0,
        }
    }

    /// Names of all rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    /// Enable or disable one rule by name; unknown names are ignored.
    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        for rule in &mut self.rules {
            if rule.name == name {
                rule.enabled = enabled;
            }
        }
    }

    /// Disable every rule (pure-network testing).
    pub fn disable_all(&mut self) {
        for rule in &mut self.rules {
            rule.enabled = false;
        }
    }

    /// Apply all enabled rules in table order for one substep of `dt_sec`.
    pub fn apply(&self, species: &SpeciesMap, y: &mut [f64], dt_sec: f64) {
        for rule in &self.rules {
            if rule.enabled {
                self.apply_rule(rule.kind, species, y, dt_sec);
            }
        }
    }

    fn apply_rule(&self, kind: RuleKind, s: &SpeciesMap, y: &mut [f64], dt: f64) {
        match kind {
            RuleKind::GlucoseFloorGlycogenolysis => {
                let (Some(glucose), Some(glycogen)) = (s.glucose_blood, s.glycogen_liver) else {
                    return;
                };
                if y[glucose] < 4.5 && y[glycogen] > 0.0 {
                    let needed_g = (4.5 - y[glucose]) * GLYCOGEN_G_PER_MM;
                    let released_g = needed_g.min(y[glycogen]);
                    y[glycogen] -= released_g;
                    y[glucose] += released_g / GLYCOGEN_G_PER_MM;
                }
            }
            RuleKind::GlucoseFloorGluconeogenesis => {
                let (Some(glucose), Some(adipose)) = (s.glucose_blood, s.adipose_store) else {
                    return;
                };
                let glycogen_left = get(y, s.glycogen_liver);
                if y[glucose] < 4.5 && glycogen_left <= 0.0 && y[adipose] > 0.0 {
                    let needed_g = (4.5 - y[glucose]) * ADIPOSE_G_PER_MM;
                    let burned_g = needed_g.min(y[adipose]);
                    y[adipose] -= burned_g;
                    y[glucose] = (y[glucose] + burned_g / ADIPOSE_G_PER_MM).min(4.5);
                    // Lipolysis releases fatty acids alongside glycerol
                    add(y, s.fatty_acids_blood, burned_g * 0.005);
                }
            }
            RuleKind::GlucoseStorage => {
                let (Some(glucose), Some(glycogen)) = (s.glucose_blood, s.glycogen_liver) else {
                    return;
                };
                if y[glucose] > 5.3 && y[glycogen] < GLYCOGEN_CAP_G {
                    let insulin_drive = (get(y, s.insulin) / 3.0).min(1.0);
                    let stored_mM = (y[glucose] - 5.3) * insulin_drive;
                    let stored_g =
                        (stored_mM * GLYCOGEN_G_PER_MM).min(GLYCOGEN_CAP_G - y[glycogen]);
                    y[glycogen] += stored_g;
                    y[glucose] -= stored_g / GLYCOGEN_G_PER_MM;
                }
            }
            RuleKind::AtpFloor => {
                let (Some(atp), Some(adp)) = (s.atp, s.adp) else {
                    return;
                };
                if y[atp] < 4.0 {
                    let transfer = (4.0 - y[atp]).min(0.8 * y[adp]);
                    y[atp] += transfer;
                    y[adp] -= transfer;
                    // Regeneration is paid for by glycolytic flux
                    add(y, s.glucose_blood, -0.1 * transfer);
                }
            }
            RuleKind::AdeninePoolTopUp => {
                let (Some(atp), Some(adp)) = (s.atp, s.adp) else {
                    return;
                };
                if y[atp] + y[adp] < 5.0 {
                    y[atp] = 5.5 * 0.8;
                    y[adp] = 5.5 * 0.2;
                }
            }
            RuleKind::AtpCeiling => {
                let (Some(atp), Some(adp)) = (s.atp, s.adp) else {
                    return;
                };
                if y[atp] > 6.0 {
                    y[adp] += y[atp] - 6.0;
                    y[atp] = 6.0;
                }
            }
            RuleKind::O2Resupply => {
                if let Some(o2) = s.o2 {
                    y[o2] += (0.13 - y[o2]) * 0.5 * dt;
                }
            }
            RuleKind::NadPoolFloor => {
                let (Some(nad), Some(nadh)) = (s.nad, s.nadh) else {
                    return;
                };
                if y[nad] + y[nadh] < 1.0 {
                    y[nad] = y[nad].max(0.5);
                    y[nadh] = y[nadh].max(0.3);
                }
            }
            RuleKind::AminoPoolRelease => {
                let (Some(met), Some(pool)) = (s.met, s.amino_acid_pool) else {
                    return;
                };
                if y[met] < 0.01 && y[pool] > 0.0 {
                    let released_g = (0.001 * dt / 60.0).min(y[pool]);
                    y[pool] -= released_g;
                    y[met] += released_g * 0.1;
                }
            }
            RuleKind::InsulinDecay => {
                if let Some(insulin) = s.insulin {
                    let base = self.insulin_baseline;
                    y[insulin] = base + (y[insulin] - base) * (-0.05 * dt).exp();
                }
            }
            RuleKind::CortisolBounds => {
                if let Some(cortisol) = s.cortisol {
                    y[cortisol] = y[cortisol].clamp(0.05, 1.5);
                }
            }
            RuleKind::RosClearance => {
                if let Some(ros) = s.ros {
                    if y[ros] > 0.001 {
                        y[ros] = (y[ros] - 0.01 * dt).max(0.0);
                    }
                }
            }
            RuleKind::AcetylCoaFloor => {
                if let Some(acetyl) = s.acetyl_coa {
                    if y[acetyl] < 0.05 {
                        y[acetyl] += 0.01 * dt;
                        // Beta-oxidation supplies the acetyl units
                        add(y, s.adipose_store, -0.5 * dt);
                    }
                }
            }
            RuleKind::PrppFloor => {
                if let Some(prpp) = s.prpp {
                    if y[prpp] < 0.05 {
                        y[prpp] += 0.02 * dt;
                    }
                }
            }
            RuleKind::CoaFloor => {
                if let Some(coa) = s.coa {
                    if y[coa] < 0.2 {
                        y[coa] += 0.02 * dt;
                    }
                }
            }
            RuleKind::AccumulationCaps => {
                for idx in [s.citrate, s.succinate, s.malate] {
                    if let Some(i) = idx {
                        y[i] = y[i].min(2.0);
                    }
                }
                if let Some(i) = s.pyruvate {
                    y[i] = y[i].min(1.0);
                }
            }
        }
    }
}

impl Default for HomeostasisTable {
    fn default() -> Self {
        Self::new()
    }
}
