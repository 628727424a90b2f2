//! Kinetic rate laws for metabolic reactions.
//!
//! Provides the rate equations used by the pathway simulator:
//! - Michaelis-Menten kinetics
//! - Competitive and non-competitive inhibition
//! - Allosteric (Hill) kinetics for cooperative enzymes
//! - Mass action (first order, or constant source with no substrate)
//!
//! All functions are pure and never fail: degenerate inputs (zero or
//! negative substrate, non-positive Vmax or Km) yield a rate of 0 rather
//! than NaN or a negative rate.
//!
//! References:
//! - Michaelis L, Menten ML. Biochemische Zeitschrift. 1913;49:333-369
//! - Hill AV. Journal of Physiology. 1910;40:iv-vii
//! - Cornish-Bowden A. Fundamentals of Enzyme Kinetics. 4th ed. 2012

use serde::{Deserialize, Serialize};

/// Tagged kinetics kind selecting the base rate formula for a reaction.
///
/// The formula is applied to the reaction's first declared substrate (the
/// "limiting" substrate). Additional substrates are consumed
/// stoichiometrically but do not enter the rate law; this is a deliberate
/// simplification of multi-substrate kinetics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KineticsKind {
    /// v = Vmax * [S] / (Km + [S])
    MichaelisMenten,
    /// v = Vmax * [S] / (Km * (1 + [I]/Ki) + [S])
    CompetitiveInhibition,
    /// v = (Vmax / (1 + [I]/Ki)) * [S] / (Km + [S])
    NonCompetitiveInhibition,
    /// v = Vmax * [S]^n / (K^n + [S]^n)
    Allosteric,
    /// v = k * [S], or a constant source of k with no substrate
    MassAction,
}

/// Simple Michaelis-Menten kinetics.
///
/// v = Vmax * [S] / (Km + [S])
///
/// Returns 0 when `s_mM <= 0`, `km_mM <= 0`, or `vmax <= 0`.
#[inline]
pub fn michaelis_menten(vmax_mM_per_sec: f64, km_mM: f64, s_mM: f64) -> f64 {
    if s_mM <= 0.0 || km_mM <= 0.0 || vmax_mM_per_sec <= 0.0 {
        return 0.0;
    }
    vmax_mM_per_sec * s_mM / (km_mM + s_mM)
}

/// Michaelis-Menten with competitive inhibition.
///
/// v = Vmax * [S] / (Km * (1 + [I]/Ki) + [S])
///
/// The inhibitor raises the apparent Km without changing Vmax. Falls back
/// to plain Michaelis-Menten when `ki_mM <= 0` (no inhibition constant
/// declared).
#[inline]
pub fn competitive_inhibition(
    vmax_mM_per_sec: f64,
    km_mM: f64,
    s_mM: f64,
    i_mM: f64,
    ki_mM: f64,
) -> f64 {
    if ki_mM <= 0.0 {
        return michaelis_menten(vmax_mM_per_sec, km_mM, s_mM);
    }
    if s_mM <= 0.0 || km_mM <= 0.0 || vmax_mM_per_sec <= 0.0 {
        return 0.0;
    }
    let km_apparent = km_mM * (1.0 + i_mM.max(0.0) / ki_mM);
    vmax_mM_per_sec * s_mM / (km_apparent + s_mM)
}

/// Michaelis-Menten with non-competitive inhibition.
///
/// v = (Vmax / (1 + [I]/Ki)) * [S] / (Km + [S])
///
/// The inhibitor lowers the apparent Vmax without changing Km.
#[inline]
pub fn noncompetitive_inhibition(
    vmax_mM_per_sec: f64,
    km_mM: f64,
    s_mM: f64,
    i_mM: f64,
    ki_mM: f64,
) -> f64 {
    if ki_mM <= 0.0 {
        return michaelis_menten(vmax_mM_per_sec, km_mM, s_mM);
    }
    let vmax_apparent = vmax_mM_per_sec / (1.0 + i_mM.max(0.0) / ki_mM);
    michaelis_menten(vmax_apparent, km_mM, s_mM)
}

/// Allosteric (Hill) kinetics for cooperative enzymes.
///
/// v = Vmax * [S]^n / (K^n + [S]^n)
///
/// With n = 1 this reduces to Michaelis-Menten.
#[inline]
pub fn allosteric(vmax_mM_per_sec: f64, k_half_mM: f64, s_mM: f64, n: f64) -> f64 {
    if s_mM <= 0.0 || k_half_mM <= 0.0 || vmax_mM_per_sec <= 0.0 {
        return 0.0;
    }
    let s_n = s_mM.powf(n);
    let k_n = k_half_mM.powf(n);
    vmax_mM_per_sec * s_n / (k_n + s_n)
}

/// Mass action kinetics, first order in the substrate.
///
/// v = k * [S]
///
/// With no substrate (`s_mM` is `None`) the rate is the constant k,
/// modelling a constant source such as dietary intake or basal synthesis.
#[inline]
pub fn mass_action(k_per_sec: f64, s_mM: Option<f64>) -> f64 {
    if k_per_sec <= 0.0 {
        return 0.0;
    }
    match s_mM {
        Some(s) if s > 0.0 => k_per_sec * s,
        Some(_) => 0.0,
        None => k_per_sec,
    }
}

/// Activator scaling applied on top of a base rate.
///
/// v' = v * (1 + [A]/Ka)
///
/// Returns the base rate unchanged when `ka_mM <= 0` or the activator is
/// absent.
#[inline]
pub fn activation_multiplier(base_rate: f64, a_mM: f64, ka_mM: f64) -> f64 {
    if ka_mM <= 0.0 || a_mM <= 0.0 {
        return base_rate;
    }
    base_rate * (1.0 + a_mM / ka_mM)
}

/// Parameters needed to evaluate one reaction's rate.
///
/// Assembled by the compiled system from the reaction declaration and the
/// enzyme table; concentrations are read from the current state vector.
#[derive(Debug, Clone, Copy)]
pub struct RateInput {
    /// Effective Vmax (mM/s) after all activity multipliers.
    pub vmax_mM_per_sec: f64,
    /// Km or half-saturation constant (mM).
    pub km_mM: f64,
    /// Limiting substrate concentration (mM); `None` for substrate-free
    /// mass-action sources.
    pub s_mM: Option<f64>,
    /// Summed inhibitor concentration (mM).
    pub i_mM: f64,
    /// Inhibition constant (mM); 0 when no inhibitors declared.
    pub ki_mM: f64,
    /// Summed activator concentration (mM).
    pub a_mM: f64,
    /// Activation constant (mM); 0 when no activators declared.
    pub ka_mM: f64,
    /// Hill coefficient for allosteric kinetics.
    pub hill: f64,
}

/// Evaluate the rate of a single reaction.
///
/// Dispatches on the kinetics kind, applies the base formula to the
/// limiting substrate, then the activator multiplier. Never returns a
/// negative rate.
pub fn reaction_rate(kind: KineticsKind, input: &RateInput) -> f64 {
    let s = input.s_mM;
    let base = match kind {
        KineticsKind::MichaelisMenten => {
            michaelis_menten(input.vmax_mM_per_sec, input.km_mM, s.unwrap_or(0.0))
        }
        KineticsKind::CompetitiveInhibition => competitive_inhibition(
            input.vmax_mM_per_sec,
            input.km_mM,
            s.unwrap_or(0.0),
            input.i_mM,
            input.ki_mM,
        ),
        KineticsKind::NonCompetitiveInhibition => noncompetitive_inhibition(
            input.vmax_mM_per_sec,
            input.km_mM,
            s.unwrap_or(0.0),
            input.i_mM,
            input.ki_mM,
        ),
        KineticsKind::Allosteric => allosteric(
            input.vmax_mM_per_sec,
            input.km_mM,
            s.unwrap_or(0.0),
            input.hill.max(1.0),
        ),
        KineticsKind::MassAction => mass_action(input.vmax_mM_per_sec, s),
    };
    activation_multiplier(base, input.a_mM, input.ka_mM).max(0.0)
}
