//! Resolved indices for the species the driver manipulates directly.
//!
//! The circadian overlay, schedule events, and homeostatic clamp address a
//! curated set of well-known metabolites by id. Indices are resolved once
//! against the compiled system; species absent from the loaded pathway
//! resolve to `None` and every rule touching them becomes a no-op, so the
//! driver runs unchanged on partial networks (e.g. a bare methylation
//! pathway with no glucose machinery).

use crate::pathway::compiled::CompiledSystem;

/// Optional state-vector indices for driver-managed species.
#[derive(Debug, Clone, Default)]
pub struct SpeciesMap {
    pub glucose_blood: Option<usize>,
    pub glycogen_liver: Option<usize>,
    pub adipose_store: Option<usize>,
    pub amino_acid_pool: Option<usize>,
    pub insulin: Option<usize>,
    pub atp: Option<usize>,
    pub adp: Option<usize>,
    pub amp: Option<usize>,
    pub ampk: Option<usize>,
    pub mtor: Option<usize>,
    pub fatty_acids_blood: Option<usize>,
    pub met: Option<usize>,
    pub melatonin: Option<usize>,
    pub adenosine: Option<usize>,
    pub cortisol: Option<usize>,
    pub o2: Option<usize>,
    pub nad: Option<usize>,
    pub nadh: Option<usize>,
    pub ros: Option<usize>,
    pub gsh: Option<usize>,
    pub acetyl_coa: Option<usize>,
    pub prpp: Option<usize>,
    pub coa: Option<usize>,
    pub citrate: Option<usize>,
    pub succinate: Option<usize>,
    pub malate: Option<usize>,
    pub pyruvate: Option<usize>,
}

impl SpeciesMap {
    /// Resolve the well-known ids against a compiled system.
    pub fn resolve(system: &CompiledSystem) -> Self {
        let idx = |id: &str| system.index_of(id);
        Self {
            glucose_blood: idx("glucose_blood"),
            glycogen_liver: idx("glycogen_liver"),
            adipose_store: idx("adipose_store"),
            amino_acid_pool: idx("amino_acid_pool"),
            insulin: idx("insulin"),
            atp: idx("atp"),
            adp: idx("adp"),
            amp: idx("amp"),
            ampk: idx("ampk"),
            mtor: idx("mtor"),
            fatty_acids_blood: idx("fatty_acids_blood"),
            met: idx("met"),
            melatonin: idx("melatonin"),
            adenosine: idx("adenosine"),
            cortisol: idx("cortisol"),
            o2: idx("o2"),
            nad: idx("nad"),
            nadh: idx("nadh"),
            ros: idx("ros"),
            gsh: idx("gsh"),
            acetyl_coa: idx("acetyl_coa"),
            prpp: idx("prpp"),
            coa: idx("coa"),
            citrate: idx("citrate"),
            succinate: idx("succinate"),
            malate: idx("malate"),
            pyruvate: idx("pyruvate"),
        }
    }
}

/// Read a species value, 0.0 when the species is absent.
#[inline]
pub fn get(y: &[f64], idx: Option<usize>) -> f64 {
    idx.map_or(0.0, |i| y[i])
}

/// Overwrite a species value (clamped non-negative); no-op when absent.
#[inline]
pub fn set(y: &mut [f64], idx: Option<usize>, value: f64) {
    if let Some(i) = idx {
        y[i] = value.max(0.0);
    }
}

/// Add to a species value (result clamped non-negative); no-op when absent.
#[inline]
pub fn add(y: &mut [f64], idx: Option<usize>, delta: f64) {
    if let Some(i) = idx {
        y[i] = (y[i] + delta).max(0.0);
    }
}

/// Add to a species value but never exceed `ceiling`; no-op when absent or
/// already above the ceiling.
#[inline]
pub fn add_up_to(y: &mut [f64], idx: Option<usize>, delta: f64, ceiling: f64) {
    if let Some(i) = idx {
        if y[i] < ceiling {
            y[i] = (y[i] + delta).min(ceiling).max(0.0);
        }
    }
}
