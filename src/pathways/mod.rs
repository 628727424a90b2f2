//! Built-in pathway library.
//!
//! Curated network definitions constructed in code, with parameter
//! defaults anchored to the systems-biology literature. Each module
//! contributes its enzymes and a validated pathway; [`whole_body`] merges
//! them into the network the daily-rhythm driver runs against.
//!
//! Concentrations are order-of-magnitude physiological rather than exact:
//! the simulator targets qualitative consistency (directions, ratios,
//! responses to perturbation), not quantitative prediction.

pub mod energy;
pub mod krebs;
pub mod methylation;
pub mod nad_salvage;
pub mod urea;

use crate::error::ModelResult;
use crate::pathway::{EnzymeTable, Pathway};

/// The combined enzyme table across all built-in pathways.
pub fn standard_enzymes() -> ModelResult<EnzymeTable> {
    let mut enzymes = Vec::new();
    enzymes.extend(energy::enzymes());
    enzymes.extend(methylation::enzymes());
    enzymes.extend(krebs::enzymes());
    enzymes.extend(nad_salvage::enzymes());
    enzymes.extend(urea::enzymes());
    EnzymeTable::build(enzymes)
}

/// The whole-body network: all built-in pathways merged.
///
/// Metabolites are unioned by id (first definition wins), so shared
/// species like `nad`, `pyruvate`, and `acetyl_coa` resolve to a single
/// state-vector slot.
pub fn whole_body(enzymes: &EnzymeTable) -> ModelResult<Pathway> {
    let energy = energy::pathway(enzymes)?;
    let methylation = methylation::pathway(enzymes)?;
    let krebs = krebs::pathway(enzymes)?;
    let nad_salvage = nad_salvage::pathway(enzymes)?;
    let urea = urea::pathway(enzymes)?;
    Ok(Pathway::merge(
        "whole_body",
        "Whole-body metabolism",
        &[&energy, &methylation, &krebs, &nad_salvage, &urea],
    ))
}
