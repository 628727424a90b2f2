//! Compiled pathway form for the integration hot path.
//!
//! Id strings are resolved once into dense vector indices so the derivative
//! assembly runs over plain `f64` slices with no hashing. Reactions are
//! evaluated in declaration order; summation order is therefore fixed and
//! trajectories are bit-stable for identical inputs on one platform.

use std::collections::HashMap;

use crate::error::{ModelError, ModelResult};
use crate::kinetics::{reaction_rate, KineticsKind, RateInput};
use crate::pathway::{EnzymeTable, Pathway};

/// One reaction flattened to indices and coefficients.
#[derive(Debug, Clone)]
pub struct CompiledReaction {
    /// Reaction id, kept for flux reporting.
    pub id: String,
    /// Index into the compiled enzyme arrays.
    pub enzyme_index: usize,
    /// Base rate law.
    pub kinetics: KineticsKind,
    /// (species index, coefficient) per substrate, declaration order.
    pub substrates: Vec<(usize, f64)>,
    /// (species index, coefficient) per product, declaration order.
    pub products: Vec<(usize, f64)>,
    /// Species indices whose concentrations sum into [I].
    pub inhibitors: Vec<usize>,
    /// Species indices whose concentrations sum into [A].
    pub activators: Vec<usize>,
    /// Inhibition constant (mM); 0 disables the inhibition term.
    pub ki_mM: f64,
    /// Activation constant (mM); 0 disables the activation term.
    pub ka_mM: f64,
    /// Hill coefficient for allosteric kinetics.
    pub hill: f64,
}

/// A pathway resolved for integration.
///
/// The species order is the pathway's metabolite declaration order; the
/// state vector, derivative vector, and CSV export columns all share it.
#[derive(Debug, Clone)]
pub struct CompiledSystem {
    /// Species ids in declaration order.
    species_ids: Vec<String>,
    /// Species id -> state-vector index.
    index: HashMap<String, usize>,
    /// Initial concentrations (mM) in species order.
    initial_mM: Vec<f64>,
    /// Flattened reactions in declaration order.
    reactions: Vec<CompiledReaction>,
    /// Enzyme ids aligned with the vmax/km/activity arrays.
    enzyme_ids: Vec<String>,
    /// Enzyme id -> enzyme index.
    enzyme_index: HashMap<String, usize>,
    /// Declared Vmax (mM/s) per enzyme.
    vmax_mM_per_sec: Vec<f64>,
    /// Declared Km (mM) per enzyme.
    km_mM: Vec<f64>,
    /// Runtime activity multiplier per enzyme (circadian overlays,
    /// intervention sweeps); 1.0 is neutral.
    activity: Vec<f64>,
}

impl CompiledSystem {
    /// Resolve a pathway and enzyme table into integration form.
    ///
    /// The pathway is assumed to have passed [`Pathway::build`]; reference
    /// closure is still re-checked so a hand-assembled pathway cannot index
    /// out of bounds.
    pub fn compile(pathway: &Pathway, enzymes: &EnzymeTable) -> ModelResult<Self> {
        let mut index = HashMap::with_capacity(pathway.metabolites.len());
        let mut species_ids = Vec::with_capacity(pathway.metabolites.len());
        let mut initial_mM = Vec::with_capacity(pathway.metabolites.len());
        for m in &pathway.metabolites {
            if index.insert(m.id.clone(), species_ids.len()).is_some() {
                return Err(ModelError::DuplicateId {
                    kind: "metabolite",
                    id: m.id.clone(),
                });
            }
            species_ids.push(m.id.clone());
            initial_mM.push(m.initial_concentration_mM.max(0.0));
        }

        let mut enzyme_ids = Vec::new();
        let mut enzyme_index = HashMap::new();
        let mut vmax = Vec::new();
        let mut km = Vec::new();

        let resolve = |reaction: &str, id: &str, index: &HashMap<String, usize>| {
            index
                .get(id)
                .copied()
                .ok_or_else(|| ModelError::UnknownReference {
                    reaction: reaction.to_string(),
                    id: id.to_string(),
                })
        };

        let mut reactions = Vec::with_capacity(pathway.reactions.len());
        for r in &pathway.reactions {
            let enzyme = enzymes
                .get(&r.enzyme_id)
                .ok_or_else(|| ModelError::MissingEnzyme {
                    reaction: r.id.clone(),
                    enzyme_id: r.enzyme_id.clone(),
                })?;

            let enzyme_idx = *enzyme_index.entry(enzyme.id.clone()).or_insert_with(|| {
                enzyme_ids.push(enzyme.id.clone());
                vmax.push(enzyme.vmax_mM_per_sec);
                km.push(enzyme.km_mM);
                enzyme_ids.len() - 1
            });

            let substrates = r
                .substrates
                .iter()
                .map(|p| Ok((resolve(&r.id, &p.metabolite_id, &index)?, f64::from(p.coefficient))))
                .collect::<ModelResult<Vec<_>>>()?;
            let products = r
                .products
                .iter()
                .map(|p| Ok((resolve(&r.id, &p.metabolite_id, &index)?, f64::from(p.coefficient))))
                .collect::<ModelResult<Vec<_>>>()?;
            let inhibitors = r
                .inhibitors
                .iter()
                .map(|id| resolve(&r.id, id, &index))
                .collect::<ModelResult<Vec<_>>>()?;
            let activators = r
                .activators
                .iter()
                .map(|id| resolve(&r.id, id, &index))
                .collect::<ModelResult<Vec<_>>>()?;

            reactions.push(CompiledReaction {
                id: r.id.clone(),
                enzyme_index: enzyme_idx,
                kinetics: r.kinetics,
                substrates,
                products,
                inhibitors,
                activators,
                ki_mM: r.ki_mM.unwrap_or(0.0),
                ka_mM: r.ka_mM.unwrap_or(0.0),
                hill: r.hill_coefficient.unwrap_or(1.0),
            });
        }

        let n_enzymes = enzyme_ids.len();
        Ok(Self {
            species_ids,
            index,
            initial_mM,
            reactions,
            enzyme_ids,
            enzyme_index,
            vmax_mM_per_sec: vmax,
            km_mM: km,
            activity: vec![1.0; n_enzymes],
        })
    }

    /// Number of tracked species.
    pub fn species_count(&self) -> usize {
        self.species_ids.len()
    }

    /// Species ids in declaration (state-vector) order.
    pub fn species_ids(&self) -> &[String] {
        &self.species_ids
    }

    /// Number of reactions.
    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    /// State-vector index of a species id.
    pub fn index_of(&self, species_id: &str) -> Option<usize> {
        self.index.get(species_id).copied()
    }

    /// Fresh state vector holding the declared initial concentrations.
    pub fn initial_state(&self) -> Vec<f64> {
        self.initial_mM.clone()
    }

    /// Set the runtime activity multiplier for one enzyme.
    ///
    /// Unknown ids are ignored; the multiplier is clamped non-negative.
    pub fn set_activity(&mut self, enzyme_id: &str, multiplier: f64) {
        if let Some(&i) = self.enzyme_index.get(enzyme_id) {
            self.activity[i] = multiplier.max(0.0);
        }
    }

    /// Current activity multiplier for one enzyme (1.0 when unknown).
    pub fn activity_of(&self, enzyme_id: &str) -> f64 {
        self.enzyme_index
            .get(enzyme_id)
            .map_or(1.0, |&i| self.activity[i])
    }

    /// Rate (mM/s) of one compiled reaction at the given state.
    fn rate(&self, reaction: &CompiledReaction, y: &[f64]) -> f64 {
        let s_mM = reaction.substrates.first().map(|&(i, _)| y[i]);
        let i_mM: f64 = reaction.inhibitors.iter().map(|&i| y[i].max(0.0)).sum();
        let a_mM: f64 = reaction.activators.iter().map(|&i| y[i].max(0.0)).sum();

        let input = RateInput {
            vmax_mM_per_sec: self.vmax_mM_per_sec[reaction.enzyme_index]
                * self.activity[reaction.enzyme_index],
            km_mM: self.km_mM[reaction.enzyme_index],
            s_mM,
            i_mM,
            ki_mM: reaction.ki_mM,
            a_mM,
            ka_mM: reaction.ka_mM,
            hill: reaction.hill,
        };
        reaction_rate(reaction.kinetics, &input)
    }

    /// Assemble the derivative vector at the given state.
    ///
    /// Zeroes `dydt`, then for each reaction in declaration order subtracts
    /// rate x coefficient from each substrate and adds it to each product.
    pub fn derivatives(&self, y: &[f64], dydt: &mut [f64]) {
        for d in dydt.iter_mut() {
            *d = 0.0;
        }
        for reaction in &self.reactions {
            let v = self.rate(reaction, y);
            for &(idx, coeff) in &reaction.substrates {
                dydt[idx] -= v * coeff;
            }
            for &(idx, coeff) in &reaction.products {
                dydt[idx] += v * coeff;
            }
        }
    }

    /// Per-reaction fluxes (mM/s) at the given state, declaration order.
    pub fn fluxes(&self, y: &[f64]) -> Vec<(String, f64)> {
        self.reactions
            .iter()
            .map(|r| (r.id.clone(), self.rate(r, y)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathway::{Enzyme, Metabolite, Reaction, ReactionParticipant};

    fn simple_system() -> CompiledSystem {
        let enzymes = EnzymeTable::build(vec![
            Enzyme::new("e1", "Converter", 1.0, 0.1),
            Enzyme::new("src", "Source", 0.05, 1.0),
        ])
        .unwrap();
        let pathway = Pathway::build(
            "p",
            "Test",
            "",
            vec![
                Metabolite::new("a", "A", 0.1, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![
                Reaction::new(
                    "r1",
                    "A to B",
                    "e1",
                    vec![ReactionParticipant::new("a", 1)],
                    vec![ReactionParticipant::new("b", 1)],
                    KineticsKind::MichaelisMenten,
                ),
                // Substrate-free source of A
                Reaction::new(
                    "r2",
                    "A source",
                    "src",
                    vec![],
                    vec![ReactionParticipant::new("a", 1)],
                    KineticsKind::MassAction,
                ),
            ],
            &enzymes,
        )
        .unwrap();
        CompiledSystem::compile(&pathway, &enzymes).unwrap()
    }

    #[test]
    fn test_derivative_assembly() {
        let system = simple_system();
        let y = system.initial_state();
        let mut dydt = vec![0.0; system.species_count()];
        system.derivatives(&y, &mut dydt);

        // r1 at [S] = Km runs at Vmax/2 = 0.5; r2 sources A at 0.05
        assert!((dydt[0] - (-0.5 + 0.05)).abs() < 1e-9);
        assert!((dydt[1] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_constant_source_flux() {
        let system = simple_system();
        let y = system.initial_state();
        let fluxes = system.fluxes(&y);
        let source = fluxes.iter().find(|(id, _)| id == "r2").unwrap();
        assert!((source.1 - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_activity_scales_rate() {
        let mut system = simple_system();
        let y = system.initial_state();

        let baseline = system.fluxes(&y)[0].1;
        system.set_activity("e1", 0.3);
        let reduced = system.fluxes(&y)[0].1;
        assert!((reduced / baseline - 0.3).abs() < 1e-9);

        // Unknown enzyme ids are ignored
        system.set_activity("nope", 0.0);
        assert!((system.activity_of("nope") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stoichiometric_coefficients() {
        let enzymes = EnzymeTable::build(vec![Enzyme::new("e1", "E", 1.0, 0.1)]).unwrap();
        let pathway = Pathway::build(
            "p",
            "Test",
            "",
            vec![
                Metabolite::new("a", "A", 0.1, "cytosol"),
                Metabolite::new("b", "B", 0.0, "cytosol"),
            ],
            vec![Reaction::new(
                "r1",
                "2A to 3B",
                "e1",
                vec![ReactionParticipant::new("a", 2)],
                vec![ReactionParticipant::new("b", 3)],
                KineticsKind::MichaelisMenten,
            )],
            &enzymes,
        )
        .unwrap();
        let system = CompiledSystem::compile(&pathway, &enzymes).unwrap();

        let y = system.initial_state();
        let mut dydt = vec![0.0; 2];
        system.derivatives(&y, &mut dydt);
        // Rate 0.5 at [S] = Km, scaled by stoichiometry
        assert!((dydt[0] - (-1.0)).abs() < 1e-9);
        assert!((dydt[1] - 1.5).abs() < 1e-9);
    }
}
