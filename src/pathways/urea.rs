//! Urea cycle entry segment (ammonia detoxification).
//!
//! The two mitochondrial steps are modelled explicitly: carbamoyl
//! phosphate synthetase I fixes ammonia, and ornithine transcarbamylase
//! condenses carbamoyl phosphate with ornithine into citrulline. The
//! cytosolic steps (ASS, ASL, arginase) are lumped into a single
//! citrulline-to-urea conversion that regenerates ornithine. A constant
//! ammonia source models baseline protein catabolism.
//!
//! Sleep restriction measurably shifts nitrogen handling; the personalizer
//! scales cps1/otc down on disrupted sleep.
//!
//! References:
//! - Meijer AJ et al. Physiol Rev. 1990;70:701-748 (urea cycle kinetics)
//! - Morris SM. Annu Rev Nutr. 2002;22:87-105

use crate::error::ModelResult;
use crate::kinetics::KineticsKind;
use crate::pathway::{Enzyme, EnzymeTable, Metabolite, Pathway, Reaction, ReactionParticipant};

/// Enzymes of the urea cycle segment.
pub fn enzymes() -> Vec<Enzyme> {
    vec![
        Enzyme::new("cps1", "Carbamoyl phosphate synthetase I", 0.004, 0.1)
            .with_ec("6.3.4.16")
            .with_cofactor("N-acetylglutamate"),
        Enzyme::new("otc", "Ornithine transcarbamylase", 0.005, 0.1).with_ec("2.1.3.3"),
        Enzyme::new("urea_distal", "Distal urea cycle (ASS/ASL/ARG1)", 0.004, 0.2),
        Enzyme::new("urea_export", "Renal urea clearance", 0.002, 1.0),
        Enzyme::new("nh3_source", "Protein catabolism ammonia", 0.0002, 1.0),
    ]
}

/// The urea cycle segment over the shared enzyme table.
pub fn pathway(enzymes: &EnzymeTable) -> ModelResult<Pathway> {
    let metabolites = vec![
        Metabolite::new("nh3", "Ammonia", 0.03, "mitochondria"),
        Metabolite::new("carbamoyl_p", "Carbamoyl phosphate", 0.01, "mitochondria"),
        Metabolite::new("ornithine", "Ornithine", 0.25, "mitochondria"),
        Metabolite::new("citrulline", "Citrulline", 0.05, "cytosol"),
        Metabolite::new("urea", "Urea", 4.0, "blood"),
    ];

    let participant = ReactionParticipant::new;
    let reactions = vec![
        Reaction::new(
            "nh3_production",
            "Baseline ammonia production",
            "nh3_source",
            vec![],
            vec![participant("nh3", 1)],
            KineticsKind::MassAction,
        ),
        Reaction::new(
            "cps1_fixation",
            "Ammonia fixation",
            "cps1",
            vec![participant("nh3", 1)],
            vec![participant("carbamoyl_p", 1)],
            KineticsKind::Allosteric,
        )
        .with_hill(1.5),
        Reaction::new(
            "otc_condensation",
            "Citrulline synthesis",
            "otc",
            vec![participant("carbamoyl_p", 1), participant("ornithine", 1)],
            vec![participant("citrulline", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "distal_urea_synthesis",
            "Citrulline to urea",
            "urea_distal",
            vec![participant("citrulline", 1)],
            vec![participant("urea", 1), participant("ornithine", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "urea_clearance",
            "Urea excretion",
            "urea_export",
            vec![participant("urea", 1)],
            vec![],
            KineticsKind::MassAction,
        ),
    ];

    Pathway::build(
        "urea",
        "Urea cycle",
        "Ammonia detoxification with lumped distal steps",
        metabolites,
        reactions,
        enzymes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathway::compiled::CompiledSystem;
    use crate::sim::integrator::integrate;

    fn compiled() -> CompiledSystem {
        let table = EnzymeTable::build(enzymes()).unwrap();
        let pathway = pathway(&table).unwrap();
        CompiledSystem::compile(&pathway, &table).unwrap()
    }

    #[test]
    fn test_ornithine_is_regenerated() {
        // Ornithine is consumed by OTC and returned by the distal lump
        let system = compiled();
        let y = system.initial_state();
        let mut dydt = vec![0.0; system.species_count()];
        system.derivatives(&y, &mut dydt);
        let otc_flux = system
            .fluxes(&y)
            .into_iter()
            .find(|(id, _)| id == "otc_condensation")
            .unwrap()
            .1;
        assert!(otc_flux > 0.0);
        // Net ornithine change is bounded by the slower distal flux
        let orn = system.index_of("ornithine").unwrap();
        assert!(dydt[orn].abs() < otc_flux);
    }

    #[test]
    fn test_ammonia_stays_bounded() {
        let system = compiled();
        let y0 = system.initial_state();
        let f = |y: &[f64], _t: f64, dydt: &mut [f64]| system.derivatives(y, dydt);
        let samples = integrate(&y0, 0.0, 120.0, 0.01, &f, 120.0);
        let y_final = &samples.last().unwrap().1;
        let nh3 = system.index_of("nh3").unwrap();
        // Fixation keeps pace with the constant source
        assert!(y_final[nh3] < 1.0);
    }

    #[test]
    fn test_reduced_cps1_raises_ammonia() {
        let system = compiled();
        let mut slowed = system.clone();
        slowed.set_activity("cps1", 0.5);
        let y0 = system.initial_state();
        let run = |system: &CompiledSystem| {
            let f = |y: &[f64], _t: f64, dydt: &mut [f64]| system.derivatives(y, dydt);
            integrate(&y0, 0.0, 60.0, 0.01, &f, 60.0)
                .last()
                .unwrap()
                .1[system.index_of("nh3").unwrap()]
        };
        assert!(run(&slowed) > run(&system));
    }
}
