//! Folate and methionine cycles (one-carbon metabolism).
//!
//! The folate cycle carries one-carbon units from serine catabolism to
//! 5-methyltetrahydrofolate; the methionine cycle consumes that methyl
//! group to regenerate methionine from homocysteine and drive SAM-dependent
//! methylation. The transsulfuration branch (CBS) drains homocysteine
//! toward cystathionine.
//!
//! The MTHFR C677T variant (rs1801133) produces a thermolabile enzyme with
//! roughly 30% residual activity in TT homozygotes and ~65% in CT
//! heterozygotes; carriers show reduced 5-MTHF and elevated homocysteine.
//!
//! References:
//! - Frosst P et al. Nat Genet. 1995;10:111-113 (MTHFR C677T)
//! - Finkelstein JD. J Nutr Biochem. 1990;1:228-237 (methionine cycle)
//! - Ducker GS, Rabinowitz JD. Cell Metab. 2017;25:27-42 (one-carbon)

use crate::error::ModelResult;
use crate::kinetics::KineticsKind;
use crate::pathway::{
    Enzyme, EnzymeTable, GeneticModifier, Metabolite, Pathway, Reaction, ReactionParticipant,
    Strand,
};

/// Enzymes of the folate and methionine cycles.
pub fn enzymes() -> Vec<Enzyme> {
    vec![
        Enzyme::new("shmt", "Serine hydroxymethyltransferase", 0.004, 0.5)
            .with_ec("2.1.2.1")
            .with_cofactor("B6"),
        Enzyme::new("mthfr", "Methylenetetrahydrofolate reductase", 0.005, 0.03)
            .with_ec("1.5.1.20")
            .with_cofactor("FAD")
            .with_modifier(GeneticModifier {
                rs_id: "rs1801133".to_string(),
                gene_name: "MTHFR".to_string(),
                // Risk allele declared on the plus strand; consumer raw
                // files report this SNP on the minus strand, so genotypes
                // are complemented before counting (TT reads as AA).
                risk_allele: 'A',
                orientation: Strand::Minus,
                homozygous_effect: 0.30,
                heterozygous_effect: 0.65,
                description: "C677T thermolabile variant (Frosst 1995)".to_string(),
            }),
        Enzyme::new("ms", "Methionine synthase", 0.0015, 0.05)
            .with_ec("2.1.1.13")
            .with_cofactor("B12")
            .with_modifier(GeneticModifier {
                rs_id: "rs1805087".to_string(),
                gene_name: "MTR".to_string(),
                risk_allele: 'G',
                orientation: Strand::Plus,
                homozygous_effect: 0.75,
                heterozygous_effect: 0.88,
                description: "A2756G reduced-activity variant".to_string(),
            }),
        Enzyme::new("mat", "Methionine adenosyltransferase", 0.004, 0.05).with_ec("2.5.1.6"),
        Enzyme::new("mt", "SAM-dependent methyltransferases", 0.0035, 0.02).with_ec("2.1.1.-"),
        Enzyme::new("ahcy", "S-adenosylhomocysteine hydrolase", 0.004, 0.02).with_ec("3.3.1.1"),
        Enzyme::new("cbs", "Cystathionine beta-synthase", 0.0015, 0.05)
            .with_ec("4.2.1.22")
            .with_cofactor("B6"),
        Enzyme::new("cth_sink", "Cystathionine catabolism", 0.01, 0.5).with_ec("4.4.1.1"),
        Enzyme::new("met_intake", "Dietary methionine supply", 0.00008, 1.0),
    ]
}

/// The methylation pathway over the shared enzyme table.
pub fn pathway(enzymes: &EnzymeTable) -> ModelResult<Pathway> {
    let metabolites = vec![
        // Folate species (mM); intracellular folate pools are low-micromolar
        // (Ducker 2017), scaled up here for numerical headroom
        Metabolite::new("thf", "Tetrahydrofolate", 0.05, "cytosol"),
        Metabolite::new("methylene_thf", "5,10-Methylene-THF", 0.05, "cytosol"),
        Metabolite::new("methyl_thf", "5-Methyl-THF", 0.02, "cytosol"),
        // Methionine cycle (mM)
        Metabolite::new("met", "Methionine", 0.03, "cytosol"),
        Metabolite::new("sam", "S-adenosylmethionine", 0.08, "cytosol"),
        Metabolite::new("sah", "S-adenosylhomocysteine", 0.02, "cytosol"),
        Metabolite::new("hcy", "Homocysteine", 0.01, "cytosol"),
        // Transsulfuration
        Metabolite::new("cystathionine", "Cystathionine", 0.01, "cytosol"),
    ];

    let participant = ReactionParticipant::new;
    let reactions = vec![
        Reaction::new(
            "shmt_loading",
            "THF one-carbon loading",
            "shmt",
            vec![participant("thf", 1)],
            vec![participant("methylene_thf", 1)],
            KineticsKind::MichaelisMenten,
        ),
        // SAM feedback-inhibits MTHFR (Jencks & Mathews 1986)
        Reaction::new(
            "mthfr_reduction",
            "Methylene-THF reduction",
            "mthfr",
            vec![participant("methylene_thf", 1)],
            vec![participant("methyl_thf", 1)],
            KineticsKind::CompetitiveInhibition,
        )
        .with_inhibitor("sam", 0.5),
        Reaction::new(
            "ms_remethylation",
            "Homocysteine remethylation",
            "ms",
            vec![participant("hcy", 1), participant("methyl_thf", 1)],
            vec![participant("met", 1), participant("thf", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "mat_activation",
            "Methionine activation to SAM",
            "mat",
            vec![participant("met", 1)],
            vec![participant("sam", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "methyl_transfer",
            "SAM-dependent methyl transfer",
            "mt",
            vec![participant("sam", 1)],
            vec![participant("sah", 1)],
            KineticsKind::NonCompetitiveInhibition,
        )
        .with_inhibitor("sah", 0.1),
        Reaction::new(
            "ahcy_hydrolysis",
            "SAH hydrolysis",
            "ahcy",
            vec![participant("sah", 1)],
            vec![participant("hcy", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "cbs_transsulfuration",
            "Homocysteine to cystathionine",
            "cbs",
            vec![participant("hcy", 1)],
            vec![participant("cystathionine", 1)],
            KineticsKind::Allosteric,
        )
        .with_activator("sam", 0.2)
        .with_hill(2.0),
        Reaction::new(
            "cystathionine_catabolism",
            "Cystathionine clearance",
            "cth_sink",
            vec![participant("cystathionine", 1)],
            vec![],
            KineticsKind::MassAction,
        ),
        // Constant dietary supply keeps the cycle fed between meals
        Reaction::new(
            "dietary_met",
            "Dietary methionine intake",
            "met_intake",
            vec![],
            vec![participant("met", 1)],
            KineticsKind::MassAction,
        ),
    ];

    Pathway::build(
        "methylation",
        "Methylation cycle",
        "Folate cycle, methionine cycle, and transsulfuration",
        metabolites,
        reactions,
        enzymes,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathway::compiled::CompiledSystem;

    fn build() -> (Pathway, EnzymeTable) {
        let table = EnzymeTable::build(enzymes()).unwrap();
        let pathway = pathway(&table).unwrap();
        (pathway, table)
    }

    #[test]
    fn test_pathway_builds() {
        let (pathway, _) = build();
        assert_eq!(pathway.id, "methylation");
        assert!(pathway.metabolite("methyl_thf").is_some());
        assert!(pathway.metabolite("hcy").is_some());
        assert!(pathway.metabolite("sam").is_some());
    }

    #[test]
    fn test_mthfr_carries_c677t_modifier() {
        let (_, table) = build();
        let mthfr = table.get("mthfr").unwrap();
        assert_eq!(mthfr.genetic_modifiers.len(), 1);
        let modifier = &mthfr.genetic_modifiers[0];
        assert_eq!(modifier.rs_id, "rs1801133");
        assert_eq!(modifier.orientation, Strand::Minus);
        assert!((modifier.homozygous_effect - 0.30).abs() < 1e-12);
    }

    #[test]
    fn test_methyl_thf_accumulates_at_baseline() {
        let (pathway, table) = build();
        let system = CompiledSystem::compile(&pathway, &table).unwrap();
        let y = system.initial_state();
        let mut dydt = vec![0.0; system.species_count()];
        system.derivatives(&y, &mut dydt);
        // At initial concentrations MTHFR production outpaces MS drain
        let i = system.index_of("methyl_thf").unwrap();
        assert!(dydt[i] > 0.0);
    }

    #[test]
    fn test_folate_pool_is_closed() {
        let (pathway, table) = build();
        let system = CompiledSystem::compile(&pathway, &table).unwrap();
        let y = system.initial_state();
        let mut dydt = vec![0.0; system.species_count()];
        system.derivatives(&y, &mut dydt);
        // THF + methylene-THF + methyl-THF is conserved by the cycle
        let total: f64 = ["thf", "methylene_thf", "methyl_thf"]
            .iter()
            .map(|id| dydt[system.index_of(id).unwrap()])
            .sum();
        assert!(total.abs() < 1e-12);
    }
}
