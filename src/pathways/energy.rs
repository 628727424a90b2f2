//! Whole-body energy metabolism: blood glucose, adenine nucleotides,
//! fat mobilization, and the hormonal/store species the daily-rhythm
//! driver manages.
//!
//! Glycolysis and oxidative phosphorylation are lumped into single
//! reactions; the interesting dynamics here are the couplings the driver
//! and homeostatic clamp act on (meals raise glucose and insulin, exercise
//! drains ATP, fasting mobilizes fat, glycogen buffers glucose).
//!
//! Store species (`glycogen_liver`, `adipose_store`, `amino_acid_pool`)
//! are carried in the same state vector with gram units and a `store`
//! compartment label; only the homeostatic clamp and meal absorption move
//! them.
//!
//! References:
//! - Frayn KN. Metabolic Regulation: A Human Perspective. 3rd ed. 2010
//! - Wasserman DH. Am J Physiol. 2009;296:E11-E21 (glucose fluxes)

use crate::error::ModelResult;
use crate::kinetics::KineticsKind;
use crate::pathway::{Enzyme, EnzymeTable, Metabolite, Pathway, Reaction, ReactionParticipant};

/// Enzymes of the lumped energy network.
pub fn enzymes() -> Vec<Enzyme> {
    vec![
        Enzyme::new("glycolysis", "Glycolysis (lumped)", 0.006, 1.0).with_ec("2.7.1.1"),
        Enzyme::new("ox_phos", "Oxidative phosphorylation (lumped)", 0.02, 0.3)
            .with_ec("7.1.1.2"),
        Enzyme::new("atpase_load", "Basal ATP demand", 0.004, 1.0).with_ec("3.6.1.-"),
        Enzyme::new("adk", "Adenylate kinase", 0.002, 0.3).with_ec("2.7.4.3"),
        Enzyme::new("fa_oxidation", "Beta-oxidation (lumped)", 0.002, 0.2),
        Enzyme::new("ros_leak", "Mitochondrial ROS leak", 0.0001, 1.0),
        Enzyme::new("gpx", "Glutathione peroxidase (lumped)", 0.004, 0.01)
            .with_ec("1.11.1.9"),
        Enzyme::new("gsh_synthesis", "Glutathione synthesis", 0.0003, 1.0).with_ec("6.3.2.3"),
        Enzyme::new("adenosine_clearance", "Adenosine deaminase", 0.003, 0.5).with_ec("3.5.4.4"),
    ]
}

/// The energy pathway over the shared enzyme table.
pub fn pathway(enzymes: &EnzymeTable) -> ModelResult<Pathway> {
    let metabolites = vec![
        // Blood compartment (mM); fasting glucose 4.5-5.3
        Metabolite::new("glucose_blood", "Blood glucose", 5.0, "blood"),
        Metabolite::new("fatty_acids_blood", "Free fatty acids", 0.4, "blood"),
        Metabolite::new("insulin", "Insulin", 1.0, "blood"),
        Metabolite::new("cortisol", "Cortisol", 0.4, "blood"),
        Metabolite::new("melatonin", "Melatonin", 0.1, "blood"),
        Metabolite::new("adenosine", "Adenosine", 0.3, "brain"),
        Metabolite::new("o2", "Dissolved oxygen", 0.13, "blood"),
        // Adenine nucleotides (mM); cellular ATP 4-6
        Metabolite::new("atp", "ATP", 4.5, "cytosol"),
        Metabolite::new("adp", "ADP", 1.0, "cytosol"),
        Metabolite::new("amp", "AMP", 0.1, "cytosol"),
        // Signaling proxies (arbitrary mM-scaled activity levels)
        Metabolite::new("ampk", "AMPK activity", 0.1, "cytosol"),
        Metabolite::new("mtor", "mTOR activity", 0.5, "cytosol"),
        // Redox
        Metabolite::new("ros", "Reactive oxygen species", 0.01, "cytosol"),
        Metabolite::new("gsh", "Glutathione (reduced)", 2.0, "cytosol"),
        // Shared with the TCA module
        Metabolite::new("pyruvate", "Pyruvate", 0.1, "mitochondria"),
        Metabolite::new("acetyl_coa", "Acetyl-CoA", 0.1, "mitochondria"),
        // Stores (grams, managed by clamp and meal absorption)
        Metabolite::new("glycogen_liver", "Hepatic glycogen", 80.0, "store"),
        Metabolite::new("adipose_store", "Adipose triglyceride", 10000.0, "store"),
        Metabolite::new("amino_acid_pool", "Free amino acid pool", 100.0, "store"),
    ];

    let participant = ReactionParticipant::new;
    let reactions = vec![
        // Insulin-activated glucose disposal into pyruvate, net 2 ATP
        Reaction::new(
            "glycolysis_lumped",
            "Glycolysis",
            "glycolysis",
            vec![participant("glucose_blood", 1), participant("adp", 2)],
            vec![participant("pyruvate", 2), participant("atp", 2)],
            KineticsKind::MichaelisMenten,
        )
        .with_activator("insulin", 2.0),
        Reaction::new(
            "ox_phos_lumped",
            "Oxidative phosphorylation",
            "ox_phos",
            vec![participant("adp", 1), participant("o2", 1)],
            vec![participant("atp", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "basal_atp_demand",
            "Basal ATP consumption",
            "atpase_load",
            vec![participant("atp", 1)],
            vec![participant("adp", 1)],
            KineticsKind::MassAction,
        ),
        // 2 ADP <-> ATP + AMP, forward direction only (AMP drain)
        Reaction::new(
            "adenylate_kinase",
            "Adenylate kinase",
            "adk",
            vec![participant("amp", 1), participant("atp", 1)],
            vec![participant("adp", 2)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "beta_oxidation",
            "Fatty acid oxidation",
            "fa_oxidation",
            vec![participant("fatty_acids_blood", 1)],
            vec![participant("acetyl_coa", 2)],
            KineticsKind::MichaelisMenten,
        )
        .with_activator("ampk", 0.2),
        Reaction::new(
            "ros_generation",
            "Electron-transport ROS leak",
            "ros_leak",
            vec![participant("o2", 1)],
            vec![participant("ros", 1)],
            KineticsKind::MassAction,
        ),
        Reaction::new(
            "ros_detox",
            "Peroxide detoxification",
            "gpx",
            vec![participant("ros", 1), participant("gsh", 1)],
            vec![],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "gsh_replenishment",
            "Glutathione synthesis",
            "gsh_synthesis",
            vec![],
            vec![participant("gsh", 1)],
            KineticsKind::MassAction,
        ),
        Reaction::new(
            "adenosine_breakdown",
            "Adenosine clearance",
            "adenosine_clearance",
            vec![participant("adenosine", 1)],
            vec![],
            KineticsKind::MichaelisMenten,
        ),
    ];

    Pathway::build(
        "energy",
        "Energy metabolism",
        "Lumped glucose, adenine nucleotide, and fat handling",
        metabolites,
        reactions,
        enzymes,
    )
}
