//! NAD+ salvage pathway and electron-transport re-oxidation.
//!
//! Mammalian cells regenerate most of their NAD+ through the salvage
//! pathway: nicotinamide released by NAD+ consumers (CD38, sirtuins, PARPs)
//! is recycled via NAMPT and NMNAT. Complex I re-oxidizes NADH back to
//! NAD+ against the oxygen supply. NAMPT expression is circadian (the
//! driver scales its activity over the day) and CD38 rises with age (the
//! personalizer scales its Vmax).
//!
//! References:
//! - Ramsey KM et al. Science. 2009;324:651-654 (circadian NAMPT)
//! - Camacho-Pereira J et al. Cell Metab. 2016;23:1127-1139 (CD38/aging)
//! - Covarrubias AJ et al. Nat Rev Mol Cell Biol. 2021;22:119-141

use crate::error::ModelResult;
use crate::kinetics::KineticsKind;
use crate::pathway::{Enzyme, EnzymeTable, Metabolite, Pathway, Reaction, ReactionParticipant};

/// Enzymes of NAD+ salvage and re-oxidation.
pub fn enzymes() -> Vec<Enzyme> {
    vec![
        Enzyme::new("nampt", "Nicotinamide phosphoribosyltransferase", 0.003, 0.01)
            .with_ec("2.4.2.12")
            .with_cofactor("PRPP"),
        Enzyme::new("nmnat", "NMN adenylyltransferase", 0.006, 0.02).with_ec("2.7.7.1"),
        Enzyme::new("cd38", "CD38 NAD+ glycohydrolase", 0.001, 0.3).with_ec("3.2.2.6"),
        Enzyme::new("sirt1", "Sirtuin 1 deacetylase", 0.0008, 0.2).with_ec("2.3.1.286"),
        Enzyme::new("etc_complex1", "ETC complex I", 0.01, 0.1).with_ec("7.1.1.2"),
    ]
}

/// The salvage pathway over the shared enzyme table.
pub fn pathway(enzymes: &EnzymeTable) -> ModelResult<Pathway> {
    let metabolites = vec![
        Metabolite::new("nam", "Nicotinamide", 0.03, "cytosol"),
        Metabolite::new("nmn", "Nicotinamide mononucleotide", 0.005, "cytosol"),
        Metabolite::new("nad", "NAD+", 0.6, "mitochondria"),
        Metabolite::new("nadh", "NADH", 0.2, "mitochondria"),
        Metabolite::new("prpp", "Phosphoribosyl pyrophosphate", 0.1, "cytosol"),
        // Dissolved O2; arterial plasma ~0.13 mM (Henry's law at 100 mmHg)
        Metabolite::new("o2", "Dissolved oxygen", 0.13, "blood"),
    ];

    let participant = ReactionParticipant::new;
    let reactions = vec![
        Reaction::new(
            "nampt_salvage",
            "Nicotinamide salvage to NMN",
            "nampt",
            vec![participant("nam", 1), participant("prpp", 1)],
            vec![participant("nmn", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "nmnat_adenylylation",
            "NMN to NAD+",
            "nmnat",
            vec![participant("nmn", 1)],
            vec![participant("nad", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "cd38_consumption",
            "CD38 NAD+ hydrolysis",
            "cd38",
            vec![participant("nad", 1)],
            vec![participant("nam", 1)],
            KineticsKind::MichaelisMenten,
        ),
        Reaction::new(
            "sirtuin_consumption",
            "Sirtuin NAD+ consumption",
            "sirt1",
            vec![participant("nad", 1)],
            vec![participant("nam", 1)],
            KineticsKind::Allosteric,
        )
        .with_hill(1.5),
        Reaction::new(
            "complex1_reoxidation",
            "NADH re-oxidation at complex I",
            "etc_complex1",
            vec![participant("nadh", 1), participant("o2", 1)],
            vec![participant("nad", 1)],
            KineticsKind::MichaelisMenten,
        ),
    ];

    Pathway::build(
        "nad_salvage",
        "NAD+ salvage",
        "NAMPT/NMNAT salvage loop with CD38 and sirtuin consumption",
        metabolites,
        reactions,
        enzymes,
    )
}
