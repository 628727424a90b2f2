//! End-to-end simulation scenarios.
//!
//! Each test pins a quantitative expectation for a full pipeline run:
//! pathway construction, personalization, integration, and snapshot
//! emission.

use metabolic_twin::kinetics::{self, KineticsKind};
use metabolic_twin::pathway::compiled::CompiledSystem;
use metabolic_twin::pathway::{
    Enzyme, EnzymeTable, Metabolite, Pathway, Reaction, ReactionParticipant,
};
use metabolic_twin::pathways::{self, methylation};
use metabolic_twin::profile::{self, Supplement, SupplementType};
use metabolic_twin::sim::{DriverConfig, Schedule, SimulationDriver};
use metabolic_twin::GeneticProfile;

fn methylation_driver(
    genetics: Option<&GeneticProfile>,
    supplements: &[Supplement],
    output_interval_sec: f64,
) -> SimulationDriver {
    let table = EnzymeTable::build(methylation::enzymes()).unwrap();
    let pathway = methylation::pathway(&table).unwrap();

    let table = match genetics {
        Some(g) => profile::apply_genetics(&table, g),
        None => table,
    };
    let (pathway, table) = profile::apply_supplements(&pathway, &table, supplements);

    let system = CompiledSystem::compile(&pathway, &table).unwrap();
    SimulationDriver::new(
        system,
        Schedule::default(),
        DriverConfig {
            dt_sec: 0.01,
            output_interval_sec,
            ..DriverConfig::default()
        },
    )
}

fn mthfr_tt_profile() -> GeneticProfile {
    // Raw file reports rs1801133 on the minus strand; TT complements to AA,
    // two copies of the declared plus-strand risk allele
    GeneticProfile::from_genotypes(vec![("rs1801133".to_string(), "TT".to_string())])
}

#[test]
fn test_methylation_baseline() {
    let mut driver = methylation_driver(None, &[], 10.0);
    driver.run_for(30.0);

    let samples = driver.trajectory().samples();
    assert_eq!(samples.len(), 4, "expected snapshots at t = 0, 10, 20, 30");
    for (snapshot, expected_t) in samples.iter().zip([0.0, 10.0, 20.0, 30.0]) {
        assert!(
            (snapshot.time_s - expected_t).abs() < 0.15,
            "snapshot at {} expected near {}",
            snapshot.time_s,
            expected_t
        );
        for key in ["hcy", "methyl_thf", "sam"] {
            let value = snapshot
                .concentration(key)
                .unwrap_or_else(|| panic!("snapshot missing '{}'", key));
            assert!(value > 0.0, "'{}' not positive at t = {}", key, snapshot.time_s);
        }
    }
}

#[test]
fn test_mthfr_tt_reduces_methyl_thf() {
    let mut baseline = methylation_driver(None, &[], 60.0);
    baseline.run_for(60.0);
    let baseline_final = baseline
        .trajectory()
        .latest()
        .unwrap()
        .concentration("methyl_thf")
        .unwrap();

    let genetics = mthfr_tt_profile();
    let mut variant = methylation_driver(Some(&genetics), &[], 60.0);
    variant.run_for(60.0);
    let variant_final = variant
        .trajectory()
        .latest()
        .unwrap()
        .concentration("methyl_thf")
        .unwrap();

    assert!(
        variant_final < baseline_final,
        "TT homozygote should end with less 5-MTHF: {} vs {}",
        variant_final,
        baseline_final
    );
}

#[test]
fn test_methylfolate_supplement_rescues() {
    let genetics = mthfr_tt_profile();

    let mut unsupplemented = methylation_driver(Some(&genetics), &[], 60.0);
    unsupplemented.run_for(60.0);
    let unsupplemented_final = unsupplemented
        .trajectory()
        .latest()
        .unwrap()
        .concentration("methyl_thf")
        .unwrap();

    let supplement = Supplement {
        id: "methylfolate".to_string(),
        name: "L-methylfolate".to_string(),
        supplement_type: SupplementType::SubstrateIncrease,
        target_id: "methyl_thf".to_string(),
        effect_magnitude: 0.1,
        mechanism: "bypasses MTHFR".to_string(),
    };
    let mut supplemented = methylation_driver(Some(&genetics), &[supplement], 60.0);
    supplemented.run_for(60.0);
    let supplemented_final = supplemented
        .trajectory()
        .latest()
        .unwrap()
        .concentration("methyl_thf")
        .unwrap();

    assert!(
        supplemented_final > unsupplemented_final,
        "supplement should raise final 5-MTHF: {} vs {}",
        supplemented_final,
        unsupplemented_final
    );
}

#[test]
fn test_krebs_nadh_turnover() {
    let table = EnzymeTable::build(pathways::krebs::enzymes()).unwrap();
    let pathway = pathways::krebs::pathway(&table).unwrap();
    let system = CompiledSystem::compile(&pathway, &table).unwrap();
    let initial_nadh = system.initial_state()[system.index_of("nadh").unwrap()];

    let mut driver = SimulationDriver::new(
        system,
        Schedule::default(),
        DriverConfig {
            output_interval_sec: 30.0,
            ..DriverConfig::default()
        },
    );
    driver.run_for(30.0);
    let final_nadh = driver
        .trajectory()
        .latest()
        .unwrap()
        .concentration("nadh")
        .unwrap();

    assert!(
        (final_nadh - initial_nadh).abs() > 1e-4,
        "cycle should turn NADH over: {} vs {}",
        final_nadh,
        initial_nadh
    );
}

#[test]
fn test_rate_at_km_is_half_vmax() {
    let rate = kinetics::michaelis_menten(1.0, 0.1, 0.1);
    assert!((rate - 0.5).abs() < 1e-9);
}

#[test]
fn test_activity_modifier_scales_inhibited_rate() {
    let enzymes = EnzymeTable::build(vec![Enzyme::new("e", "Test enzyme", 1.0, 0.1)]).unwrap();
    let pathway = Pathway::build(
        "p",
        "Single reaction",
        "",
        vec![
            Metabolite::new("s", "Substrate", 0.1, "cytosol"),
            Metabolite::new("i", "Inhibitor", 0.1, "cytosol"),
            Metabolite::new("p", "Product", 0.0, "cytosol"),
        ],
        vec![Reaction::new(
            "r",
            "Inhibited conversion",
            "e",
            vec![ReactionParticipant::new("s", 1)],
            vec![ReactionParticipant::new("p", 1)],
            KineticsKind::CompetitiveInhibition,
        )
        .with_inhibitor("i", 0.1)],
        &enzymes,
    )
    .unwrap();

    let mut system = CompiledSystem::compile(&pathway, &enzymes).unwrap();
    let y = system.initial_state();

    let full_activity = system.fluxes(&y)[0].1;
    system.set_activity("e", 0.3);
    let reduced_activity = system.fluxes(&y)[0].1;

    let ratio = reduced_activity / full_activity;
    assert!(
        (ratio - 0.30).abs() < 1e-2,
        "activity scaling should carry through the rate law: {}",
        ratio
    );
}
