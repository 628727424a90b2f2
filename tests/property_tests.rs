//! Cross-cutting invariants and identity laws.
//!
//! Properties checked over full whole-body runs with an active schedule:
//! non-negativity, monotone snapshot time, id closure, determinism, clamp
//! idempotence, and the personalization identity laws.

use std::collections::HashSet;

use metabolic_twin::pathway::compiled::CompiledSystem;
use metabolic_twin::pathway::{Enzyme, EnzymeTable, GeneticModifier, Strand};
use metabolic_twin::pathways;
use metabolic_twin::profile::{self, UserProfile};
use metabolic_twin::sim::{DriverConfig, Schedule, SimulationDriver};
use metabolic_twin::GeneticProfile;

const SCHEDULE_JSON: &str = r#"{
    "wakeTime": "07:00",
    "sleepTime": "23:00",
    "events": [
        { "time": "07:05", "type": "Meal", "description": "breakfast",
          "payload": { "glucoseLoad": 50, "proteinLoad": 25, "fatLoad": 15 } },
        { "time": "07:20", "type": "Exercise", "description": "morning run",
          "payload": { "intensity": "Medium", "durationMinutes": 30 } },
        { "time": "08:00", "type": "Stressor", "description": "commute",
          "payload": { "severity": 1.5 } }
    ]
}"#;

/// Whole-body driver that crosses meal, exercise, and stressor events
/// inside a short run (day compressed via the batch minute advance).
fn whole_body_driver() -> SimulationDriver {
    let enzymes = pathways::standard_enzymes().unwrap();
    let pathway = pathways::whole_body(&enzymes).unwrap();
    let system = CompiledSystem::compile(&pathway, &enzymes).unwrap();
    SimulationDriver::new(
        system,
        Schedule::from_json(SCHEDULE_JSON),
        DriverConfig {
            output_interval_sec: 2.0,
            ..DriverConfig::default()
        },
    )
}

#[test]
fn test_p1_nonnegativity_and_finiteness() {
    let mut driver = whole_body_driver();
    driver.run_for(30.0);
    for snapshot in driver.trajectory().samples() {
        for (id, &value) in &snapshot.concentrations {
            assert!(value >= 0.0, "'{}' negative at t = {}", id, snapshot.time_s);
            assert!(value.is_finite(), "'{}' non-finite at t = {}", id, snapshot.time_s);
        }
    }
}

#[test]
fn test_p2_monotone_snapshot_time() {
    let mut driver = whole_body_driver();
    driver.run_for(20.0);
    let samples = driver.trajectory().samples();
    assert!(samples.len() > 2);
    for pair in samples.windows(2) {
        assert!(pair[1].time_s > pair[0].time_s);
    }
}

#[test]
fn test_p3_id_closure() {
    let enzymes = pathways::standard_enzymes().unwrap();
    let pathway = pathways::whole_body(&enzymes).unwrap();
    let declared: HashSet<&str> = pathway.metabolites.iter().map(|m| m.id.as_str()).collect();

    let system = CompiledSystem::compile(&pathway, &enzymes).unwrap();
    let mut driver = SimulationDriver::new(system, Schedule::default(), DriverConfig::default());
    driver.run_for(5.0);

    for snapshot in driver.trajectory().samples() {
        for id in snapshot.concentrations.keys() {
            assert!(declared.contains(id.as_str()), "undeclared key '{}'", id);
        }
    }
}

#[test]
fn test_p4_determinism() {
    let run = || {
        let mut driver = whole_body_driver();
        driver.run_for(10.0);
        driver
            .trajectory()
            .samples()
            .iter()
            .flat_map(|s| {
                let mut pairs: Vec<(String, u64)> = s
                    .concentrations
                    .iter()
                    .map(|(id, v)| (id.clone(), v.to_bits()))
                    .collect();
                pairs.sort();
                pairs
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_p6_genetic_multiplication() {
    let modifier = |rs: &str, homozygous: f64| GeneticModifier {
        rs_id: rs.to_string(),
        gene_name: "GENE".to_string(),
        risk_allele: 'T',
        orientation: Strand::Plus,
        homozygous_effect: homozygous,
        heterozygous_effect: (1.0 + homozygous) / 2.0,
        description: String::new(),
    };
    let enzymes = EnzymeTable::build(vec![Enzyme::new("e", "Enzyme", 1.0, 0.1)
        .with_modifier(modifier("rs1", 0.5))
        .with_modifier(modifier("rs2", 0.8))
        .with_modifier(modifier("rs3", 1.4))])
    .unwrap();

    let genetics = GeneticProfile::from_genotypes(vec![
        ("rs1".to_string(), "TT".to_string()),
        ("rs2".to_string(), "CT".to_string()),
        ("rs3".to_string(), "TT".to_string()),
    ]);
    let scaled = profile::apply_genetics(&enzymes, &genetics);

    // 0.5 (hom) * 0.9 (het) * 1.4 (hom)
    let expected = 0.5 * 0.9 * 1.4;
    assert!((scaled.get("e").unwrap().vmax_mM_per_sec - expected).abs() < 1e-12);
}

#[test]
fn test_l1_pathway_json_round_trip() {
    let enzymes = pathways::standard_enzymes().unwrap();
    let pathway = pathways::whole_body(&enzymes).unwrap();

    let json = serde_json::to_string(&pathway).unwrap();
    let reparsed: metabolic_twin::Pathway = serde_json::from_str(&json).unwrap();

    assert_eq!(reparsed.id, pathway.id);
    assert_eq!(reparsed.metabolites.len(), pathway.metabolites.len());
    assert_eq!(reparsed.reactions.len(), pathway.reactions.len());
    for (a, b) in pathway.metabolites.iter().zip(&reparsed.metabolites) {
        assert_eq!(a.id, b.id);
        assert!((a.initial_concentration_mM - b.initial_concentration_mM).abs() < 1e-12);
    }
    for (a, b) in pathway.reactions.iter().zip(&reparsed.reactions) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.enzyme_id, b.enzyme_id);
        assert_eq!(a.kinetics, b.kinetics);
        assert_eq!(a.substrates.len(), b.substrates.len());
    }
}

#[test]
fn test_l2_neutral_profile_is_identity() {
    let enzymes = pathways::standard_enzymes().unwrap();
    let pathway = pathways::whole_body(&enzymes).unwrap();
    let (p2, e2) = profile::apply_profile(&pathway, &enzymes, &UserProfile::default());

    for (a, b) in pathway.metabolites.iter().zip(&p2.metabolites) {
        assert!(
            (a.initial_concentration_mM - b.initial_concentration_mM).abs() < 1e-12,
            "metabolite '{}' changed under neutral profile",
            a.id
        );
    }
    for (a, b) in enzymes.enzymes().iter().zip(e2.enzymes()) {
        assert!(
            (a.vmax_mM_per_sec - b.vmax_mM_per_sec).abs() < 1e-12,
            "enzyme '{}' changed under neutral profile",
            a.id
        );
    }
}

#[test]
fn test_l3_empty_genotype_map_is_identity() {
    let enzymes = pathways::standard_enzymes().unwrap();
    let scaled = profile::apply_genetics(&enzymes, &GeneticProfile::empty());
    for (a, b) in enzymes.enzymes().iter().zip(scaled.enzymes()) {
        assert!((a.vmax_mM_per_sec - b.vmax_mM_per_sec).abs() < 1e-12);
    }
}

#[test]
fn test_clamp_rules_toggle_for_pure_network() {
    // With every correction disabled the pure network drains oxygen;
    // with the clamp active, resupply holds it near the setpoint
    let run = |disable_clamp: bool| {
        let mut driver = whole_body_driver();
        if disable_clamp {
            driver.clamp_mut().disable_all();
        }
        driver.run_for(10.0);
        driver
            .trajectory()
            .latest()
            .unwrap()
            .concentration("o2")
            .unwrap()
    };
    let clamped = run(false);
    let pure = run(true);
    assert!(
        (clamped - pure).abs() > 1e-6,
        "clamp should hold O2 up: {} vs {}",
        clamped,
        pure
    );
    assert!(clamped > pure);
}

#[test]
fn test_schedule_events_perturb_trajectory() {
    // The same network run with and without the schedule must diverge
    // (meal glucose, exercise ATP drain)
    let enzymes = pathways::standard_enzymes().unwrap();
    let pathway = pathways::whole_body(&enzymes).unwrap();

    let run = |schedule: Schedule| {
        let system = CompiledSystem::compile(&pathway, &enzymes).unwrap();
        let mut driver = SimulationDriver::new(
            system,
            schedule,
            DriverConfig {
                output_interval_sec: 5.0,
                // Compress the day hard so the 07:05 meal lands inside the run
                dt_sec: 0.01,
                substeps_per_tick: 10,
                sim_minutes_per_real_second: 24.0,
                start_minute_of_day: 7.0 * 60.0,
                capture_fluxes: false,
            },
        );
        // Drive the sim clock manually across the meal and exercise window
        for minute in 421..=480 {
            driver.tick_manual(f64::from(minute));
        }
        driver
            .trajectory()
            .latest()
            .unwrap()
            .concentration("insulin")
            .unwrap()
    };

    let with_events = run(Schedule::from_json(SCHEDULE_JSON));
    let without_events = run(Schedule::default());
    assert!(
        (with_events - without_events).abs() > 1e-6,
        "schedule should perturb insulin: {} vs {}",
        with_events,
        without_events
    );
}
