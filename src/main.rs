//! Metabolic Twin - batch simulation runner.
//!
//! Loads the network (built-in whole-body pathway, or enzymes/pathways
//! JSON files from a data directory), applies profile and genetic
//! personalization, runs the driver for the configured duration, and
//! exports the trajectory to CSV.
//!
//! Usage: `metabolic-twin [data_dir]`
//!
//! Recognized files under `data_dir` (all optional):
//! - `enzymes.json`, `pathways.json` - network definition (fatal if
//!   present but invalid)
//! - `settings.json` - duration/timestep/output interval/supplements
//! - `profile.json` - user demographics, sleep, and lab overrides
//! - `schedule.json` - daily events
//! - `genome.txt` - raw SNP export (or the path named in settings)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use metabolic_twin::pathway::compiled::CompiledSystem;
use metabolic_twin::{
    config, export::CsvExporter, pathways, profile, DriverConfig, GeneticProfile, Pathway,
    Schedule, SimulationDriver, SimulationSettings, UserProfile,
};

fn load_user_profile(path: &Path) -> UserProfile {
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(profile) => {
                log::info!("loaded user profile from {:?}", path);
                profile
            }
            Err(e) => {
                log::warn!("failed to parse user profile: {}, using neutral profile", e);
                UserProfile::default()
            }
        },
        Err(_) => {
            log::info!("no user profile file, using neutral profile");
            UserProfile::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Metabolic Twin starting...");

    let data_dir = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("data"), PathBuf::from);

    let settings = SimulationSettings::load_or_default(data_dir.join("settings.json"));
    let user = load_user_profile(&data_dir.join("profile.json"));
    let schedule = Schedule::load_or_empty(data_dir.join("schedule.json"));

    // Network: JSON definition when present, built-in whole-body otherwise
    let enzymes_path = data_dir.join("enzymes.json");
    let (pathway, enzymes) = if enzymes_path.exists() {
        let enzymes = config::load_enzymes(&enzymes_path).context("loading enzymes")?;
        let pathways = config::load_pathways(data_dir.join("pathways.json"), &enzymes)
            .context("loading pathways")?;
        let refs: Vec<&Pathway> = pathways.iter().collect();
        let merged = Pathway::merge("whole_body", "Whole-body metabolism", &refs);
        (merged, enzymes)
    } else {
        log::info!("no network files found, using built-in whole-body pathway");
        let enzymes = pathways::standard_enzymes().context("building standard enzymes")?;
        let pathway = pathways::whole_body(&enzymes).context("building whole-body pathway")?;
        (pathway, enzymes)
    };

    // Personalization: profile, then genetics, then supplements
    let (pathway, enzymes) = profile::apply_profile(&pathway, &enzymes, &user);
    let genetics = match &settings.genetic_profile {
        Some(path) => GeneticProfile::load_or_empty(path),
        None => GeneticProfile::load_or_empty(data_dir.join("genome.txt")),
    };
    let enzymes = profile::apply_genetics(&enzymes, &genetics);
    let (pathway, enzymes) = profile::apply_supplements(&pathway, &enzymes, &settings.supplements);

    let system = CompiledSystem::compile(&pathway, &enzymes).context("compiling pathway")?;
    log::info!(
        "compiled system: {} species, {} reactions",
        system.species_count(),
        system.reaction_count()
    );
    let species_ids: Vec<String> = system.species_ids().to_vec();

    let mut driver = SimulationDriver::new(
        system,
        schedule,
        DriverConfig {
            dt_sec: settings.time_step_sec,
            output_interval_sec: settings.output_interval_sec,
            ..DriverConfig::default()
        },
    );
    driver.run_for(settings.duration_sec);
    log::info!(
        "simulation complete: t = {:.1} s, {} snapshots",
        driver.time_sec(),
        driver.trajectory().len()
    );

    let mut exporter = CsvExporter::create_timestamped()?;
    exporter.export(&species_ids, driver.trajectory())?;
    let path = exporter.finish()?;
    println!("Trajectory written to {}", path.display());

    Ok(())
}
