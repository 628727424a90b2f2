//! Configuration loading for enzymes, pathways, and run settings.
//!
//! Two JSON documents describe the network (an enzymes file and a pathways
//! file); a third holds run settings (duration, timestep, output interval,
//! genetic profile reference, supplements). Canonical key spelling is
//! camelCase; PascalCase spellings are accepted through serde aliases.
//!
//! Failure semantics follow the error taxonomy: network documents are
//! validated fatally (unknown enzyme or metabolite references, duplicate
//! ids, invalid kinetics kinds abort with the offending identifier), while
//! the settings file falls back to defaults with a logged warning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::pathway::{Enzyme, EnzymeTable, Pathway};
use crate::profile::Supplement;

/// Kinetics kind strings accepted in reaction declarations.
const KNOWN_KINETICS: [&str; 5] = [
    "MichaelisMenten",
    "CompetitiveInhibition",
    "NonCompetitiveInhibition",
    "Allosteric",
    "MassAction",
];

/// Parse the enzymes document (a JSON array of enzyme objects) into a
/// validated table.
pub fn parse_enzymes(text: &str) -> ModelResult<EnzymeTable> {
    let enzymes: Vec<Enzyme> = serde_json::from_str(text)?;
    EnzymeTable::build(enzymes)
}

/// Load the enzymes file; fatal on I/O, JSON, or validation errors.
pub fn load_enzymes<P: AsRef<Path>>(path: P) -> ModelResult<EnzymeTable> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let table = parse_enzymes(&text)?;
    log::info!(
        "loaded {} enzymes from {:?}",
        table.len(),
        path.as_ref()
    );
    Ok(table)
}

/// Parse the pathways document (a JSON array of pathway objects) and
/// validate each network against the enzyme table.
pub fn parse_pathways(text: &str, enzymes: &EnzymeTable) -> ModelResult<Vec<Pathway>> {
    // Pre-pass over the raw document so a bad kinetics string surfaces as
    // InvalidKinetics with the reaction id, not as an opaque JSON error.
    let raw: serde_json::Value = serde_json::from_str(text)?;
    if let Some(pathways) = raw.as_array() {
        for pathway in pathways {
            let reactions = pathway
                .get("reactions")
                .or_else(|| pathway.get("Reactions"))
                .and_then(|r| r.as_array());
            for reaction in reactions.into_iter().flatten() {
                let kind = reaction
                    .get("kinetics")
                    .or_else(|| reaction.get("Kinetics"))
                    .and_then(|k| k.as_str())
                    .unwrap_or("");
                if !KNOWN_KINETICS.contains(&kind) {
                    let id = reaction
                        .get("id")
                        .or_else(|| reaction.get("Id"))
                        .and_then(|i| i.as_str())
                        .unwrap_or("<unnamed>");
                    return Err(ModelError::InvalidKinetics {
                        reaction: id.to_string(),
                        kind: kind.to_string(),
                    });
                }
            }
        }
    }

    let declared: Vec<Pathway> = serde_json::from_value(raw)?;
    declared
        .into_iter()
        .map(|p| {
            let Pathway {
                id,
                name,
                description,
                metabolites,
                reactions,
            } = p;
            Pathway::build(&id, &name, &description, metabolites, reactions, enzymes)
        })
        .collect()
}

/// Load the pathways file; fatal on I/O, JSON, or validation errors.
pub fn load_pathways<P: AsRef<Path>>(path: P, enzymes: &EnzymeTable) -> ModelResult<Vec<Pathway>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let pathways = parse_pathways(&text, enzymes)?;
    log::info!(
        "loaded {} pathways from {:?}",
        pathways.len(),
        path.as_ref()
    );
    Ok(pathways)
}

/// Run settings: duration, stepping, output cadence, genetics reference,
/// and supplement interventions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSettings {
    /// Total integration duration (seconds).
    #[serde(rename = "duration", alias = "Duration")]
    pub duration_sec: f64,
    /// RK4 substep size (seconds).
    #[serde(rename = "timeStep", alias = "TimeStep")]
    pub time_step_sec: f64,
    /// Snapshot emission interval (seconds).
    #[serde(rename = "outputInterval", alias = "OutputInterval")]
    pub output_interval_sec: f64,
    /// Path to a raw-genome file; absent means no genetic personalization.
    #[serde(alias = "GeneticProfile", default)]
    pub genetic_profile: Option<PathBuf>,
    /// Supplement interventions applied before the run.
    #[serde(alias = "Supplements", default)]
    pub supplements: Vec<Supplement>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            duration_sec: 60.0,
            time_step_sec: 0.01,
            output_interval_sec: 1.0,
            genetic_profile: None,
            supplements: Vec::new(),
        }
    }
}

impl SimulationSettings {
    /// Load settings from JSON, falling back to defaults with a logged
    /// warning when the file is missing or malformed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => {
                    log::info!("loaded simulation settings from {:?}", path.as_ref());
                    settings
                }
                Err(e) => {
                    log::warn!("failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("settings file not found, using defaults");
                Self::default()
            }
        }
    }
}
