//! CSV time-series export for concentration trajectories.
//!
//! Column layout: `Time,<metaboliteId>,<metaboliteId>,...` with columns in
//! pathway declaration order and rows in ascending time. Numeric fields are
//! printed with six fractional digits; metabolites missing from a snapshot
//! are written as 0.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::state::Trajectory;

/// CSV exporter for sampled trajectories.
pub struct CsvExporter {
    writer: csv::Writer<File>,
    /// Path to the output file.
    path: PathBuf,
}

impl CsvExporter {
    /// Create an exporter writing to a specific path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = csv::Writer::from_writer(File::create(&path)?);
        log::info!("CSV export started: {}", path.display());
        Ok(Self { writer, path })
    }

    /// Create an exporter in `exports/` with a timestamped filename.
    pub fn create_timestamped() -> Result<Self> {
        let dir = PathBuf::from("exports");
        std::fs::create_dir_all(&dir)?;
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        Self::create(dir.join(format!("trajectory_{}.csv", timestamp)))
    }

    /// Write a full trajectory with columns in `species_ids` order.
    pub fn export(&mut self, species_ids: &[String], trajectory: &Trajectory) -> Result<()> {
        let mut header = Vec::with_capacity(species_ids.len() + 1);
        header.push("Time".to_string());
        header.extend(species_ids.iter().cloned());
        self.writer.write_record(&header)?;

        for snapshot in trajectory.samples() {
            let mut row = Vec::with_capacity(species_ids.len() + 1);
            row.push(format!("{:.6}", snapshot.time_s));
            for id in species_ids {
                row.push(format!("{:.6}", snapshot.concentration(id).unwrap_or(0.0)));
            }
            self.writer.write_record(&row)?;
        }
        Ok(())
    }

    /// Flush and return the output path.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.writer.flush()?;
        log::info!("CSV export completed: {}", self.path.display());
        Ok(self.path)
    }

    /// Output path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Snapshot;
    use std::collections::HashMap;

    fn snapshot(t: f64, pairs: &[(&str, f64)]) -> Snapshot {
        Snapshot {
            time_s: t,
            concentrations: pairs
                .iter()
                .map(|(id, v)| (id.to_string(), *v))
                .collect::<HashMap<_, _>>(),
            fluxes: None,
        }
    }

    #[test]
    fn test_csv_layout() {
        let dir = std::env::temp_dir().join("metabolic_twin_csv_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.csv");

        let mut trajectory = Trajectory::new();
        trajectory.push(snapshot(0.0, &[("atp", 2.0), ("adp", 0.25)]));
        trajectory.push(snapshot(1.0, &[("atp", 1.9)])); // adp missing -> 0

        let species = vec!["atp".to_string(), "adp".to_string()];
        let mut exporter = CsvExporter::create(&path).unwrap();
        exporter.export(&species, &trajectory).unwrap();
        let written = exporter.finish().unwrap();

        let contents = std::fs::read_to_string(written).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Time,atp,adp");
        assert_eq!(lines[1], "0.000000,2.000000,0.250000");
        assert_eq!(lines[2], "1.000000,1.900000,0.000000");

        std::fs::remove_dir_all(&dir).ok();
    }
}
