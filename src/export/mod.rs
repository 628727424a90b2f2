//! Export functionality for simulation data.
//!
//! Provides CSV time-series export of sampled trajectories.

mod csv_export;

pub use csv_export::CsvExporter;
