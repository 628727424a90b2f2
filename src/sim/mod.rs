//! Simulation engine: integrator, circadian overlay, schedule events,
//! homeostatic clamping, and the driver tick loop.

pub mod circadian;
pub mod driver;
pub mod events;
pub mod homeostasis;
pub mod integrator;
pub mod schedule;
pub mod species;

pub use driver::{DriverConfig, SimulationDriver, TimeSource, WallClock};
pub use homeostasis::HomeostasisTable;
pub use integrator::{integrate, rk4_step};
pub use schedule::{EventKind, ExerciseIntensity, Schedule, ScheduleEvent};
