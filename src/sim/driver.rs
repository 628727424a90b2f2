//! The simulation driver: tick loop, clock modes, and snapshot emission.
//!
//! The driver owns two clocks. The *sim clock* runs in minutes-of-day
//! (0..1440) and drives circadian overlays and schedule events; the *step
//! clock* runs in seconds and drives ODE integration. The two are
//! deliberately decoupled: chemistry relaxes on a seconds timescale while
//! the day advances at whatever rate the host chooses.
//!
//! Clock modes:
//! - **Batch**: each tick advances the day in lockstep with integration
//!   time (real-time correspondence). Fully deterministic.
//! - **Live**: wall-clock deltas from an injectable [`TimeSource`] are
//!   scaled by a configured sim-minutes-per-real-second factor (e.g. 24.0
//!   compresses a day into 60 real seconds).
//! - **Manual**: the host sets the minute-of-day directly (a scrub slider).
//!
//! Each tick runs the fixed sequence: advance clock, circadian
//! assignments, tonic adjustments (sleep / exercise / fasting), schedule
//! event delivery, meal absorption, N RK4 substeps with the homeostatic
//! clamp after each, then snapshot emission at output-interval crossings.

use std::collections::HashMap;
use std::time::Instant;

use crate::pathway::compiled::CompiledSystem;
use crate::sim::circadian;
use crate::sim::events::{
    self, deliver_event, Delivered, ExerciseInProgress, MealInProgress,
};
use crate::sim::homeostasis::HomeostasisTable;
use crate::sim::integrator::rk4_step;
use crate::sim::schedule::Schedule;
use crate::sim::species::{self, SpeciesMap};
use crate::state::{Snapshot, Trajectory};

/// Monotonic time source, injectable so tests control the live clock.
pub trait TimeSource {
    /// Seconds elapsed since an arbitrary fixed origin.
    fn now_secs(&mut self) -> f64;
}

/// Wall-clock time source for live mode.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for WallClock {
    fn now_secs(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Driver configuration knobs.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// RK4 substep size (seconds).
    pub dt_sec: f64,
    /// Integration substeps per tick.
    pub substeps_per_tick: usize,
    /// Snapshot emission interval (integration seconds).
    pub output_interval_sec: f64,
    /// Sim minutes advanced per real second in live mode.
    pub sim_minutes_per_real_second: f64,
    /// Minute-of-day at simulation start.
    pub start_minute_of_day: f64,
    /// Capture per-reaction fluxes into snapshots.
    pub capture_fluxes: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            dt_sec: 0.01,
            substeps_per_tick: 10,
            output_interval_sec: 1.0,
            // Full day in 60 real seconds
            sim_minutes_per_real_second: 24.0,
            start_minute_of_day: 7.0 * 60.0,
            capture_fluxes: false,
        }
    }
}

/// Owns and advances one simulation instance.
///
/// The compiled system, schedule, and clamp table are fixed at
/// construction; the state vector is advanced in place each tick.
pub struct SimulationDriver {
    system: CompiledSystem,
    schedule: Schedule,
    clamp: HomeostasisTable,
    config: DriverConfig,
    species: SpeciesMap,

    /// Live state vector (mM), in species declaration order.
    state: Vec<f64>,
    /// Integration time (seconds since start).
    t_sec: f64,
    /// Sim clock, minutes-of-day.
    sim_minute: f64,
    /// Minutes since the most recent meal event.
    minutes_since_meal: f64,
    /// Wall-clock reading at the previous live tick.
    last_wall_secs: Option<f64>,

    active_meals: Vec<MealInProgress>,
    active_exercise: Vec<ExerciseInProgress>,

    /// Baselines captured from the initial state for circadian assignment.
    cortisol_baseline: f64,
    melatonin_baseline: f64,
    adenosine_baseline: f64,

    trajectory: Trajectory,
    last_output_sec: f64,
    /// Cooperative cancellation flag, checked at tick boundaries.
    pub running: bool,
}

impl SimulationDriver {
    /// Create a driver over a compiled system and record the t = 0
    /// snapshot.
    pub fn new(system: CompiledSystem, schedule: Schedule, config: DriverConfig) -> Self {
        let species = SpeciesMap::resolve(&system);
        let state = system.initial_state();

        let baseline = |idx: Option<usize>, default: f64| {
            idx.map_or(default, |i| if state[i] > 0.0 { state[i] } else { default })
        };
        let cortisol_baseline = baseline(species.cortisol, 0.4);
        let melatonin_baseline = baseline(species.melatonin, 0.1);
        let adenosine_baseline = baseline(species.adenosine, 0.3);

        let mut driver = Self {
            system,
            schedule,
            clamp: HomeostasisTable::new(),
            species,
            state,
            t_sec: 0.0,
            sim_minute: config.start_minute_of_day.rem_euclid(1440.0),
            minutes_since_meal: events::FASTING_THRESHOLD_MIN + 60.0,
            last_wall_secs: None,
            active_meals: Vec::new(),
            active_exercise: Vec::new(),
            cortisol_baseline,
            melatonin_baseline,
            adenosine_baseline,
            trajectory: Trajectory::new(),
            last_output_sec: 0.0,
            running: true,
            config,
        };
        driver.clamp.insulin_baseline = species::get(&driver.state, driver.species.insulin).max(0.1);
        driver.record_snapshot();
        driver
    }

    /// Mutable access to the clamp table for toggling individual rules
    /// (e.g. disabling corrections to test the pure network).
    pub fn clamp_mut(&mut self) -> &mut HomeostasisTable {
        &mut self.clamp
    }

    /// Current integration time (seconds).
    pub fn time_sec(&self) -> f64 {
        self.t_sec
    }

    /// Current sim clock position (minutes-of-day).
    pub fn sim_minute(&self) -> f64 {
        self.sim_minute
    }

    /// Current concentration of a species; `None` when untracked.
    pub fn concentration(&self, species_id: &str) -> Option<f64> {
        self.system.index_of(species_id).map(|i| self.state[i])
    }

    /// The sampled trajectory so far.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Request cooperative cancellation; the next tick boundary returns.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Batch tick: the day advances in lockstep with integration time.
    pub fn tick_batch(&mut self) {
        let dt_min = self.config.dt_sec * self.config.substeps_per_tick as f64 / 60.0;
        self.tick_with_minutes(dt_min);
    }

    /// Live tick: sim minutes from measured wall-clock delta.
    pub fn tick_live(&mut self, clock: &mut dyn TimeSource) {
        let now = clock.now_secs();
        let delta_real = match self.last_wall_secs {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_wall_secs = Some(now);
        let dt_min = delta_real * self.config.sim_minutes_per_real_second;
        self.tick_with_minutes(dt_min);
    }

    /// Manual tick: the host supplies the new minute-of-day (slider).
    pub fn tick_manual(&mut self, minute_of_day: f64) {
        let target = minute_of_day.rem_euclid(1440.0);
        let dt_min = (target - self.sim_minute).rem_euclid(1440.0);
        self.tick_with_minutes(dt_min);
    }

    /// Run batch ticks until `duration_sec` of integration time has
    /// elapsed or the driver is stopped.
    pub fn run_for(&mut self, duration_sec: f64) {
        let end = self.t_sec + duration_sec;
        while self.running && self.t_sec < end - 1e-9 {
            self.tick_batch();
        }
    }

    /// One full driver tick advancing the sim clock by `dt_min` minutes.
    fn tick_with_minutes(&mut self, dt_min: f64) {
        if !self.running {
            return;
        }

        // 1. Advance the sim clock
        let prev_minute = self.sim_minute;
        self.sim_minute = (self.sim_minute + dt_min).rem_euclid(1440.0);
        self.minutes_since_meal += dt_min;

        // 2. Circadian assignments (not cumulative: baselines are scaled
        //    fresh each tick)
        let hour = self.sim_minute / 60.0;
        let y = &mut self.state;
        species::set(
            y,
            self.species.cortisol,
            self.cortisol_baseline * circadian::cortisol_multiplier(hour),
        );
        species::set(
            y,
            self.species.melatonin,
            self.melatonin_baseline * circadian::melatonin_multiplier(hour),
        );
        let hours_awake = self.schedule.hours_since_wake(self.sim_minute);
        species::set(
            y,
            self.species.adenosine,
            self.adenosine_baseline * circadian::adenosine_multiplier(hours_awake),
        );
        self.system
            .set_activity("nampt", circadian::nampt_multiplier(hour));

        // 3. Tonic adjustments: sleep, exercise, fasting
        let asleep = self.schedule.is_asleep(self.sim_minute);
        if asleep {
            events::apply_sleep(&self.species, &mut self.state, dt_min);
        }
        for bout in &mut self.active_exercise {
            bout.apply(&self.species, &mut self.state, dt_min);
        }
        self.active_exercise.retain(|b| !b.finished());
        if self.minutes_since_meal > events::FASTING_THRESHOLD_MIN && !asleep {
            events::apply_fasting(&self.species, &mut self.state, dt_min);
        }

        // 4. Schedule events crossed since the previous tick
        if dt_min > 0.0 {
            let crossed: Vec<_> = self
                .schedule
                .events_crossed(prev_minute, self.sim_minute)
                .into_iter()
                .cloned()
                .collect();
            for event in &crossed {
                let delivered = deliver_event(event, &self.species, &mut self.state, |id| {
                    self.system.index_of(id)
                });
                match delivered {
                    Delivered::Meal(meal) => {
                        self.minutes_since_meal = 0.0;
                        self.active_meals.push(meal);
                    }
                    Delivered::Exercise(bout) => self.active_exercise.push(bout),
                    Delivered::Immediate => {}
                }
            }
        }

        // 5. Meal absorption
        for meal in &mut self.active_meals {
            meal.absorb(&self.species, &mut self.state, dt_min);
        }
        self.active_meals.retain(|m| !m.finished());

        // 6 + 7. Integration substeps, clamping after each
        let dt = self.config.dt_sec;
        for _ in 0..self.config.substeps_per_tick {
            let system = &self.system;
            let f = |y: &[f64], _t: f64, dydt: &mut [f64]| system.derivatives(y, dydt);
            self.state = rk4_step(&self.state, self.t_sec, dt, &f);
            self.t_sec += dt;
            self.clamp.apply(&self.species, &mut self.state, dt);
        }

        // 8. Snapshot emission at output-interval crossings
        if self.t_sec - self.last_output_sec >= self.config.output_interval_sec - 1e-9 {
            self.record_snapshot();
            self.last_output_sec = self.t_sec;
        }
    }

    fn record_snapshot(&mut self) {
        let concentrations: HashMap<String, f64> = self
            .system
            .species_ids()
            .iter()
            .zip(&self.state)
            .map(|(id, &value)| (id.clone(), value))
            .collect();
        let fluxes = if self.config.capture_fluxes {
            Some(self.system.fluxes(&self.state).into_iter().collect())
        } else {
            None
        };
        self.trajectory.push(Snapshot {
            time_s: self.t_sec,
            concentrations,
            fluxes,
        });
    }
}
