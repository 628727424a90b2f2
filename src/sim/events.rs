//! Schedule event delivery, gradual meal absorption, and tonic state
//! adjustments (exercise, fasting, sleep).
//!
//! Tonic rates are expressed per sim-minute and scaled by the minutes
//! elapsed in the tick, so trajectories are independent of the host tick
//! cadence (a live driver ticking at 60 Hz and a batch driver ticking once
//! per sim-minute produce the same chemistry).

use crate::sim::schedule::{EventKind, ExerciseIntensity, ScheduleEvent};
use crate::sim::species::{add, add_up_to, set, SpeciesMap};

/// Nutrient absorption window for a standard mixed meal (minutes).
pub const MEAL_ABSORPTION_MINUTES: f64 = 90.0;

/// Insulin spike added on top of baseline when a meal starts (units).
pub const MEAL_INSULIN_SPIKE: f64 = 8.0;

/// Blood glucose raised per gram of absorbed glucose (mM/g).
pub const GLUCOSE_PER_GRAM_MM: f64 = 0.05;

/// Blood fatty acids raised per gram of absorbed fat (mM/g).
pub const FAT_PER_GRAM_MM: f64 = 0.02;

/// Methionine bump per gram of absorbed protein (mM/g).
pub const MET_PER_GRAM_MM: f64 = 0.005;

/// A meal currently being absorbed.
#[derive(Debug, Clone)]
pub struct MealInProgress {
    /// Grams of glucose not yet absorbed.
    pub glucose_remaining_g: f64,
    /// Grams of protein not yet absorbed.
    pub protein_remaining_g: f64,
    /// Grams of fat not yet absorbed.
    pub fat_remaining_g: f64,
    /// Sim-minutes of the absorption window already consumed.
    pub elapsed_min: f64,
    /// Total absorption window (minutes).
    pub duration_min: f64,
}

impl MealInProgress {
    /// Start absorbing a meal with the standard window.
    pub fn new(glucose_g: f64, protein_g: f64, fat_g: f64) -> Self {
        Self {
            glucose_remaining_g: glucose_g.max(0.0),
            protein_remaining_g: protein_g.max(0.0),
            fat_remaining_g: fat_g.max(0.0),
            elapsed_min: 0.0,
            duration_min: MEAL_ABSORPTION_MINUTES,
        }
    }

    /// Whether the absorption window has closed.
    pub fn finished(&self) -> bool {
        self.elapsed_min >= self.duration_min
    }

    /// Absorb nutrients for `dt_min` sim-minutes, applying them to the
    /// state vector.
    ///
    /// Each minute consumes `remaining * (1/duration)` of each nutrient:
    /// glucose raises blood glucose and insulin, fat raises blood fatty
    /// acids, protein feeds the amino-acid pool with a small methionine
    /// bump.
    pub fn absorb(&mut self, species: &SpeciesMap, y: &mut [f64], dt_min: f64) {
        let fraction = (dt_min / self.duration_min).min(1.0);

        let glucose_g = self.glucose_remaining_g * fraction;
        let protein_g = self.protein_remaining_g * fraction;
        let fat_g = self.fat_remaining_g * fraction;

        add(y, species.glucose_blood, glucose_g * GLUCOSE_PER_GRAM_MM);
        add(y, species.insulin, glucose_g * 0.15);
        add(y, species.fatty_acids_blood, fat_g * FAT_PER_GRAM_MM);
        add(y, species.amino_acid_pool, protein_g);
        add(y, species.met, protein_g * MET_PER_GRAM_MM);

        self.glucose_remaining_g -= glucose_g;
        self.protein_remaining_g -= protein_g;
        self.fat_remaining_g -= fat_g;
        self.elapsed_min += dt_min;
    }
}

/// An exercise bout currently in progress.
#[derive(Debug, Clone)]
pub struct ExerciseInProgress {
    pub intensity: ExerciseIntensity,
    /// Sim-minutes remaining in the bout.
    pub remaining_min: f64,
}

impl ExerciseInProgress {
    /// Apply the per-minute exercise drain for `dt_min` sim-minutes:
    /// ATP falls (intensity-dependent), AMP and AMPK rise, blood glucose
    /// is consumed by working muscle.
    pub fn apply(&mut self, species: &SpeciesMap, y: &mut [f64], dt_min: f64) {
        let dt = dt_min.min(self.remaining_min);
        add(y, species.atp, -self.intensity.atp_drain_mM() * dt);
        add(y, species.amp, 0.02 * dt);
        add(y, species.glucose_blood, -0.03 * dt);
        add(y, species.ampk, 0.01 * dt);
        self.remaining_min -= dt_min;
    }

    pub fn finished(&self) -> bool {
        self.remaining_min <= 0.0
    }
}

/// Outcome of delivering one schedule event.
#[derive(Debug)]
pub enum Delivered {
    Meal(MealInProgress),
    Exercise(ExerciseInProgress),
    Immediate,
}

/// Deliver one schedule event at the moment its time is crossed.
///
/// Meals enqueue an absorption window and spike insulin immediately;
/// exercise opens a drain window; supplements and stressors apply
/// one-shot concentration changes.
pub fn deliver_event(
    event: &ScheduleEvent,
    species: &SpeciesMap,
    y: &mut [f64],
    resolve: impl Fn(&str) -> Option<usize>,
) -> Delivered {
    log::debug!(
        "schedule event at minute {}: {}",
        event.minute_of_day,
        event.description
    );
    match &event.kind {
        EventKind::Meal {
            glucose_g,
            protein_g,
            fat_g,
        } => {
            add(y, species.insulin, MEAL_INSULIN_SPIKE);
            Delivered::Meal(MealInProgress::new(*glucose_g, *protein_g, *fat_g))
        }
        EventKind::Exercise {
            intensity,
            duration_minutes,
        } => Delivered::Exercise(ExerciseInProgress {
            intensity: *intensity,
            remaining_min: *duration_minutes,
        }),
        EventKind::Supplement {
            target_id,
            amount_mM,
        } => {
            add(y, resolve(target_id), *amount_mM);
            Delivered::Immediate
        }
        EventKind::Stressor { severity } => {
            add(y, species.cortisol, 0.2 * severity);
            add(y, species.ros, 0.01 * severity);
            Delivered::Immediate
        }
    }
}

/// Fasted-state mobilization, active when more than 3 h have passed since
/// the last meal and the user is awake: fatty acids mobilize, AMPK
/// activates, mTOR is suppressed toward a floor of 0.1.
pub fn apply_fasting(species: &SpeciesMap, y: &mut [f64], dt_min: f64) {
    add(y, species.fatty_acids_blood, 0.005 * dt_min);
    add(y, species.ampk, 0.002 * dt_min);
    if let Some(i) = species.mtor {
        y[i] = (y[i] - 0.002 * dt_min).max(0.1);
    }
}

/// Minutes without food before the fasted state engages.
pub const FASTING_THRESHOLD_MIN: f64 = 180.0;

/// Overnight anabolic recovery, active inside the sleep window: ATP
/// salvage, glutathione restoration, and NAD+ salvage run toward their
/// ceilings, and melatonin is held at its sleep level.
pub fn apply_sleep(species: &SpeciesMap, y: &mut [f64], dt_min: f64) {
    add_up_to(y, species.atp, 0.01 * dt_min, 6.0);
    add_up_to(y, species.gsh, 0.005 * dt_min, 6.0);
    add_up_to(y, species.nad, 0.002 * dt_min, 1.0);
    set(y, species.melatonin, 0.5);
}
