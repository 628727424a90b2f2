//! Daily schedule model and JSON loading.
//!
//! A schedule is a wake/sleep window plus an ordered list of timed events
//! (meals, exercise, supplements, stressors) in minutes-of-day. Parsing is
//! deliberately forgiving: an unparsable file yields an empty schedule, an
//! unparsable event time or unknown event type drops that event, and the
//! simulation proceeds either way.

use serde::Deserialize;

/// Exercise intensity bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExerciseIntensity {
    Low,
    Medium,
    High,
}

impl ExerciseIntensity {
    /// ATP drain per tick during the exercise window (mM).
    pub fn atp_drain_mM(self) -> f64 {
        match self {
            ExerciseIntensity::Low | ExerciseIntensity::Medium => 0.08,
            ExerciseIntensity::High => 0.15,
        }
    }
}

/// Typed payload of one schedule event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    /// A meal to be absorbed gradually over the absorption window.
    Meal {
        glucose_g: f64,
        protein_g: f64,
        fat_g: f64,
    },
    /// An exercise bout active for `duration_minutes` from the event time.
    Exercise {
        intensity: ExerciseIntensity,
        duration_minutes: f64,
    },
    /// A one-shot supplement dose added to a metabolite.
    Supplement { target_id: String, amount_mM: f64 },
    /// An acute stressor raising cortisol and ROS.
    Stressor { severity: f64 },
}

/// One timed event in the daily schedule.
#[derive(Debug, Clone)]
pub struct ScheduleEvent {
    /// Minute of day, 0..1440.
    pub minute_of_day: u32,
    /// Free-text description.
    pub description: String,
    /// Typed payload.
    pub kind: EventKind,
}

/// Daily events plus the wake/sleep window.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Wake time in minutes-of-day.
    pub wake_minute: u32,
    /// Sleep time in minutes-of-day.
    pub sleep_minute: u32,
    /// Events ordered by minute-of-day.
    pub events: Vec<ScheduleEvent>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            wake_minute: 7 * 60,
            sleep_minute: 23 * 60,
            events: Vec::new(),
        }
    }
}

/// Parse "HH:MM" into minutes-of-day; `None` on malformed input.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(hours * 60 + minutes)
}

// Raw document shapes for tolerant JSON parsing.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchedule {
    #[serde(alias = "WakeTime")]
    wake_time: String,
    #[serde(alias = "SleepTime")]
    sleep_time: String,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvent {
    time: String,
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    payload: serde_json::Value,
}

fn payload_f64(payload: &serde_json::Value, key: &str) -> f64 {
    payload.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

fn convert_event(raw: &RawEvent) -> Option<ScheduleEvent> {
    let minute_of_day = parse_hhmm(&raw.time)?;
    let kind = match raw.event_type.as_str() {
        "Meal" => EventKind::Meal {
            glucose_g: payload_f64(&raw.payload, "glucoseLoad"),
            protein_g: payload_f64(&raw.payload, "proteinLoad"),
            fat_g: payload_f64(&raw.payload, "fatLoad"),
        },
        "Exercise" => {
            let intensity = match raw.payload.get("intensity").and_then(|v| v.as_str()) {
                Some("High") => ExerciseIntensity::High,
                Some("Low") => ExerciseIntensity::Low,
                _ => ExerciseIntensity::Medium,
            };
            EventKind::Exercise {
                intensity,
                duration_minutes: payload_f64(&raw.payload, "durationMinutes").max(1.0),
            }
        }
        "Supplement" => EventKind::Supplement {
            target_id: raw
                .payload
                .get("targetId")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            amount_mM: payload_f64(&raw.payload, "effectMagnitude"),
        },
        "Stressor" => EventKind::Stressor {
            severity: payload_f64(&raw.payload, "severity").max(1.0),
        },
        _ => return None,
    };
    Some(ScheduleEvent {
        minute_of_day,
        description: raw.description.clone(),
        kind,
    })
}

impl Schedule {
    /// Parse a schedule document; never fails.
    ///
    /// A malformed document yields the default (empty) schedule; malformed
    /// individual events are dropped. Both cases are logged.
    pub fn from_json(text: &str) -> Self {
        let raw: RawSchedule = match serde_json::from_str(text) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("schedule unparsable ({}); running with empty schedule", e);
                return Self::default();
            }
        };

        let default = Self::default();
        let wake_minute = parse_hhmm(&raw.wake_time).unwrap_or(default.wake_minute);
        let sleep_minute = parse_hhmm(&raw.sleep_time).unwrap_or(default.sleep_minute);

        let mut events: Vec<ScheduleEvent> = Vec::with_capacity(raw.events.len());
        for raw_event in &raw.events {
            match convert_event(raw_event) {
                Some(event) => events.push(event),
                None => log::warn!(
                    "schedule: dropped event '{}' at '{}' (bad time or unknown type '{}')",
                    raw_event.description,
                    raw_event.time,
                    raw_event.event_type
                ),
            }
        }
        events.sort_by_key(|e| e.minute_of_day);

        Self {
            wake_minute,
            sleep_minute,
            events,
        }
    }

    /// Load from a file; unreadable files yield an empty schedule.
    pub fn load_or_empty<P: AsRef<std::path::Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::from_json(&text),
            Err(e) => {
                log::warn!(
                    "schedule {:?} not readable ({}); running with empty schedule",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Whether a minute-of-day falls inside the sleep window, handling the
    /// overnight wrap.
    pub fn is_asleep(&self, minute_of_day: f64) -> bool {
        let m = minute_of_day.rem_euclid(1440.0);
        let sleep = f64::from(self.sleep_minute);
        let wake = f64::from(self.wake_minute);
        if sleep < wake {
            // Sleep window within one day (e.g. 01:00 - 07:00)
            m >= sleep && m < wake
        } else {
            // Overnight window (e.g. 23:00 - 07:00)
            m >= sleep || m < wake
        }
    }

    /// Hours awake at a given minute-of-day (0 while asleep).
    pub fn hours_since_wake(&self, minute_of_day: f64) -> f64 {
        if self.is_asleep(minute_of_day) {
            return 0.0;
        }
        let m = minute_of_day.rem_euclid(1440.0);
        let wake = f64::from(self.wake_minute);
        let minutes_awake = if m >= wake { m - wake } else { m + 1440.0 - wake };
        minutes_awake / 60.0
    }

    /// Events whose time was crossed moving from `prev_minute` (exclusive)
    /// to `current_minute` (inclusive), handling the midnight wrap.
    pub fn events_crossed(&self, prev_minute: f64, current_minute: f64) -> Vec<&ScheduleEvent> {
        let prev = prev_minute.rem_euclid(1440.0);
        let current = current_minute.rem_euclid(1440.0);
        self.events
            .iter()
            .filter(|e| {
                let t = f64::from(e.minute_of_day);
                if prev <= current {
                    t > prev && t <= current
                } else {
                    t > prev || t <= current
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE_JSON: &str = r#"{
        "wakeTime": "07:00",
        "sleepTime": "23:00",
        "events": [
            { "time": "08:00", "type": "Meal", "description": "breakfast",
              "payload": { "glucoseLoad": 60, "proteinLoad": 20, "fatLoad": 15 } },
            { "time": "17:30", "type": "Exercise", "description": "run",
              "payload": { "intensity": "High", "durationMinutes": 45 } },
            { "time": "not a time", "type": "Meal", "description": "ghost meal", "payload": {} },
            { "time": "12:00", "type": "Teleport", "description": "unknown kind", "payload": {} }
        ]
    }"#;

    #[test]
    fn test_parse_hhmm() {
        assert_eq!(parse_hhmm("07:30"), Some(450));
        assert_eq!(parse_hhmm("00:00"), Some(0));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("12:60"), None);
        assert_eq!(parse_hhmm("noon"), None);
    }

    #[test]
    fn test_from_json_drops_bad_events() {
        let schedule = Schedule::from_json(SCHEDULE_JSON);
        assert_eq!(schedule.wake_minute, 420);
        assert_eq!(schedule.sleep_minute, 1380);
        // Two valid events survive; the ghost meal and unknown kind are dropped
        assert_eq!(schedule.events.len(), 2);
        assert!(matches!(
            schedule.events[0].kind,
            EventKind::Meal { glucose_g, .. } if (glucose_g - 60.0).abs() < 1e-12
        ));
    }

    #[test]
    fn test_unparsable_document_is_empty_schedule() {
        let schedule = Schedule::from_json("this is not json");
        assert!(schedule.events.is_empty());
        assert_eq!(schedule.wake_minute, 420);
    }

    #[test]
    fn test_sleep_window_wraps() {
        let schedule = Schedule::default(); // sleep 23:00, wake 07:00
        assert!(schedule.is_asleep(0.0));
        assert!(schedule.is_asleep(1400.0));
        assert!(!schedule.is_asleep(600.0));
        assert!(!schedule.is_asleep(1379.0));
    }

    #[test]
    fn test_hours_since_wake() {
        let schedule = Schedule::default();
        assert!((schedule.hours_since_wake(420.0) - 0.0).abs() < 1e-12);
        assert!((schedule.hours_since_wake(720.0) - 5.0).abs() < 1e-12);
        assert_eq!(schedule.hours_since_wake(120.0), 0.0); // asleep
    }

    #[test]
    fn test_events_crossed_simple() {
        let schedule = Schedule::from_json(SCHEDULE_JSON);
        let crossed = schedule.events_crossed(479.0, 481.0);
        assert_eq!(crossed.len(), 1);
        assert_eq!(crossed[0].description, "breakfast");

        // No double delivery on the next interval
        assert!(schedule.events_crossed(481.0, 490.0).is_empty());
    }

    #[test]
    fn test_events_crossed_midnight_wrap() {
        let mut schedule = Schedule::default();
        schedule.events.push(ScheduleEvent {
            minute_of_day: 1,
            description: "just after midnight".to_string(),
            kind: EventKind::Stressor { severity: 1.0 },
        });
        let crossed = schedule.events_crossed(1439.0, 2.0);
        assert_eq!(crossed.len(), 1);
    }

    #[test]
    fn test_exercise_intensity_drain() {
        assert!((ExerciseIntensity::High.atp_drain_mM() - 0.15).abs() < 1e-12);
        assert!((ExerciseIntensity::Low.atp_drain_mM() - 0.08).abs() < 1e-12);
    }
}
