//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use atsched::models::{ObservationSlot, Position, Project, Schedule, Telescope};
use atsched::services::SlotRequest;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with the listed environment variables set (`Some`) or removed
/// (`None`), restoring the previous values afterwards, even on panic.
///
/// Calls are serialized because the environment is process-global and tests
/// run in parallel.
pub fn with_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(vars);
    f()
}

struct EnvRestore(Vec<(String, Option<String>)>);

impl EnvRestore {
    fn apply(vars: &[(&str, Option<&str>)]) -> Self {
        let previous = vars
            .iter()
            .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
            .collect();
        for (key, value) in vars {
            set_or_remove(key, *value);
        }
        Self(previous)
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        // Reverse order so a key listed twice ends at its original value
        for (key, value) in self.0.iter().rev() {
            set_or_remove(key, value.as_deref());
        }
    }
}

fn set_or_remove(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}

/// An unscheduled slot with fixed instrument settings.
pub fn slot(source: &str, ra: &str, dec: &str, hours: f64) -> ObservationSlot {
    ObservationSlot {
        source: source.to_string(),
        position: Position::new(ra, dec),
        lst_start: "00:00".to_string(),
        lst_end: "12:00".to_string(),
        requested_duration: hours,
        array: "6A".to_string(),
        bandwidth: "CFB1M".to_string(),
        bands: vec!["4cm".to_string(), "15mm".to_string()],
        scheduled: false,
        scheduled_duration: 0.0,
        scheduled_start: 0,
    }
}

/// A schedule with one project holding `A, B, A` slots.
pub fn sample_schedule(term: &str) -> Schedule {
    let mut project = Project::new("C3132");
    project.principal_investigator = "A. Observer".to_string();
    project.title = "Pulsar timing".to_string();
    project.slots = vec![
        slot("J0437-4715", "04:37:15.8", "-47:15:09", 4.0),
        slot("J1939+2134", "19:39:38.6", "+21:34:59", 2.0),
        slot("J0437-4715", "04:37:15.8", "-47:15:09", 4.0),
    ];

    let mut schedule = Schedule::new(term, Telescope::Atca);
    schedule.projects.push(project);
    schedule
}

/// A slot request with a blank LST window.
pub fn request(source: &str, ra: &str, dec: &str) -> SlotRequest {
    SlotRequest {
        source: source.to_string(),
        ra: ra.to_string(),
        dec: dec.to_string(),
        requested_duration: 3.0,
        array: "H214".to_string(),
        bandwidth: "CFB1M".to_string(),
        bands: vec!["16cm".to_string()],
        ..Default::default()
    }
}
