//! Schedules: one observing term of one telescope.
//!
//! A schedule is exchanged with the persistence service as JSON in the shape of
//! [`Schedule`]. The helpers below read and write that shape from strings and
//! files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{Observatory, Project, Telescope};

/// All projects of one observing term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Term label, e.g. `2025OCT`
    pub term: String,
    #[serde(default)]
    pub telescope: Telescope,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Schedule {
    pub fn new(term: impl Into<String>, telescope: Telescope) -> Self {
        Self {
            term: term.into(),
            telescope,
            projects: Vec::new(),
        }
    }

    /// Reference site data for this schedule's telescope.
    pub fn observatory(&self) -> Observatory {
        self.telescope.observatory()
    }

    pub fn project(&self, ident: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.ident == ident)
    }

    pub fn project_mut(&mut self, ident: &str) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.ident == ident)
    }

    /// Number of slots across all projects.
    pub fn slot_count(&self) -> usize {
        self.projects.iter().map(|p| p.slots.len()).sum()
    }
}

fn validate_input_schedule(schedule_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(schedule_json).context("Invalid schedule JSON")?;
    let object = value
        .as_object()
        .context("Schedule JSON must be an object")?;
    if !object.contains_key("term") {
        anyhow::bail!("Missing required 'term' field");
    }
    Ok(())
}

/// Parse a schedule from its JSON representation.
pub fn parse_schedule_json_str(schedule_json: &str) -> Result<Schedule> {
    validate_input_schedule(schedule_json)?;
    let schedule: Schedule = serde_json::from_str(schedule_json)
        .context("Failed to deserialize schedule JSON using Serde")?;
    log::debug!(
        "parsed schedule term={} telescope={} projects={} slots={}",
        schedule.term,
        schedule.telescope,
        schedule.projects.len(),
        schedule.slot_count()
    );
    Ok(schedule)
}

/// Load a schedule from a JSON file.
pub fn load_schedule_file<P: AsRef<Path>>(path: P) -> Result<Schedule> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schedule file {}", path.display()))?;
    parse_schedule_json_str(&content)
        .with_context(|| format!("Failed to parse schedule file {}", path.display()))
}

/// Write a schedule to a JSON file, pretty-printed.
pub fn save_schedule_file<P: AsRef<Path>>(schedule: &Schedule, path: P) -> Result<()> {
    let path = path.as_ref();
    let content =
        serde_json::to_string_pretty(schedule).context("Failed to serialize schedule")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write schedule file {}", path.display()))
}
