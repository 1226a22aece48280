//! Observing projects.

use serde::{Deserialize, Serialize};

use super::ObservationSlot;

/// An observing project and its slot requests.
///
/// Slots are addressed by their position in `slots`; that index is what slot
/// groups and the editing operations refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project code, e.g. `C3132`
    pub ident: String,
    #[serde(default)]
    pub principal_investigator: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub slots: Vec<ObservationSlot>,
}

impl Project {
    pub fn new(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            principal_investigator: String::new(),
            title: String::new(),
            comments: String::new(),
            slots: Vec::new(),
        }
    }

    /// Total hours requested across all slots.
    pub fn requested_hours(&self) -> f64 {
        self.slots.iter().map(|s| s.requested_duration).sum()
    }

    /// Total hours allocated to scheduled slots.
    pub fn scheduled_hours(&self) -> f64 {
        self.slots
            .iter()
            .filter(|s| s.scheduled)
            .map(|s| s.scheduled_duration)
            .sum()
    }
}
