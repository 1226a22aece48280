//! Error types for the astronomy helpers and schedule editing operations.

use thiserror::Error;

/// Result type for astronomy computations.
pub type AstroResult<T> = std::result::Result<T, AstroError>;

/// Result type for schedule editing operations.
pub type EditResult<T> = std::result::Result<T, EditError>;

/// Errors raised by coordinate parsing and visibility computations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstroError {
    /// Input outside the domain of the spherical-astronomy formulas
    /// (non-finite values, out-of-range angles, or the pole/equator singularity).
    #[error("Invalid astronomical input: {reason}")]
    InvalidAstronomicalInput { reason: String },

    /// A sexagesimal string that could not be parsed.
    #[error("Invalid sexagesimal value '{input}': {reason}")]
    InvalidSexagesimal { input: String, reason: String },
}

impl AstroError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidAstronomicalInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_sexagesimal(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSexagesimal {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the schedule editing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    /// No project with this ident exists in the schedule
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// A project with this ident already exists
    #[error("Project already exists: {0}")]
    DuplicateProject(String),

    /// Slot index past the end of the project's slot list
    #[error("Slot index {index} out of range for project {ident} ({len} slots)")]
    SlotIndexOutOfRange {
        ident: String,
        index: usize,
        len: usize,
    },

    /// The operation needs at least one slot index
    #[error("No slots selected")]
    EmptySelection,

    /// Only one of the LST bounds was supplied
    #[error("LST window needs both a start and an end (got start={start:?}, end={end:?})")]
    IncompleteLstWindow { start: String, end: String },

    /// Shrinking a group would discard an already scheduled slot
    #[error("Cannot remove slot {index} of project {ident}: it is already scheduled")]
    WouldDropScheduledSlot { ident: String, index: usize },

    /// A slot request field failed validation
    #[error("Invalid slot request: {0}")]
    InvalidRequest(String),

    /// Coordinate parsing or visibility computation failed
    #[error(transparent)]
    Astro(#[from] AstroError),
}
