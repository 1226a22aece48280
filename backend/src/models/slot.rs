//! Observation slots: one discrete observing request within a project.

use chrono::{DateTime, Duration, Utc};
use qtty::{Degrees, HourAngles};
use serde::{Deserialize, Serialize};

use crate::astro::sexagesimal::{parse_degrees, parse_hours};
use crate::error::AstroResult;

/// Target position as sexagesimal strings (`H:M:S` right ascension, `D:M:S` declination).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub ra: String,
    pub dec: String,
}

impl Position {
    pub fn new(ra: impl Into<String>, dec: impl Into<String>) -> Self {
        Self {
            ra: ra.into(),
            dec: dec.into(),
        }
    }

    /// Parse both coordinates.
    pub fn to_angles(&self) -> AstroResult<(HourAngles, Degrees)> {
        Ok((parse_hours(&self.ra)?, parse_degrees(&self.dec)?))
    }
}

/// A single observation request and, once placed on the timeline, its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSlot {
    pub source: String,
    pub position: Position,
    pub lst_start: String,
    pub lst_end: String,
    /// Requested time on source, hours
    pub requested_duration: f64,
    pub array: String,
    pub bandwidth: String,
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default, with = "scheduled_flag")]
    pub scheduled: bool,
    /// Hours actually allocated
    #[serde(default)]
    pub scheduled_duration: f64,
    /// Allocation start, Unix epoch seconds
    #[serde(default)]
    pub scheduled_start: i64,
}

impl ObservationSlot {
    /// Start of the allocation, if the slot is scheduled.
    pub fn scheduled_start_utc(&self) -> Option<DateTime<Utc>> {
        if !self.scheduled {
            return None;
        }
        DateTime::from_timestamp(self.scheduled_start, 0)
    }

    /// End of the allocation, if the slot is scheduled.
    pub fn scheduled_end_utc(&self) -> Option<DateTime<Utc>> {
        let start = self.scheduled_start_utc()?;
        let seconds = (self.scheduled_duration * 3600.0).round() as i64;
        start.checked_add_signed(Duration::try_seconds(seconds)?)
    }

    /// Clear the scheduling outcome fields.
    pub fn unschedule(&mut self) {
        self.scheduled = false;
        self.scheduled_duration = 0.0;
        self.scheduled_start = 0;
    }
}

/// The scheduling-relevant fields of a slot.
///
/// Two slots with equal keys are interchangeable for display and editing; the
/// scheduling outcome is not part of the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotKey {
    pub source: String,
    pub position: Position,
    pub lst_start: String,
    pub lst_end: String,
    pub requested_duration: f64,
    pub array: String,
    pub bandwidth: String,
    pub bands: Vec<String>,
}

impl SlotKey {
    /// True when `slot` has exactly these key fields.
    pub fn matches(&self, slot: &ObservationSlot) -> bool {
        self.source == slot.source
            && self.requested_duration == slot.requested_duration
            && self.array == slot.array
            && self.bandwidth == slot.bandwidth
            && self.position == slot.position
            && self.lst_start == slot.lst_start
            && self.lst_end == slot.lst_end
            && self.bands == slot.bands
    }

    /// A fresh, unscheduled slot with these key fields.
    pub fn to_slot(&self) -> ObservationSlot {
        ObservationSlot {
            source: self.source.clone(),
            position: self.position.clone(),
            lst_start: self.lst_start.clone(),
            lst_end: self.lst_end.clone(),
            requested_duration: self.requested_duration,
            array: self.array.clone(),
            bandwidth: self.bandwidth.clone(),
            bands: self.bands.clone(),
            scheduled: false,
            scheduled_duration: 0.0,
            scheduled_start: 0,
        }
    }

    /// Overwrite the key fields of `slot`, leaving its outcome untouched.
    pub fn apply_to(&self, slot: &mut ObservationSlot) {
        slot.source.clone_from(&self.source);
        slot.position.clone_from(&self.position);
        slot.lst_start.clone_from(&self.lst_start);
        slot.lst_end.clone_from(&self.lst_end);
        slot.requested_duration = self.requested_duration;
        slot.array.clone_from(&self.array);
        slot.bandwidth.clone_from(&self.bandwidth);
        slot.bands.clone_from(&self.bands);
    }
}

impl From<&ObservationSlot> for SlotKey {
    fn from(slot: &ObservationSlot) -> Self {
        Self {
            source: slot.source.clone(),
            position: slot.position.clone(),
            lst_start: slot.lst_start.clone(),
            lst_end: slot.lst_end.clone(),
            requested_duration: slot.requested_duration,
            array: slot.array.clone(),
            bandwidth: slot.bandwidth.clone(),
            bands: slot.bands.clone(),
        }
    }
}

/// `scheduled` travels as `0`/`1` on the wire; booleans are accepted too.
mod scheduled_flag {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Int(i64),
            Bool(bool),
        }

        match Flag::deserialize(deserializer)? {
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(other) => Err(de::Error::custom(format!(
                "scheduled flag must be 0 or 1, got {}",
                other
            ))),
            Flag::Bool(value) => Ok(value),
        }
    }
}
