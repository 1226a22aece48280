//! Observing sites and their reference data.

use std::fmt;
use std::str::FromStr;

use qtty::Degrees;
use serde::{Deserialize, Serialize};

/// Geographic position and pointing limit of an observing site.
///
/// Latitude and longitude are geodetic degrees (east-positive longitude);
/// `elevation_limit` is the lowest elevation the telescope can observe at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observatory {
    pub name: String,
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub elevation_limit: Degrees,
}

impl Observatory {
    pub fn new(
        name: impl Into<String>,
        latitude: Degrees,
        longitude: Degrees,
        elevation_limit: Degrees,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            elevation_limit,
        }
    }

    /// Copy of this observatory with a different elevation limit.
    pub fn with_elevation_limit(mut self, elevation_limit: Degrees) -> Self {
        self.elevation_limit = elevation_limit;
        self
    }
}

/// Telescopes a schedule can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Telescope {
    /// Australia Telescope Compact Array, Narrabri
    #[default]
    Atca,
    /// Parkes 64m
    Parkes,
}

impl Telescope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Telescope::Atca => "atca",
            Telescope::Parkes => "parkes",
        }
    }

    /// Reference site data for this telescope.
    pub fn observatory(&self) -> Observatory {
        match self {
            Telescope::Atca => Observatory::new(
                "ATCA",
                Degrees::new(-30.312_884),
                Degrees::new(149.550_163),
                Degrees::new(12.0),
            ),
            Telescope::Parkes => Observatory::new(
                "Parkes",
                Degrees::new(-32.998_398),
                Degrees::new(148.263_510),
                Degrees::new(30.5),
            ),
        }
    }
}

impl fmt::Display for Telescope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Telescope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atca" | "ca" => Ok(Self::Atca),
            "parkes" | "pks" => Ok(Self::Parkes),
            _ => Err(format!("Unknown telescope: {}", s)),
        }
    }
}
