//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::ObservatorySettings;
use crate::db::repository::ScheduleRepository;
use crate::models::{Observatory, Telescope};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for schedule storage
    pub repository: Arc<dyn ScheduleRepository>,
    /// Configured site, used in place of the preset for its telescope
    pub site: ObservatorySettings,
}

impl AppState {
    /// Create a new application state with the given repository and preset sites.
    pub fn new(repository: Arc<dyn ScheduleRepository>) -> Self {
        Self {
            repository,
            site: ObservatorySettings::default(),
        }
    }

    pub fn with_site(mut self, site: ObservatorySettings) -> Self {
        self.site = site;
        self
    }

    /// Observatory to compute visibility for `telescope`.
    ///
    /// The configured overrides apply only to the configured telescope; any
    /// other telescope uses its preset.
    pub fn observatory_for(&self, telescope: Telescope) -> Observatory {
        if telescope == self.site.telescope {
            self.site.observatory()
        } else {
            telescope.observatory()
        }
    }
}
