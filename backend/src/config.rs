//! Application configuration file support.
//!
//! Configuration is read from a TOML file with three optional sections:
//!
//! ```toml
//! [repository]
//! type = "local"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//!
//! [observatory]
//! telescope = "parkes"
//! elevation_limit = 25.0
//! ```
//!
//! Missing sections and keys fall back to defaults. The `HOST` and `PORT`
//! environment variables override the `[server]` section.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use qtty::Degrees;
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::db::RepositoryType;
use crate::models::{Observatory, Telescope};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "ATSCHED_CONFIG";

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub observatory: ObservatorySettings,
}

/// Repository type settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// HTTP bind settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Site used for default LST windows, with optional overrides of the preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObservatorySettings {
    #[serde(default)]
    pub telescope: Telescope,
    /// Degrees above the horizon
    #[serde(default)]
    pub elevation_limit: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn check_angle(name: &str, value: Option<f64>, limit: f64) -> Result<(), RepositoryError> {
    match value {
        Some(v) if !v.is_finite() || v.abs() > limit => Err(RepositoryError::configuration(
            format!("observatory.{} must be within ±{} degrees, got {}", name, limit, v),
        )),
        _ => Ok(()),
    }
}

impl ObservatorySettings {
    /// Telescope preset with any configured overrides applied.
    pub fn observatory(&self) -> Observatory {
        let mut site = self.telescope.observatory();
        if let Some(latitude) = self.latitude {
            site.latitude = Degrees::new(latitude);
        }
        if let Some(longitude) = self.longitude {
            site.longitude = Degrees::new(longitude);
        }
        if let Some(limit) = self.elevation_limit {
            site = site.with_elevation_limit(Degrees::new(limit));
        }
        site
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        check_angle("latitude", self.latitude, 90.0)?;
        check_angle("longitude", self.longitude, 360.0)?;
        check_angle("elevation_limit", self.elevation_limit, 90.0)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Err(RepositoryError::ConfigurationError)` if the file cannot be read,
    ///   parsed, or holds out-of-range values
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, RepositoryError> {
        let config: AppConfig = toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `atsched.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, RepositoryError> {
        let search_paths = [
            PathBuf::from("atsched.toml"),
            PathBuf::from("backend/atsched.toml"),
            PathBuf::from("../atsched.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                debug!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(RepositoryError::configuration(
            "No atsched.toml found in standard locations",
        ))
    }

    /// Configuration for the server binary.
    ///
    /// Reads the file named by `ATSCHED_CONFIG` if set, otherwise the default
    /// location if a file exists there, otherwise built-in defaults. `HOST`
    /// and `PORT` are applied on top.
    pub fn from_env_or_default() -> Result<Self, RepositoryError> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => match Self::from_default_location() {
                Ok(config) => config,
                Err(RepositoryError::ConfigurationError { message, .. })
                    if message.starts_with("No atsched.toml") =>
                {
                    debug!("No configuration file found, using defaults");
                    Self::default()
                }
                Err(e) => return Err(e),
            },
        };
        config.apply_env_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `HOST` and `PORT` overrides from `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), RepositoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port.parse().map_err(|_| {
                RepositoryError::configuration(format!("PORT must be a valid port number, got {}", port))
            })?;
        }
        Ok(())
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        self.repository.repo_type.parse().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })
    }

    /// `host:port` string for binding the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn validate(&self) -> Result<(), RepositoryError> {
        self.repository_type()?;
        self.observatory.validate()
    }
}
