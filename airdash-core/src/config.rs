use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::persona::Persona;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// service_url = "http://localhost:8000"
/// default_latitude = 19.43
/// default_longitude = -99.13
/// default_persona = "children"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_url")]
    pub service_url: String,

    pub default_latitude: Option<f64>,
    pub default_longitude: Option<f64>,

    /// Persona tag, e.g. "children" or "elderly".
    pub default_persona: Option<String>,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            default_latitude: None,
            default_longitude: None,
            default_persona: None,
        }
    }
}

impl Config {
    /// Default persona as a strongly-typed `Persona`, falling back to `Persona::default()`.
    pub fn default_persona(&self) -> Result<Persona> {
        match self.default_persona.as_deref() {
            Some(tag) => Persona::try_from(tag).context("Invalid default_persona in config"),
            None => Ok(Persona::default()),
        }
    }

    pub fn set_default_persona(&mut self, persona: Persona) {
        self.default_persona = Some(persona.as_str().to_string());
    }

    pub fn set_default_location(&mut self, latitude: f64, longitude: f64) {
        self.default_latitude = Some(latitude);
        self.default_longitude = Some(longitude);
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.default_persona()?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "airdash", "airdash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
