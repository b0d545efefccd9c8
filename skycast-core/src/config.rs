use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable holding the weatherapi.com key. Wins over the config file.
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// City shown on startup and used when location lookup fails.
pub const DEFAULT_CITY: &str = "Surat";

/// How the "use my location" control obtains coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationMode {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// Coordinates taken from `latitude` / `longitude` below.
    Fixed,
    /// Location lookup is treated as unsupported.
    Disabled,
}

impl GeolocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeolocationMode::Ip => "ip",
            GeolocationMode::Fixed => "fixed",
            GeolocationMode::Disabled => "disabled",
        }
    }

    pub const fn all() -> &'static [GeolocationMode] {
        &[
            GeolocationMode::Ip,
            GeolocationMode::Fixed,
            GeolocationMode::Disabled,
        ]
    }
}

impl std::fmt::Display for GeolocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub mode: GeolocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_city = "Surat"
/// fallback_city = "Surat"
///
/// [geolocation]
/// mode = "fixed"
/// latitude = 21.17
/// longitude = 72.83
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub default_city: String,
    pub fallback_city: String,
    pub geolocation: GeolocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: DEFAULT_CITY.to_string(),
            fallback_city: DEFAULT_CITY.to_string(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory and apply environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_env(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Override file values with environment values. Blank values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
    }

    /// Returns the API key, or an error with a hint on how to set one.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No weather API key configured.\n\
                     Hint: set {API_KEY_ENV} or run `skycast configure` and enter your weatherapi.com key."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        let key = api_key.trim().to_string();
        self.api_key = if key.is_empty() { None } else { Some(key) };
    }

    /// Fixed coordinates, present only when both latitude and longitude are set.
    pub fn fixed_coordinates(&self) -> Option<(f64, f64)> {
        match (self.geolocation.latitude, self.geolocation.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}
