use anyhow::{Context, Result, anyhow, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{location::LocationRegistry, model::Location};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_HISTORY_URL: &str = "https://api.open-meteo.com/v1/history";

/// Where the forecast and history requests are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub forecast_url: String,
    pub history_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            history_url: DEFAULT_HISTORY_URL.to_string(),
        }
    }
}

/// Settings for the shared HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request deadline, in seconds.
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: concat!("meteo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Reject settings that would make every request fail immediately.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.timeout_secs > 0, "http.timeout_secs must be at least 1 second");
        ensure!(
            self.connect_timeout_secs > 0,
            "http.connect_timeout_secs must be at least 1 second"
        );
        Ok(())
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [endpoints]
/// forecast_url = "https://api.open-meteo.com/v1/forecast"
///
/// [http]
/// timeout_secs = 15
///
/// [[locations]]
/// name = "CityA"
/// latitude = 35.0
/// longitude = -78.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub endpoints: EndpointConfig,
    pub http: HttpConfig,

    /// Seed locations loaded into the registry at startup. Never written back by the program.
    pub locations: Vec<Location>,
}

impl Config {
    /// Load config from the platform location, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from `path`, or return defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.http
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Build a registry pre-populated with the configured seed locations.
    pub fn location_registry(&self) -> LocationRegistry {
        self.locations.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.endpoints.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(cfg.http.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[http]\ntimeout_secs = 5\n\n[[locations]]\nname = \"CityA\"\nlatitude = 35.0\nlongitude = -78.0\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.http.timeout_secs, 5);
        assert_eq!(cfg.http.connect_timeout_secs, 10);
        assert_eq!(cfg.endpoints.history_url, DEFAULT_HISTORY_URL);
        assert_eq!(cfg.locations, vec![Location::new("CityA", 35.0, -78.0)]);
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.endpoints.forecast_url = "http://localhost:8080/forecast".into();
        cfg.http.timeout_secs = 3;
        cfg.locations.push(Location::new("Oslo", 59.91, 10.75));

        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[http\ntimeout_secs = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn seed_locations_populate_registry_in_order() {
        let cfg = Config {
            locations: vec![Location::new("A", 1.0, 1.0), Location::new("B", 2.0, 2.0)],
            ..Config::default()
        };

        let registry = cfg.location_registry();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.list().unwrap()[1].name(), "B");
    }

    #[test]
    fn zero_timeouts_are_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        for body in ["[http]\ntimeout_secs = 0\n", "[http]\nconnect_timeout_secs = 0\n"] {
            fs::write(&path, body).unwrap();

            let err = Config::load_from(&path).unwrap_err();
            assert!(err.to_string().contains("Invalid config file"));
            assert!(format!("{err:#}").contains("must be at least 1 second"));
        }
    }

    #[test]
    fn default_http_settings_are_valid() {
        assert!(HttpConfig::default().validate().is_ok());
    }
}
