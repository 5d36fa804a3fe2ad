use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV: &str = "LAUNCH_DASH_CONFIG";
/// Config file picked up from the working directory when the variable is unset.
pub const DEFAULT_CONFIG_FILE: &str = "launch_dash.json";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup configuration. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Heading shown above the charts.
    pub title: String,
    /// Dataset loaded at startup (overridden by the first CLI argument).
    pub dataset_path: PathBuf,
    pub payload_slider: SliderConfig,
    pub window_size: [f32; 2],
}

/// Bounds and step of the payload range slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            title: "SpaceX Launch Records Dashboard".to_string(),
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            payload_slider: SliderConfig::default(),
            window_size: [1200.0, 900.0],
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config")]
    Parse(#[from] serde_json::Error),
    #[error("payload slider needs min < max, got {min}..{max}")]
    SliderBounds { min: f64, max: f64 },
    #[error("payload slider step must be positive, got {0}")]
    SliderStep(f64),
}

impl DashConfig {
    /// Resolve the config: `$LAUNCH_DASH_CONFIG`, then `./launch_dash.json`,
    /// then built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }
        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: DashConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let SliderConfig { min, max, step } = self.payload_slider;
        if !(min < max) {
            return Err(ConfigError::SliderBounds { min, max });
        }
        if !(step > 0.0) {
            return Err(ConfigError::SliderStep(step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_dashboard() {
        let cfg = DashConfig::default();
        assert_eq!(
            cfg.payload_slider,
            SliderConfig {
                min: 0.0,
                max: 10_000.0,
                step: 1_000.0,
            }
        );
        assert_eq!(cfg.dataset_path, PathBuf::from("spacex_launch_dash.csv"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = DashConfig::from_json_str(r#"{"payload_slider": {"max": 16000}}"#).unwrap();
        assert_eq!(cfg.payload_slider.max, 16_000.0);
        assert_eq!(cfg.payload_slider.step, 1_000.0);
        assert_eq!(cfg.title, DashConfig::default().title);
    }

    #[test]
    fn rejects_inverted_slider() {
        let err = DashConfig::from_json_str(r#"{"payload_slider": {"min": 5000, "max": 100}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::SliderBounds { .. }), "{err}");
    }

    #[test]
    fn rejects_zero_step() {
        let err = DashConfig::from_json_str(r#"{"payload_slider": {"step": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::SliderStep(_)), "{err}");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = DashConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DashConfig::from_file(Path::new("/nonexistent/launch_dash.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
