//! YAML-backed configuration loading.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Errors from reading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Parse a config value from YAML text. Missing fields fall back to the
/// type's serde defaults.
pub fn parse_yaml<T: DeserializeOwned>(text: &str) -> Result<T, ConfigError> {
    Ok(serde_yaml::from_str(text)?)
}

/// Read and parse a YAML config file.
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let value = parse_yaml(&text)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(value)
}

/// Serialize a config value as YAML.
pub fn to_yaml<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameTiming, WindowConfig};

    #[test]
    fn partial_yaml_fills_defaults() {
        let w: WindowConfig = parse_yaml("width: 1920\n").unwrap();
        assert_eq!(w.width, 1920);
        assert_eq!(w.height, 720);
    }

    #[test]
    fn yaml_round_trip() {
        let w = WindowConfig {
            width: 640,
            height: 480,
        };
        let text = to_yaml(&w).unwrap();
        assert!(text.contains("width: 640"));
        assert_eq!(parse_yaml::<WindowConfig>(&text).unwrap(), w);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let r: Result<FrameTiming, _> = parse_yaml("target_fps: [not, a, number]");
        assert!(matches!(r, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let r: Result<WindowConfig, _> = load_yaml("/nonexistent/levelview.yaml");
        assert!(matches!(r, Err(ConfigError::Io(_))));
    }
}
