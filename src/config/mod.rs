use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::algo::AlgoId;

fn default_endpoint() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_speed() -> u8 {
    5
}

fn default_algorithms() -> Vec<AlgoId> {
    vec![AlgoId::Bubble]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the sort service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Animation speed 1-10 (10 is fastest).
    #[serde(default = "default_speed")]
    pub speed: u8,

    /// Algorithms preselected on startup.
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<AlgoId>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            speed: default_speed(),
            algorithms: default_algorithms(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("sortvis");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => return Ok(config.sanitized()),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(&self.clone().sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp out-of-range values instead of failing on a hand-edited file.
    fn sanitized(mut self) -> Self {
        self.speed = self.speed.clamp(1, 10);
        if self.endpoint.trim().is_empty() {
            self.endpoint = default_endpoint();
        }
        self.algorithms.dedup();
        if self.algorithms.is_empty() {
            self.algorithms = default_algorithms();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            endpoint: "http://sorter.local:8080".to_string(),
            speed: 7,
            algorithms: vec![AlgoId::Bubble, AlgoId::Merge],
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.endpoint, deserialized.endpoint);
        assert_eq!(config.speed, deserialized.speed);
        assert_eq!(config.algorithms, deserialized.algorithms);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint, default_endpoint());
        assert_eq!(config.speed, 5);
        assert_eq!(config.algorithms, vec![AlgoId::Bubble]);
    }

    #[test]
    fn test_sanitize_clamps_speed() {
        let config = AppConfig {
            speed: 42,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.speed, 10);
    }
}
