//! Configuration for Buildr.
//!
//! Config is loaded from a YAML file with serde defaults for every section,
//! so a missing or partial file always resolves to a usable configuration.
//! Search order: explicit `--config` path, `./.buildr.yml`, then
//! `~/.config/buildr/buildr.yml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{BuildrError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub build: BuildConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: None,
            llm: LlmConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

/// Model client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-opus-4-5".to_string(),
            max_tokens: 4096,
            timeout_ms: 300000,
        }
    }
}

/// Build loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Iteration budget for one build run
    pub max_iterations: u32,
    /// Pacing delay between model calls, in milliseconds
    pub iteration_delay_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            iteration_delay_ms: 500,
        }
    }
}

impl Config {
    /// Load configuration from the given path, the default search paths, or
    /// fall back to defaults when no file exists.
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        for candidate in Self::search_paths() {
            if candidate.exists() {
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    fn from_file(path: &PathBuf) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| BuildrError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_yaml::from_str(&raw)
            .map_err(|e| BuildrError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".buildr.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("buildr").join("buildr.yml"));
        }
        paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.model, "claude-opus-4-5");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.timeout_ms, 300000);
        assert_eq!(config.build.max_iterations, 15);
        assert_eq!(config.build.iteration_delay_ms, 500);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("llm:\n  model: claude-sonnet-4-5\n").unwrap();
        assert_eq!(config.llm.model, "claude-sonnet-4-5");
        // Unspecified fields fall back to defaults
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.build.max_iterations, 15);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildr.yml");
        fs::write(
            &path,
            "log_level: debug\nbuild:\n  max_iterations: 3\n  iteration_delay_ms: 10\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.build.max_iterations, 3);
        assert_eq!(config.build.iteration_delay_ms, 10);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/nonexistent/buildr.yml");
        let result = Config::load(Some(&path));
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), BuildrError::Config(_)));
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildr.yml");
        fs::write(&path, "llm: [not, a, mapping]").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result.unwrap_err(), BuildrError::Config(_)));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let restored: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(restored.llm.model, config.llm.model);
        assert_eq!(restored.build.max_iterations, config.build.max_iterations);
    }
}
