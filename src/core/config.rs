use crate::core::resolver::Strategy;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

fn default_precision() -> usize {
    4
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Catalog used when no path is passed on the command line
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            catalog_path: None,
            strategy: Strategy::default(),
            precision: default_precision(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "sharefinder", "sharefinder")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Picks the catalog path given on the command line over the configured
    /// one.
    pub fn catalog_path(&self, cli_path: Option<&str>) -> Result<PathBuf> {
        cli_path
            .or(self.catalog_path.as_deref())
            .map(PathBuf::from)
            .context("No fund catalog given; pass --catalog or set catalog_path in the config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
catalog_path: "/data/funds.json"
strategy: memoized
precision: 2
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.catalog_path.as_deref(), Some("/data/funds.json"));
        assert_eq!(config.strategy, Strategy::Memoized);
        assert_eq!(config.precision, 2);

        let config: AppConfig = serde_yaml::from_str("catalog_path: ~\n").unwrap();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.strategy, Strategy::Trampoline);
        assert_eq!(config.precision, 4);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("strategy: bfs\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_path_precedence() {
        let config = AppConfig {
            catalog_path: Some("configured.json".to_string()),
            ..AppConfig::default()
        };
        assert_eq!(
            config.catalog_path(Some("cli.json")).unwrap(),
            PathBuf::from("cli.json")
        );
        assert_eq!(
            config.catalog_path(None).unwrap(),
            PathBuf::from("configured.json")
        );

        let err = AppConfig::default().catalog_path(None).unwrap_err();
        assert!(err.to_string().contains("--catalog"));
    }
}
