use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};

pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search APIs, Services, ETL...";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub reply_delay_min_ms: u64,
    pub reply_delay_max_ms: u64,
    pub tick_rate_ms: u64,
    pub start_route: Option<String>,
    pub search_placeholder: String,
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: 500,
            reply_delay_max_ms: 1500,
            tick_rate_ms: 300,
            start_route: None,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            log_filter: None,
        }
    }
}

impl Config {
    /// A missing file yields defaults.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("reading config {}", config_path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("parsing config {}", config_path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// Scripted reply delay, normalized so an inverted range still samples.
    pub fn reply_delay(&self) -> RangeInclusive<u64> {
        let lo = self.reply_delay_min_ms.min(self.reply_delay_max_ms);
        let hi = self.reply_delay_min_ms.max(self.reply_delay_max_ms);
        lo..=hi
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_rate_ms.max(16))
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("myafs").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.reply_delay(), 500..=1500);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "start_route": "/deploy", "tick_rate_ms": 100 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.start_route.as_deref(), Some("/deploy"));
        assert_eq!(config.tick_rate_ms, 100);
        assert_eq!(config.search_placeholder, DEFAULT_SEARCH_PLACEHOLDER);
    }

    #[test]
    fn test_inverted_delay_range_is_normalized() {
        let config = Config {
            reply_delay_min_ms: 900,
            reply_delay_max_ms: 200,
            ..Config::default()
        };
        assert_eq!(config.reply_delay(), 200..=900);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            log_filter: Some("myafs=debug".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
