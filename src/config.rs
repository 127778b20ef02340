use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for storage keys (`<namespace>-progress`, `<namespace>-theme`).
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
    #[serde(default = "default_search_min_chars")]
    pub search_min_chars: usize,
    #[serde(default = "default_reveal_step_ms")]
    pub reveal_step_ms: u64,
    #[serde(default = "default_reveal_duration_ms")]
    pub reveal_duration_ms: u64,
    /// Header collapses once the focused card is this far down the panel.
    #[serde(default = "default_compact_header_after")]
    pub compact_header_after: usize,
}

fn default_namespace() -> String {
    "html-course".to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coursedeck")
        .to_string_lossy()
        .to_string()
}
fn default_notice_secs() -> u64 {
    3
}
fn default_highlight_ms() -> u64 {
    2000
}
fn default_search_min_chars() -> usize {
    2
}
fn default_reveal_step_ms() -> u64 {
    100
}
fn default_reveal_duration_ms() -> u64 {
    600
}
fn default_compact_header_after() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: default_data_dir(),
            notice_secs: default_notice_secs(),
            highlight_ms: default_highlight_ms(),
            search_min_chars: default_search_min_chars(),
            reveal_step_ms: default_reveal_step_ms(),
            reveal_duration_ms: default_reveal_duration_ms(),
            compact_header_after: default_compact_header_after(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursedeck")
            .join("config.toml")
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Clamp values that would make the UI unusable and restore an empty namespace.
    pub fn validate(&mut self) {
        if self.namespace.trim().is_empty() {
            self.namespace = default_namespace();
        }
        if self.data_dir.trim().is_empty() {
            self.data_dir = default_data_dir();
        }
        self.notice_secs = self.notice_secs.clamp(1, 30);
        self.highlight_ms = self.highlight_ms.clamp(100, 10_000);
        self.search_min_chars = self.search_min_chars.clamp(1, 10);
        self.reveal_step_ms = self.reveal_step_ms.min(1000);
        self.reveal_duration_ms = self.reveal_duration_ms.min(5000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.namespace, "html-course");
        assert_eq!(config.notice_secs, 3);
        assert_eq!(config.highlight_ms, 2000);
        assert_eq!(config.search_min_chars, 2);
        assert_eq!(config.reveal_step_ms, 100);
        assert_eq!(config.reveal_duration_ms, 600);
        assert!(config.data_dir.contains("coursedeck"));
    }

    #[test]
    fn test_config_partial_file_keeps_other_defaults() {
        let toml_str = r#"
namespace = "css-course"
notice_secs = 5
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.namespace, "css-course");
        assert_eq!(config.notice_secs, 5);
        assert_eq!(config.search_min_chars, 2);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.namespace, deserialized.namespace);
        assert_eq!(config.data_dir, deserialized.data_dir);
        assert_eq!(config.highlight_ms, deserialized.highlight_ms);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.namespace = "   ".to_string();
        config.notice_secs = 0;
        config.search_min_chars = 0;
        config.reveal_duration_ms = 60_000;
        config.validate();

        assert_eq!(config.namespace, "html-course");
        assert_eq!(config.notice_secs, 1);
        assert_eq!(config.search_min_chars, 1);
        assert_eq!(config.reveal_duration_ms, 5000);
    }
}
