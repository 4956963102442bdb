//! Configuration for the benchmark
//!
//! Loaded from a TOML file. The `[eval]` section is handed to the
//! external evaluation runner as-is; the `[paths]` and `[report]`
//! sections drive the reporting pipeline in this crate.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::reporting::ReportOptions;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub eval: EvalConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Options consumed by the external evaluation runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    #[serde(default = "default_models")]
    pub models: Vec<String>,
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default)]
    pub system_message: String,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

/// Benchmark directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
    #[serde(default = "default_images_dir")]
    pub images_dir: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Which report documents to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_true")]
    pub scoreboard: bool,
    #[serde(default = "default_true")]
    pub model_tables: bool,
    #[serde(default = "default_true")]
    pub answer_key: bool,
}

// Default value functions
fn default_true() -> bool {
    true
}
fn default_models() -> Vec<String> {
    [
        "openrouter/openai/gpt-5.2",
        "openrouter/google/gemini-3-pro-preview",
        "openrouter/anthropic/claude-opus-4.5",
        "openrouter/x-ai/grok-4-fast",
        "openrouter/qwen/qwen3-vl-235b-a22b-instruct",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}
fn default_prompt() -> String {
    "What geographical area does this resemble? Answer with only the name of the place."
        .to_string()
}
fn default_max_output_tokens() -> u32 {
    5000
}
fn default_log_dir() -> String {
    "logs".to_string()
}
fn default_images_dir() -> String {
    "images".to_string()
}
fn default_output_dir() -> String {
    "tables".to_string()
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            prompt: default_prompt(),
            system_message: String::new(),
            temperature: 0.0,
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            images_dir: default_images_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            scoreboard: true,
            model_tables: true,
            answer_key: true,
        }
    }
}

impl ReportConfig {
    pub fn to_options(&self) -> ReportOptions {
        ReportOptions {
            scoreboard: self.scoreboard,
            model_tables: self.model_tables,
            answer_key: self.answer_key,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the default config location or fall back to defaults
    pub fn load_or_default() -> Self {
        let config_paths = ["config/geobench.toml", "geobench.toml"];

        for path in &config_paths {
            if let Ok(config) = Self::from_file(path) {
                tracing::info!("Loaded configuration from {}", path);
                return config;
            }
        }

        tracing::info!("Using default configuration");
        Self::default()
    }

    /// Save configuration to a TOML file
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
        fs::write(path, content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.eval.temperature, 0.0);
        assert_eq!(config.eval.max_output_tokens, 5000);
        assert_eq!(config.paths.log_dir, "logs");
        assert!(config.report.scoreboard);
        assert!(!config.eval.models.is_empty());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
[eval]
models = ["openrouter/test/model"]
prompt = "Where is this?"
temperature = 0.2

[paths]
log_dir = "runs"

[report]
answer_key = false
"#;
        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.eval.models, ["openrouter/test/model"]);
        assert_eq!(config.eval.prompt, "Where is this?");
        assert_eq!(config.paths.log_dir, "runs");
        assert_eq!(config.paths.images_dir, "images");
        assert!(config.report.scoreboard);
        assert!(!config.report.answer_key);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config/geobench.toml");

        let mut config = Config::default();
        config.eval.temperature = 0.7;
        config.save_toml(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.eval.temperature, 0.7);
        assert_eq!(reloaded.eval.models, config.eval.models);
    }
}
