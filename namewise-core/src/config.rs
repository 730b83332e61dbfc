use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Directory (relative to the working directory) holding `config.toml`
pub const CONFIG_DIR: &str = ".namewise";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub rules: RulesConfig,

    #[serde(default)]
    pub morphology: MorphologyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default output format: "summary", "table" or "json"
    #[serde(default = "default_output")]
    pub output_format: String,

    /// Compare collection suffixes case-sensitively
    #[serde(default)]
    pub case_sensitive: bool,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_format: default_output(),
            case_sensitive: false,
            use_color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RulesConfig {
    /// Rule ids that are never evaluated
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MorphologyConfig {
    /// Collection suffixes tried after the built-in ones
    #[serde(default)]
    pub extra_collection_suffixes: Vec<String>,

    /// Names that are never pluralized
    #[serde(default)]
    pub extra_allowed_names: Vec<String>,

    /// Abbreviation -> expansion, overriding the built-in table
    #[serde(default)]
    pub abbreviations: BTreeMap<String, String>,
}

fn default_output() -> String {
    "summary".to_string()
}

impl Config {
    /// Load config from .namewise/config.toml if it exists
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join(CONFIG_DIR).join("config.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
