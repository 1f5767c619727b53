use anyhow::{Context, Result, bail};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::smart_load;
use crate::pipeline::PipelineConfig;
use crate::scan::ScannerConfig;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

pub const ENV_PREFIX: &str = "WORDTALLY_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Report rendering settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Length of the most-frequent-words list (0 = omit)
    pub top_words: usize,
    pub format: OutputFormat,
}

/// Fully merged configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WordtallyConfig {
    pub scanner: ScannerConfig,
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
}

impl WordtallyConfig {
    pub fn load() -> Result<Self> {
        Self::load_with(None, None::<()>)
    }

    /// Load every layer, then `custom_config` and `overrides` on top
    pub fn load_with<T: Serialize>(custom_config: Option<&str>, overrides: Option<T>) -> Result<Self> {
        let figment = Self::figment(custom_config, overrides)?;
        figment.extract().context("Invalid configuration")
    }

    /// Build the layered figment without extracting it
    pub fn figment<T: Serialize>(custom_config: Option<&str>, overrides: Option<T>) -> Result<Figment> {
        let user_config = Self::user_config_path();

        let mut figment = Figment::new()
            .merge(Toml::string(DEFAULT_CONFIG))
            // User config - support multiple formats
            .merge(Toml::file(&user_config))
            .merge(Json::file(user_config.replace(".toml", ".json")))
            .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
            // Repository config
            .merge(Toml::file("wordtally.toml"))
            .merge(Json::file("wordtally.json"))
            .merge(Yaml::file("wordtally.yaml"))
            .merge(Yaml::file("wordtally.yml"));

        if let Some(custom_path) = custom_config {
            if !Path::new(custom_path).is_file() {
                bail!("Config file not found: {custom_path}");
            }
            tracing::debug!("Loading custom config {custom_path}");
            figment = figment.merge(smart_load::auto(custom_path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(overrides) = overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        Ok(figment)
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/wordtally/config.toml"),
            Err(_) => "~/.config/wordtally/config.toml".to_string(),
        }
    }
}
