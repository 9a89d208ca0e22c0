//! Switchboard configuration loaded from TOML.

use crate::{MapperConfig, PromptTemplate};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt rendering settings.
    pub prompt: PromptConfig,
    /// Parameter mapper settings.
    pub mapper: MapperConfig,
}

/// Prompt rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// Decision rules. Empty means the built-in rules.
    pub rules: Vec<String>,
    /// Instruction template override with `{rules}` and `{functions}`
    /// placeholders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PromptTemplate>,
}

impl PromptConfig {
    /// The configured template, or the default one.
    pub fn template(&self) -> PromptTemplate {
        self.template.clone().unwrap_or_default()
    }

    /// The configured rules, `None` when the defaults apply.
    pub fn rules(&self) -> Option<&[String]> {
        (!self.rules.is_empty()).then_some(self.rules.as_slice())
    }
}

impl Config {
    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("failed to parse switchboard config")
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config at {}", path.display()))
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize switchboard config")
    }
}
