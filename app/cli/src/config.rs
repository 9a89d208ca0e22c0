//! Configuration resolution for the CLI.
//!
//! Resolves config.toml in priority order:
//! 1. `--config <path>` flag (explicit override)
//! 2. `{cwd}/.switchboard/config.toml` (workspace config)
//! 3. `~/.config/switchboard/config.toml` (global default)
//!
//! If the global default doesn't exist, it is generated automatically.

use anyhow::{Context, Result};
use sbcore::Config;
use std::path::{Path, PathBuf};

/// Default config generated when no config exists.
pub const DEFAULT_CONFIG: &str = r#"# Switchboard configuration.

[prompt]
# Decision rules listed in the system prompt. Empty uses the built-in rules.
rules = []

# Instruction template override. Use the {rules} and {functions}
# placeholders where the rules and the agent catalog belong.
# template = """..."""

[mapper]
# When a required parameter counts as missing:
#   "explicit"  key absent or null
#   "non_zero"  also "", 0, false, [] and {}
presence = "explicit"
"#;

/// Resolve the config following the priority chain.
pub fn resolve_config(flag: Option<&str>) -> Result<Config> {
    // 1. Explicit --config flag.
    if let Some(path) = flag {
        return Config::load(path).with_context(|| format!("failed to load config from {path}"));
    }

    // 2. Workspace config.
    let workspace_path = workspace_config_path();
    if workspace_path.exists() {
        return Config::load(&workspace_path)
            .context("failed to load workspace config from .switchboard/config.toml");
    }

    // 3. Global default, generated on first use.
    let global_path = global_config_path();
    if !global_path.exists() {
        write_default_config(&global_path, false)?;
        tracing::info!("generated default config at {}", global_path.display());
    }
    Config::load(&global_path).context("failed to load global config")
}

/// The file `resolve_config` reads, or would generate.
pub fn resolve_config_path(flag: Option<&str>) -> PathBuf {
    if let Some(path) = flag {
        return PathBuf::from(path);
    }
    let workspace_path = workspace_config_path();
    if workspace_path.exists() {
        return workspace_path;
    }
    global_config_path()
}

/// Write [`DEFAULT_CONFIG`] to `path`, creating parent directories.
///
/// Fails when the file exists and `force` is not set.
pub fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config to {}", path.display()))
}

fn workspace_config_path() -> PathBuf {
    PathBuf::from(".switchboard").join("config.toml")
}

fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("switchboard")
        .join("config.toml")
}
