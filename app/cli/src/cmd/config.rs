//! Config management commands: show, init.

use crate::{
    cmd::ConfigCommand,
    config::{resolve_config_path, write_default_config},
};
use anyhow::{Context, Result};

/// Dispatch config management subcommands.
pub fn run(action: &ConfigCommand, flag: Option<&str>) -> Result<()> {
    let path = resolve_config_path(flag);
    match action {
        ConfigCommand::Show => {
            if !path.exists() {
                println!("No config file at {}", path.display());
                return Ok(());
            }
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            println!("# {}", path.display());
            print!("{contents}");
        }
        ConfigCommand::Init { force } => {
            write_default_config(&path, *force)?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}
