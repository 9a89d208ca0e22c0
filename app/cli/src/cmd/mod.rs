//! CLI argument parsing and command dispatch.

use crate::{agents, backend::ReplyBackend, config::resolve_config, repl::Repl};
use anyhow::Result;
use clap::{Parser, Subcommand};
use sbcore::Switchboard;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod exec;

/// Route model replies to typed agents.
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about = "Route model replies to typed agents")]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the system prompt for the registered agents.
    Catalog,
    /// List registered agents.
    List,
    /// Execute an agent with JSON parameters.
    Exec(exec::Exec),
    /// Dispatch model replies typed or pasted line by line.
    Repl,
    /// Manage the config file.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Config management subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved config file.
    Show,
    /// Write the default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Initialize tracing subscriber based on verbosity.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "info",
                1 => "switchboard_core=debug,switchboard_cli=debug",
                2 => "switchboard_core=trace,switchboard_cli=trace",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Run the selected command.
    pub async fn run(self) -> Result<()> {
        let flag = self.config.as_deref();
        match self.command {
            Command::Catalog => {
                let board = switchboard(flag)?;
                println!("{}", board.backend().system_prompt().unwrap_or_default());
            }
            Command::List => list(&switchboard(flag)?),
            Command::Exec(cmd) => cmd.run(&switchboard(flag)?)?,
            Command::Repl => {
                let mut repl = Repl::new(switchboard(flag)?)?;
                repl.run().await?;
            }
            Command::Config { action } => config::run(&action, flag)?,
        }
        Ok(())
    }
}

/// Build a switchboard with the resolved config and the demo agents, with
/// the system prompt installed.
fn switchboard(flag: Option<&str>) -> Result<Switchboard<ReplyBackend>> {
    let mut board = Switchboard::with_config(ReplyBackend::default(), resolve_config(flag)?);
    agents::register_all(board.registry())?;
    board.system_prompt(None)?;
    Ok(board)
}

fn list(board: &Switchboard<ReplyBackend>) {
    let agents = board.list();
    if agents.is_empty() {
        println!("No agents registered.");
        return;
    }
    let width = agents.iter().map(|a| a.name().len()).max().unwrap_or_default();
    for agent in agents {
        println!("  {:<width$}  {}", agent.name(), agent.description());
    }
}
