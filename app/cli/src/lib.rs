//! Switchboard CLI: demo agents, config resolution and a reply-driven
//! REPL on top of `switchboard-core`.

pub use cmd::{Cli, Command, ConfigCommand};

pub mod agents;
pub mod backend;
pub mod cmd;
pub mod config;
pub mod repl;
