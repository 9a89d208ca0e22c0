//! One-shot agent execution.

use anyhow::{Context, Result};
use clap::Args;
use sbcore::{Backend, Switchboard};
use serde_json::{Map, Value};

/// Execute an agent with JSON parameters.
#[derive(Args, Debug)]
pub struct Exec {
    /// Agent name.
    pub agent: String,

    /// Parameters as a JSON object.
    #[arg(default_value = "{}")]
    pub params: String,
}

impl Exec {
    /// Execute the agent and print its result as JSON.
    pub fn run<B: Backend>(self, board: &Switchboard<B>) -> Result<()> {
        let params: Map<String, Value> =
            serde_json::from_str(&self.params).context("parameters must be a JSON object")?;
        let result = board.execute(&self.agent, params)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        Ok(())
    }
}
