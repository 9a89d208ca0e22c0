//! The text-generation backend the switchboard routes through.
//!
//! Backends own the network side: sending the prompt, receiving the model's
//! JSON reply and parsing it into a [`Reply`]. Their failures reach the
//! caller unmodified; nothing here retries.

use crate::{Error, Result};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::future::Future;

/// A model's routing decision: which agent, with which parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Name of the chosen agent.
    pub agent: CompactString,
    /// Raw parameters for the agent.
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl Reply {
    /// Parse a reply from the model's JSON text.
    ///
    /// A surrounding Markdown code fence is stripped first.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(strip_fence(text)).map_err(Error::InvalidReply)
    }
}

fn strip_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(body) = text.strip_prefix("```") else {
        return text;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// A text-generation backend.
pub trait Backend: Send + Sync {
    /// Install the system prompt used for subsequent requests.
    fn set_system_prompt(&mut self, prompt: String);

    /// Ask the model to route `input`.
    fn generate(&self, input: &str) -> impl Future<Output = anyhow::Result<Reply>> + Send;
}
