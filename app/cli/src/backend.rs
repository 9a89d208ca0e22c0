//! A backend that reads each input as the model's reply.
//!
//! Stands in for a hosted model: input is parsed with the same
//! `{"agent": .., "parameters": ..}` contract a model reply follows, so
//! recorded replies can be replayed through the registry.

use sbcore::{Backend, Reply};

/// Parses input as a routing reply.
#[derive(Debug, Default)]
pub struct ReplyBackend {
    system_prompt: Option<String>,
}

impl ReplyBackend {
    /// The installed system prompt.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }
}

impl Backend for ReplyBackend {
    fn set_system_prompt(&mut self, prompt: String) {
        self.system_prompt = Some(prompt);
    }

    async fn generate(&self, input: &str) -> anyhow::Result<Reply> {
        Ok(Reply::parse(input)?)
    }
}
