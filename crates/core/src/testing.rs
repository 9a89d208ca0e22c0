//! Scripted backend for tests.
//!
//! Returns queued replies in order and records the installed system
//! prompt. Never touches the network.

use crate::{Backend, Reply};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A backend that replays scripted replies.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<anyhow::Result<Reply>>>,
    inputs: Mutex<Vec<String>>,
    system_prompt: Option<String>,
}

impl ScriptedBackend {
    /// Create a backend with no scripted replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().push_back(Ok(reply));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: anyhow::Error) -> Self {
        self.replies.lock().push_back(Err(error));
        self
    }

    /// The last installed system prompt.
    pub fn system_prompt(&self) -> Option<&str> {
        self.system_prompt.as_deref()
    }

    /// Inputs received by `generate`, in order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().clone()
    }
}

impl Backend for ScriptedBackend {
    fn set_system_prompt(&mut self, prompt: String) {
        self.system_prompt = Some(prompt);
    }

    async fn generate(&self, input: &str) -> anyhow::Result<Reply> {
        self.inputs.lock().push(input.to_owned());
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("response not generated")))
    }
}
