//! `Switchboard`: the registry, the prompt and a backend wired together.

use crate::{
    Agent, AgentRef, Backend, Config, Error, Registry, Reply, Result, SchemaType, prompt,
    schema::kind_of, unsupported,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Routes natural-language input to registered agents through a backend.
pub struct Switchboard<B> {
    backend: B,
    registry: Registry,
    config: Config,
}

impl<B: Backend> Switchboard<B> {
    /// Create a switchboard with the default config.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, Config::default())
    }

    /// Create a switchboard with the given config.
    pub fn with_config(backend: B, config: Config) -> Self {
        Self {
            backend,
            registry: Registry::with_mapper(config.mapper),
            config,
        }
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The active config.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Register an agent.
    pub fn register(&self, agent: impl Agent + 'static) -> Result<()> {
        self.registry.register(agent)
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<AgentRef> {
        self.registry.get(name)
    }

    /// All registered agents in registration order.
    pub fn list(&self) -> Vec<AgentRef> {
        self.registry.list()
    }

    /// Execute an agent with any serializable parameters.
    ///
    /// `params` must serialize to a JSON object (or `null`, meaning no
    /// parameters).
    pub fn execute(&self, name: &str, params: impl Serialize) -> Result<Value> {
        let params = match serde_json::to_value(params).map_err(Error::Encode)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::TypeMismatch {
                    field: "parameters".into(),
                    expected: SchemaType::Object,
                    got: kind_of(&other),
                });
            }
        };
        self.registry.execute(name, params)
    }

    /// Render the system prompt and install it on the backend.
    ///
    /// `fallback` is registered first when given. Otherwise the built-in
    /// `unsupported` agent is registered unless an agent with that name
    /// already exists. Returns the rendered prompt.
    pub fn system_prompt(&mut self, fallback: Option<AgentRef>) -> Result<String> {
        match fallback {
            Some(agent) => self.registry.register_shared(agent)?,
            None if !self.registry.contains(unsupported::UNSUPPORTED) => {
                self.registry.register(unsupported::unsupported())?
            }
            None => {}
        }

        let agents = self.registry.list();
        let text = prompt::render_with(
            &self.config.prompt.template(),
            &agents,
            self.config.prompt.rules(),
        );
        tracing::debug!(agents = agents.len(), bytes = text.len(), "system prompt rendered");
        self.backend.set_system_prompt(text.clone());
        Ok(text)
    }

    /// Ask the backend to route `input`.
    pub async fn generate(&self, input: &str) -> Result<Reply> {
        self.backend.generate(input).await.map_err(Error::Backend)
    }

    /// Route `input` through the backend and execute the chosen agent.
    pub async fn generate_and_execute(&self, input: &str) -> Result<Value> {
        let reply = self.generate(input).await?;
        tracing::debug!(agent = %reply.agent, "backend selected agent");
        self.registry.execute(&reply.agent, reply.parameters)
    }
}
