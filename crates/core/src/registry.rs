//! `Registry`: concurrent-safe name → agent table with dispatch.

use crate::{Agent, Error, MapperConfig, Result};
use compact_str::CompactString;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fmt::{Debug, Formatter},
    sync::Arc,
};

/// A shared handle to a registered agent.
pub type AgentRef = Arc<dyn Agent>;

/// The authoritative name → agent table.
///
/// Lookups and listing take the read lock, registration takes the write
/// lock. `execute` clones the agent handle out of the table and releases
/// the lock before the handler runs, so a slow handler never blocks
/// registration or other lookups. Clones share the same table.
#[derive(Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<Inner>>,
    mapper: MapperConfig,
}

#[derive(Default)]
struct Inner {
    /// Agents in insertion order.
    agents: Vec<AgentRef>,
    /// Name → position in `agents`.
    index: BTreeMap<CompactString, usize>,
}

impl Registry {
    /// Create an empty registry with the default mapper settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given mapper settings.
    pub fn with_mapper(mapper: MapperConfig) -> Self {
        Self {
            inner: Default::default(),
            mapper,
        }
    }

    /// Mapper settings passed to every `invoke`.
    pub fn mapper(&self) -> &MapperConfig {
        &self.mapper
    }

    /// Register an agent.
    pub fn register(&self, agent: impl Agent + 'static) -> Result<()> {
        self.register_shared(Arc::new(agent))
    }

    /// Register an already shared agent.
    ///
    /// Fails with [`Error::InvalidAgent`] for a blank name and with
    /// [`Error::DuplicateName`] when the name is taken. Nothing is
    /// modified on failure.
    pub fn register_shared(&self, agent: AgentRef) -> Result<()> {
        let name = agent.name();
        if name.trim().is_empty() {
            tracing::warn!("rejected agent with empty name");
            return Err(Error::InvalidAgent("agent name cannot be empty"));
        }

        let name = CompactString::from(name);
        let mut inner = self.inner.write();
        if inner.index.contains_key(&name) {
            tracing::warn!(agent = %name, "rejected duplicate agent");
            return Err(Error::DuplicateName(name));
        }

        let position = inner.agents.len();
        inner.agents.push(agent);
        inner.index.insert(name.clone(), position);
        tracing::debug!(agent = %name, "registered agent");
        Ok(())
    }

    /// Remove an agent by name, returning it if it was registered.
    pub fn unregister(&self, name: &str) -> Option<AgentRef> {
        let mut inner = self.inner.write();
        let position = inner.index.remove(name)?;
        let agent = inner.agents.remove(position);
        for slot in inner.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        tracing::debug!(agent = name, "unregistered agent");
        Some(agent)
    }

    /// Look up an agent by name.
    pub fn get(&self, name: &str) -> Option<AgentRef> {
        let inner = self.inner.read();
        inner
            .index
            .get(name)
            .map(|&position| Arc::clone(&inner.agents[position]))
    }

    /// Whether an agent with this name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().index.contains_key(name)
    }

    /// Snapshot of all agents in registration order.
    pub fn list(&self) -> Vec<AgentRef> {
        self.inner.read().agents.clone()
    }

    /// Names of all agents in registration order.
    pub fn names(&self) -> Vec<CompactString> {
        self.inner
            .read()
            .agents
            .iter()
            .map(|agent| CompactString::from(agent.name()))
            .collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.inner.read().agents.len()
    }

    /// Whether no agents are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().agents.is_empty()
    }

    /// Drop every registered agent.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.agents.clear();
        inner.index.clear();
    }

    /// Dispatch `params` to the agent registered under `name`.
    ///
    /// Errors from mapping and from the handler are returned unchanged.
    pub fn execute(&self, name: &str, params: Map<String, Value>) -> Result<Value> {
        let Some(agent) = self.get(name) else {
            tracing::debug!(agent = name, "dispatch to unknown agent");
            return Err(Error::FunctionNotFound(CompactString::from(name)));
        };

        tracing::debug!(agent = name, params = params.len(), "dispatching");
        agent.invoke(params, &self.mapper)
    }
}

impl Debug for Registry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Registry")
            .field("agents", &inner.index.keys().collect::<Vec<_>>())
            .field("mapper", &self.mapper)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Function, ParameterSchema, Parameters};

    fn noop(name: &str) -> Function<Map<String, Value>, Value> {
        Function::with_parameters(name, "", Parameters::new(), |_| Ok(Value::Null))
    }

    #[test]
    fn unregister_keeps_index_consistent() {
        let registry = Registry::new();
        for name in ["a", "b", "c"] {
            registry.register(noop(name)).unwrap();
        }

        assert!(registry.unregister("a").is_some());
        assert!(registry.unregister("a").is_none());
        assert_eq!(registry.names(), ["b", "c"]);
        assert_eq!(registry.get("c").unwrap().name(), "c");

        registry.register(noop("a")).unwrap();
        assert_eq!(registry.names(), ["b", "c", "a"]);
    }

    #[test]
    fn blank_name_rejected() {
        let registry = Registry::new();
        let err = registry.register(noop("  ")).unwrap_err();
        assert!(matches!(err, Error::InvalidAgent(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn clones_share_the_table() {
        let registry = Registry::new();
        let other = registry.clone();
        other
            .register(noop("x").parameter("a", ParameterSchema::string("")))
            .unwrap();
        assert!(registry.contains("x"));
        registry.clear();
        assert!(other.is_empty());
    }
}
