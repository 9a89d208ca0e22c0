//! Agents: named, independently invocable units of business logic.
//!
//! The [`Agent`] trait is the uniform shape the registry dispatches on:
//! name, description, parameters, and `invoke` over an untyped map.
//! [`Function`] implements it for a strongly-typed handler, mapping the
//! raw parameters into the handler's input type before calling it.

use crate::{Error, MapperConfig, ParameterSchema, Parameters, Result, mapper};
use compact_str::CompactString;
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

/// A registered callable unit.
///
/// Accessors are pure. `invoke` maps the raw parameters and runs the
/// handler; side effects belong to the handler alone.
pub trait Agent: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// Parameter schemas keyed by external field name.
    fn parameters(&self) -> &Parameters;

    /// Map `params` and run the handler.
    fn invoke(&self, params: Map<String, Value>, config: &MapperConfig) -> Result<Value>;
}

/// A type-erased typed handler.
pub type Handler<P, R> = Arc<dyn Fn(P) -> anyhow::Result<R> + Send + Sync>;

/// An [`Agent`] backed by a handler with typed input `P` and output `R`.
pub struct Function<P, R> {
    name: CompactString,
    description: String,
    parameters: Parameters,
    handler: Handler<P, R>,
}

impl<P, R> Function<P, R>
where
    P: JsonSchema + DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    /// Create a function whose parameters are derived from `P`.
    pub fn new<F>(name: impl Into<CompactString>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(P) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self::with_parameters(name, description, ParameterSchema::derive::<P>(), handler)
    }
}

impl<P, R> Function<P, R>
where
    P: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    /// Create a function with explicitly declared parameters.
    ///
    /// Used for map-shaped handlers (`P = Map<String, Value>`) and
    /// for types without a derived schema.
    pub fn with_parameters<F>(
        name: impl Into<CompactString>,
        description: impl Into<String>,
        parameters: Parameters,
        handler: F,
    ) -> Self
    where
        F: Fn(P) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            handler: Arc::new(handler),
        }
    }

    /// Add or replace a single parameter.
    pub fn parameter(mut self, name: impl Into<CompactString>, schema: ParameterSchema) -> Self {
        self.parameters.insert(name.into(), schema);
        self
    }

    /// Call the handler directly with typed input, skipping mapping.
    pub fn call(&self, params: P) -> anyhow::Result<R> {
        (self.handler)(params)
    }
}

impl<P, R> Agent for Function<P, R>
where
    P: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    fn invoke(&self, params: Map<String, Value>, config: &MapperConfig) -> Result<Value> {
        let input: P = mapper::map(params, &self.parameters, config)?;
        let output = (self.handler)(input).map_err(Error::Handler)?;
        serde_json::to_value(output).map_err(Error::Encode)
    }
}

impl<P, R> Clone for Function<P, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<P, R> Debug for Function<P, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters.keys().collect::<Vec<_>>())
            .finish()
    }
}
