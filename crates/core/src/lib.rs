//! Switchboard core: a typed function registry for LLM-routed agents.
//!
//! Agents are registered with a parameter schema, the registry renders
//! them into a catalog for the model prompt, and the model's reply (an
//! agent name plus raw JSON parameters) is dispatched back through the
//! registry, which validates the parameters and calls the typed handler.
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard_core::{Function, Registry};
//!
//! #[derive(serde::Deserialize, schemars::JsonSchema)]
//! struct Weather {
//!     /// The city to report on
//!     city: String,
//! }
//!
//! let registry = Registry::new();
//! registry.register(Function::new("weather-agent", "Weather by city", |p: Weather| {
//!     Ok(serde_json::json!({ "city": p.city }))
//! }))?;
//! let result = registry.execute("weather-agent", params)?;
//! ```

pub use {
    agent::{Agent, Function, Handler},
    backend::{Backend, Reply},
    config::{Config, PromptConfig},
    error::{Error, Result},
    mapper::{MapperConfig, Presence},
    registry::{AgentRef, Registry},
    schema::{ParameterSchema, Parameters, SchemaType},
    switchboard::Switchboard,
    template::PromptTemplate,
    unsupported::{UNSUPPORTED, UnsupportedParams, UnsupportedResponse, unsupported},
};

mod agent;
mod backend;
mod config;
mod error;
pub mod mapper;
pub mod prompt;
mod registry;
pub mod schema;
mod switchboard;
pub mod template;
#[cfg(feature = "testing")]
pub mod testing;
mod unsupported;
