//! Error taxonomy for registration, parameter mapping and dispatch.

use crate::SchemaType;
use compact_str::CompactString;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the registry, the parameter mapper and the facade.
///
/// Every variant is returned as a value to the immediate caller. Nothing
/// in the core recovers locally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The agent cannot be registered (empty name).
    #[error("invalid agent: {0}")]
    InvalidAgent(&'static str),

    /// An agent with this name is already registered.
    #[error("agent '{0}' already registered")]
    DuplicateName(CompactString),

    /// No agent is registered under this name.
    #[error("agent '{0}' not found")]
    FunctionNotFound(CompactString),

    /// A required parameter is absent. Nested fields use dotted paths.
    #[error("missing required field '{0}'")]
    MissingRequiredField(String),

    /// A parameter is present but has the wrong JSON kind.
    #[error("field '{field}' expected {expected}, got {got}")]
    TypeMismatch {
        /// Parameter path.
        field: String,
        /// Declared schema type.
        expected: SchemaType,
        /// JSON kind of the supplied value.
        got: &'static str,
    },

    /// The parameters passed validation but serde rejected them.
    #[error("failed to decode parameters: {0}")]
    Decode(#[source] serde_json::Error),

    /// The handler result (or caller parameters) could not be serialized.
    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    /// The handler failed. The original error is kept as the source.
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// The text-generation backend failed.
    #[error("backend failed: {0}")]
    Backend(#[source] anyhow::Error),

    /// The backend reply does not follow the `{agent, parameters}` contract.
    #[error("invalid backend reply: {0}")]
    InvalidReply(#[source] serde_json::Error),
}
