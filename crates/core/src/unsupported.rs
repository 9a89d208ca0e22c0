//! The catch-all agent used when no real agent matches a request.

use crate::Function;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Name of the fallback agent.
pub const UNSUPPORTED: &str = "unsupported";

/// Parameters of the fallback agent.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UnsupportedParams {
    /// Contains a simple explanation of the error.
    pub message: String,
}

/// Response of the fallback agent.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct UnsupportedResponse {
    /// The explanation, echoed back.
    pub message: String,
}

/// Build the default fallback agent.
pub fn unsupported() -> Function<UnsupportedParams, UnsupportedResponse> {
    Function::new(
        UNSUPPORTED,
        "If the user's request doesn't match any of these agents, use the \"unsupported\" agent in your response.",
        |params: UnsupportedParams| {
            Ok(UnsupportedResponse {
                message: format!("you made an unsupported request: {}", params.message),
            })
        },
    )
}
