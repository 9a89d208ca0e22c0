//! The instruction template the catalog is embedded into.

use serde::{Deserialize, Serialize};

/// Placeholder replaced with the numbered rules block.
pub const RULES: &str = "{rules}";

/// Placeholder replaced with the agent catalog.
pub const FUNCTIONS: &str = "{functions}";

/// Rules used when the caller supplies none.
pub const DEFAULT_RULES: &[&str] = &[
    "Analyze the user's intent carefully before selecting a function",
    "Only select a function if it clearly matches the user's request",
    "Validate all required parameters before execution",
    "If unsure about any parameter, use the \"unsupported\" function",
    "Consider the context and any previous interactions",
];

const DEFAULT_TEMPLATE: &str = r#"You are a function router. Read the user's request, pick the single
function below that fulfils it, and fill in its parameters.

DECISION RULES:
{rules}
AVAILABLE FUNCTIONS AND PARAMETERS:
{functions}
PARAMETERS:
- Supply every parameter marked [required].
- Use the declared type for each value.
- Nested parameters are listed inside braces and must be sent as JSON objects.

If no function matches the request, answer with the "unsupported" function
and explain why in its "message" parameter.

Respond ONLY with JSON in this shape:
{
    "agent": "function-name",
    "parameters": {
        "param1": "value1"
    }
}"#;

/// An instruction template with a rules slot and a catalog slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Wrap a template. Both placeholders are optional; a missing one is
    /// simply never filled.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        for placeholder in [RULES, FUNCTIONS] {
            if !text.contains(placeholder) {
                tracing::warn!(placeholder, "prompt template has no placeholder");
            }
        }
        Self(text)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute the rules block and the catalog in a single pass, so
    /// placeholder text inside the substituted values is left alone.
    pub fn fill(&self, rules: &str, functions: &str) -> String {
        let mut out = String::with_capacity(self.0.len() + rules.len() + functions.len());
        let mut rest = self.0.as_str();
        loop {
            let next = [(RULES, rules), (FUNCTIONS, functions)]
                .into_iter()
                .filter_map(|(slot, value)| rest.find(slot).map(|at| (at, slot, value)))
                .min_by_key(|(at, ..)| *at);

            let Some((at, slot, value)) = next else {
                out.push_str(rest);
                return out;
            };
            out.push_str(&rest[..at]);
            out.push_str(value);
            rest = &rest[at + slot.len()..];
        }
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_owned())
    }
}
