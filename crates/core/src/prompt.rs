//! Prompt renderer: the agent catalog as model-facing text.
//!
//! Each agent renders as
//!
//! ```text
//! Function: weather-agent
//! Description: Gets weather information for a city
//! Parameters:
//! 	city: string [required] (The city name)
//! 	address: object (Postal address) {
//! 		zip: string [required] (zip)
//! 	}
//! ```
//!
//! Parameters are listed in name order, agents in the order given.

use crate::{Agent, ParameterSchema, PromptTemplate, SchemaType, template::DEFAULT_RULES};
use std::{fmt::Write, sync::Arc};

/// Render the full instruction prompt with the default template.
///
/// `None` or an empty rule list substitutes the default rules.
pub fn render(agents: &[Arc<dyn Agent>], rules: Option<&[String]>) -> String {
    render_with(&PromptTemplate::default(), agents, rules)
}

/// Render the full instruction prompt with a custom template.
pub fn render_with(
    template: &PromptTemplate,
    agents: &[Arc<dyn Agent>],
    rules: Option<&[String]>,
) -> String {
    template.fill(&render_rules(rules), &catalog(agents))
}

/// Numbered rules block, one rule per line.
pub fn render_rules(rules: Option<&[String]>) -> String {
    match rules {
        Some(rules) if !rules.is_empty() => number(rules),
        _ => number(DEFAULT_RULES),
    }
}

fn number<S: AsRef<str>>(rules: &[S]) -> String {
    let mut out = String::new();
    for (i, rule) in rules.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, rule.as_ref());
    }
    out
}

/// The agent catalog: one block per agent, separated by blank lines.
pub fn catalog(agents: &[Arc<dyn Agent>]) -> String {
    let mut out = String::new();
    for agent in agents {
        let _ = writeln!(out, "Function: {}", agent.name());
        let _ = writeln!(out, "Description: {}", agent.description());
        out.push_str("Parameters:\n");
        for (name, schema) in agent.parameters() {
            render_parameter(&mut out, name, schema, 1);
        }
        out.push('\n');
    }
    out
}

fn render_parameter(out: &mut String, name: &str, schema: &ParameterSchema, depth: usize) {
    let indent = "\t".repeat(depth);
    let required = if schema.required { " [required]" } else { "" };
    let _ = write!(
        out,
        "{indent}{name}: {}{required} ({})",
        schema.ty,
        schema.description_or(name)
    );

    if schema.ty == SchemaType::Object && !schema.properties.is_empty() {
        out.push_str(" {\n");
        for (child, child_schema) in &schema.properties {
            render_parameter(out, child, child_schema, depth + 1);
        }
        let _ = writeln!(out, "{indent}}}");
    } else {
        out.push('\n');
    }
}
