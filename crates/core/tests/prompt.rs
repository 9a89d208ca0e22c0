//! Tests for catalog and prompt rendering.

use serde_json::{Map, Value};
use switchboard_core::{
    Function, ParameterSchema, Parameters, PromptTemplate, Registry,
    prompt::{self, catalog},
};

fn agent(name: &str, description: &str, parameters: Parameters) -> Function<Map<String, Value>, Value> {
    Function::with_parameters(name, description, parameters, |params| Ok(Value::Object(params)))
}

fn populate(registry: &Registry) {
    registry
        .register(agent(
            "weather-agent",
            "Gets weather information for a specified city",
            Parameters::from([(
                "city".into(),
                ParameterSchema::string("The name of the city").required(),
            )]),
        ))
        .unwrap();
    registry
        .register(agent(
            "shipping-agent",
            "Ships a parcel",
            Parameters::from([
                (
                    "address".into(),
                    ParameterSchema::object(
                        "Destination",
                        [("zip", ParameterSchema::string("").required())],
                    )
                    .required(),
                ),
                ("express".into(), ParameterSchema::boolean("Next-day delivery")),
            ]),
        ))
        .unwrap();
}

#[test]
fn catalog_layout() {
    let registry = Registry::new();
    populate(&registry);

    let expected = "\
Function: weather-agent
Description: Gets weather information for a specified city
Parameters:
\tcity: string [required] (The name of the city)

Function: shipping-agent
Description: Ships a parcel
Parameters:
\taddress: object [required] (Destination) {
\t\tzip: string [required] (zip)
\t}
\texpress: boolean (Next-day delivery)

";
    assert_eq!(catalog(&registry.list()), expected);
}

#[test]
fn nested_block_closes_at_opening_indent() {
    let registry = Registry::new();
    registry
        .register(agent(
            "deep",
            "Nested parameters",
            Parameters::from([(
                "outer".into(),
                ParameterSchema::object(
                    "",
                    [(
                        "inner",
                        ParameterSchema::object("", [("zip", ParameterSchema::string("").required())]),
                    )],
                ),
            )]),
        ))
        .unwrap();

    let text = catalog(&registry.list());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        &lines[3..8],
        [
            "\touter: object (outer) {",
            "\t\tinner: object (inner) {",
            "\t\t\tzip: string [required] (zip)",
            "\t\t}",
            "\t}",
        ]
    );
}

#[test]
fn render_is_deterministic_across_registries() {
    let first = Registry::new();
    populate(&first);
    let rendered = prompt::render(&first.list(), None);

    let second = Registry::new();
    for agent in first.list() {
        second.register_shared(agent).unwrap();
    }
    assert_eq!(prompt::render(&second.list(), None), rendered);

    let third = Registry::new();
    populate(&third);
    assert_eq!(prompt::render(&third.list(), None), rendered);
}

#[test]
fn render_fills_both_slots() {
    let registry = Registry::new();
    populate(&registry);

    let rules = vec!["Prefer the weather agent".to_owned()];
    let text = prompt::render(&registry.list(), Some(rules.as_slice()));
    assert!(text.contains("1. Prefer the weather agent\n"));
    assert!(!text.contains("Analyze the user's intent"));
    assert!(text.contains("Function: shipping-agent"));
    assert!(!text.contains("{rules}"));
    assert!(!text.contains("{functions}"));
}

#[test]
fn render_default_rules() {
    let text = prompt::render(&[], None);
    assert!(text.contains("1. Analyze the user's intent carefully"));
    assert!(text.contains("5. Consider the context"));
}

#[test]
fn custom_template() {
    let registry = Registry::new();
    populate(&registry);

    let template = PromptTemplate::new("RULES\n{rules}CATALOG\n{functions}END");
    let text = prompt::render_with(&template, &registry.list()[..1], Some(&["one".to_owned()][..]));
    assert_eq!(
        text,
        "RULES\n1. one\nCATALOG\nFunction: weather-agent\nDescription: Gets weather information for a specified city\nParameters:\n\tcity: string [required] (The name of the city)\n\nEND"
    );
}

#[test]
fn substituted_text_is_not_rescanned() {
    let template = PromptTemplate::new("{functions}|{rules}");
    assert_eq!(template.fill("{functions}", "{rules}"), "{rules}|{functions}");
}
