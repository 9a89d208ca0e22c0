//! Tests for the `Switchboard` facade over a scripted backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use switchboard_core::{
    Config, Error, Function, Presence, Reply, Switchboard, UNSUPPORTED, testing::ScriptedBackend,
};

#[derive(Serialize, Deserialize, JsonSchema)]
struct TranslateParams {
    /// The text to translate
    text: String,
    /// Source language code (e.g. 'tr', 'en')
    from: String,
    /// Target language code (e.g. 'tr', 'en')
    to: String,
}

fn translate() -> Function<TranslateParams, Value> {
    Function::new(
        "translate-agent",
        "Translates text from one language to another",
        |p: TranslateParams| Ok(json!({ "original": p.text, "from": p.from, "to": p.to })),
    )
}

fn reply(agent: &str, parameters: Value) -> Reply {
    let Value::Object(parameters) = parameters else {
        panic!("expected object");
    };
    Reply {
        agent: agent.into(),
        parameters,
    }
}

#[test]
fn system_prompt_registers_fallback_once() {
    let mut board = Switchboard::new(ScriptedBackend::new());
    board.register(translate()).unwrap();

    let text = board.system_prompt(None).unwrap();
    assert!(text.contains("Function: translate-agent"));
    assert!(text.contains("Function: unsupported"));
    assert!(text.contains("message: string [required] (Contains a simple explanation of the error.)"));
    assert_eq!(board.backend().system_prompt(), Some(text.as_str()));

    let again = board.system_prompt(None).unwrap();
    assert_eq!(again, text);
    assert_eq!(board.list().len(), 2);
}

#[test]
fn custom_fallback_is_registered() {
    let mut board = Switchboard::new(ScriptedBackend::new());
    let fallback = Function::with_parameters(
        "no-match",
        "Used when nothing fits",
        Default::default(),
        |_: Map<String, Value>| Ok("sorry"),
    );
    board.system_prompt(Some(Arc::new(fallback))).unwrap();
    assert!(board.get("no-match").is_some());
    assert!(board.get(UNSUPPORTED).is_none());

    let err = board
        .system_prompt(Some(Arc::new(translate())))
        .and_then(|_| board.system_prompt(Some(Arc::new(translate()))))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateName(_)));
}

#[test]
fn execute_accepts_serializable_params() {
    let board = Switchboard::new(ScriptedBackend::new());
    board.register(translate()).unwrap();

    let result = board
        .execute(
            "translate-agent",
            TranslateParams {
                text: "merhaba".into(),
                from: "tr".into(),
                to: "en".into(),
            },
        )
        .unwrap();
    assert_eq!(result["original"], "merhaba");

    let err = board.execute("translate-agent", "not a map").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { ref got, .. } if *got == "string"));

    let err = board.execute("translate-agent", ()).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField(ref f) if f == "from"));
}

#[tokio::test]
async fn generate_and_execute_dispatches_reply() {
    let backend = ScriptedBackend::new().reply(reply(
        "translate-agent",
        json!({ "text": "hello", "from": "en", "to": "tr" }),
    ));
    let mut board = Switchboard::new(backend);
    board.register(translate()).unwrap();
    board.system_prompt(None).unwrap();

    let result = board.generate_and_execute("translate hello to turkish").await.unwrap();
    assert_eq!(result["to"], "tr");
    assert_eq!(board.backend().inputs(), ["translate hello to turkish"]);
}

#[tokio::test]
async fn unsupported_reply_echoes_message() {
    let backend = ScriptedBackend::new().reply(reply(
        UNSUPPORTED,
        json!({ "message": "no agent books flights" }),
    ));
    let mut board = Switchboard::new(backend);
    board.system_prompt(None).unwrap();

    let result = board.generate_and_execute("book a flight").await.unwrap();
    assert_eq!(
        result,
        json!({ "message": "you made an unsupported request: no agent books flights" })
    );
}

#[tokio::test]
async fn backend_failure_surfaces_unmodified() {
    let backend = ScriptedBackend::new().fail(anyhow::anyhow!("connection reset"));
    let board = Switchboard::new(backend);

    let err = board.generate("anything").await.unwrap_err();
    match err {
        Error::Backend(source) => assert_eq!(source.to_string(), "connection reset"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn unknown_agent_in_reply() {
    let backend = ScriptedBackend::new().reply(reply("ghost-agent", json!({})));
    let board = Switchboard::new(backend);

    let err = board.generate_and_execute("boo").await.unwrap_err();
    assert!(matches!(err, Error::FunctionNotFound(ref name) if name == "ghost-agent"));
}

#[test]
fn config_drives_prompt_and_mapper() {
    let config = Config::from_toml(
        r#"
[prompt]
rules = ["Always answer in JSON"]
template = "R:{rules}F:{functions}"

[mapper]
presence = "non_zero"
"#,
    )
    .unwrap();
    assert_eq!(config.mapper.presence, Presence::NonZero);

    let mut board = Switchboard::with_config(ScriptedBackend::new(), config);
    board.register(translate()).unwrap();
    let text = board.system_prompt(None).unwrap();
    assert!(text.starts_with("R:1. Always answer in JSON\nF:Function: translate-agent"));

    let err = board
        .execute("translate-agent", json!({ "text": "", "from": "en", "to": "tr" }))
        .unwrap_err();
    assert!(matches!(err, Error::MissingRequiredField(ref f) if f == "text"));
}

#[test]
fn reply_parse_contract() {
    let parsed = Reply::parse(
        "```json\n{\"agent\": \"weather-agent\", \"parameters\": {\"city\": \"Paris\"}}\n```",
    )
    .unwrap();
    assert_eq!(parsed, reply("weather-agent", json!({ "city": "Paris" })));

    assert!(matches!(Reply::parse("not json"), Err(Error::InvalidReply(_))));
    assert!(matches!(Reply::parse(r#"{"parameters": {}}"#), Err(Error::InvalidReply(_))));
}
