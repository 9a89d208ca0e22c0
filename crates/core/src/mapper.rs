//! Parameter mapper: untyped parameter maps into typed handler input.
//!
//! Keys are matched against the external (serialized) field names, which
//! are also the keys of the agent's [`Parameters`]. Validation walks the
//! schema before serde sees the value, so a missing field or a value of
//! the wrong kind is reported by name instead of as a serde message.

use crate::{Error, Parameters, Result, schema::kind_of};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// When a required parameter counts as missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Missing only when the key is absent or the value is `null`.
    /// `0`, `false` and `""` are legitimate values.
    #[default]
    Explicit,
    /// Missing when absent, `null`, or the zero value of its kind:
    /// `""`, `0`, `false`, `[]` or `{}`. A required field that is
    /// legitimately zero cannot be told apart from an absent one.
    NonZero,
}

impl Presence {
    /// Whether a present value counts as missing under this policy.
    pub fn is_missing(&self, value: &Value) -> bool {
        match self {
            Self::Explicit => value.is_null(),
            Self::NonZero => match value {
                Value::Null => true,
                Value::Bool(b) => !b,
                Value::Number(n) => n.as_f64() == Some(0.0),
                Value::String(s) => s.is_empty(),
                Value::Array(items) => items.is_empty(),
                Value::Object(fields) => fields.is_empty(),
            },
        }
    }
}

/// Parameter mapper settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Required-field presence policy.
    pub presence: Presence,
}

/// Validate `raw` against `parameters` and decode it into `P`.
///
/// Fields absent from `raw`, and optional fields sent as `null`, take
/// their serde default.
pub fn map<P: DeserializeOwned>(
    mut raw: Map<String, Value>,
    parameters: &Parameters,
    config: &MapperConfig,
) -> Result<P> {
    validate(&raw, parameters, config)?;
    drop_optional_nulls(&mut raw, parameters);
    serde_json::from_value(Value::Object(raw)).map_err(Error::Decode)
}

/// Remove `null` values of declared optional parameters, recursing into
/// object parameters.
fn drop_optional_nulls(raw: &mut Map<String, Value>, parameters: &Parameters) {
    for (name, schema) in parameters {
        let Some(value) = raw.get_mut(name.as_str()) else {
            continue;
        };
        if value.is_null() {
            if !schema.required {
                raw.remove(name.as_str());
            }
        } else if let Value::Object(fields) = value {
            drop_optional_nulls(fields, &schema.properties);
        }
    }
}

/// Check required presence and value kinds, recursing into object
/// parameters. Fields are checked in name order, so the first error
/// reported is deterministic.
pub fn validate(
    raw: &Map<String, Value>,
    parameters: &Parameters,
    config: &MapperConfig,
) -> Result<()> {
    validate_at(raw, parameters, config, "")
}

fn validate_at(
    raw: &Map<String, Value>,
    parameters: &Parameters,
    config: &MapperConfig,
    prefix: &str,
) -> Result<()> {
    for (name, schema) in parameters {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}.{name}")
        };

        let value = match raw.get(name.as_str()) {
            None | Some(Value::Null) if schema.required => {
                return Err(Error::MissingRequiredField(path));
            }
            None | Some(Value::Null) => continue,
            Some(value) => value,
        };

        if !schema.ty.accepts(value) {
            return Err(Error::TypeMismatch {
                field: path,
                expected: schema.ty,
                got: kind_of(value),
            });
        }

        if schema.required && config.presence.is_missing(value) {
            return Err(Error::MissingRequiredField(path));
        }

        if let Value::Object(fields) = value {
            validate_at(fields, &schema.properties, config, &path)?;
        }
    }

    tracing::trace!(fields = raw.len(), prefix, "parameters validated");
    Ok(())
}
