//! Parameter schema types.
//!
//! A [`ParameterSchema`] describes one named parameter of an agent: its
//! type tag, a description shown to the model, whether it is required and,
//! for `object` parameters, the schemas of its children.

use compact_str::CompactString;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

/// Parameter name → schema. Ordered so rendering is deterministic.
pub type Parameters = BTreeMap<CompactString, ParameterSchema>;

/// The type tag of a parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// A JSON string.
    #[default]
    String,
    /// Any JSON number, integer or float.
    Number,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
    /// A nested parameter group.
    Object,
}

impl SchemaType {
    /// Lowercase tag as it appears in prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Whether a JSON value has the kind this tag declares.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
        }
    }

    /// Map a JSON schema `type` keyword to a tag.
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "string" => Some(Self::String),
            "integer" | "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            _ => None,
        }
    }
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON kind of a value, used in type mismatch errors.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Schema of a single parameter.
///
/// `properties` is only populated for [`SchemaType::Object`]; the
/// constructors keep that invariant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// The type tag.
    #[serde(rename = "type")]
    pub ty: SchemaType,

    /// Free text shown to the model.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,

    /// Child parameters of an object parameter.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: Parameters,
}

impl ParameterSchema {
    fn of(ty: SchemaType, description: impl Into<String>) -> Self {
        Self {
            ty,
            description: description.into(),
            ..Default::default()
        }
    }

    /// A string parameter.
    pub fn string(description: impl Into<String>) -> Self {
        Self::of(SchemaType::String, description)
    }

    /// A numeric parameter.
    pub fn number(description: impl Into<String>) -> Self {
        Self::of(SchemaType::Number, description)
    }

    /// A boolean parameter.
    pub fn boolean(description: impl Into<String>) -> Self {
        Self::of(SchemaType::Boolean, description)
    }

    /// An array parameter.
    pub fn array(description: impl Into<String>) -> Self {
        Self::of(SchemaType::Array, description)
    }

    /// An object parameter with the given children.
    pub fn object<K>(
        description: impl Into<String>,
        properties: impl IntoIterator<Item = (K, ParameterSchema)>,
    ) -> Self
    where
        K: Into<CompactString>,
    {
        Self {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name.into(), schema))
                .collect(),
            ..Self::of(SchemaType::Object, description)
        }
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// The description, or `name` when none was given.
    pub fn description_or<'a>(&'a self, name: &'a str) -> &'a str {
        if self.description.is_empty() {
            name
        } else {
            &self.description
        }
    }

    /// Derive the parameter map of `T` from its JSON schema.
    ///
    /// Runs once, when an agent is built. Doc comments become
    /// descriptions, the schema's `required` list sets the required flags,
    /// nested structs become object parameters and `Option<T>` unwraps to
    /// `T`. Types that are not objects derive an empty map. A type that
    /// contains itself is expanded once; the inner occurrence is an
    /// `object` with no properties.
    pub fn derive<T: JsonSchema>() -> Parameters {
        let schema = schemars::schema_for!(T);
        let root = schema.as_value();
        let defs = root.get("$defs");
        let mut path = Vec::new();
        let (node, _) = resolve(root, defs, &mut path);
        derive_properties(node, defs, &mut path)
    }
}

/// `path` holds the `$defs` names currently being expanded.
fn derive_properties<'a>(
    node: &'a Value,
    defs: Option<&'a Value>,
    path: &mut Vec<&'a str>,
) -> Parameters {
    let required: Vec<&str> = node
        .get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let Some(properties) = node.get("properties").and_then(Value::as_object) else {
        return Parameters::new();
    };

    properties
        .iter()
        .map(|(name, prop)| {
            let schema = derive_schema(prop, required.contains(&name.as_str()), defs, path);
            (CompactString::from(name.as_str()), schema)
        })
        .collect()
}

fn derive_schema<'a>(
    prop: &'a Value,
    required: bool,
    defs: Option<&'a Value>,
    path: &mut Vec<&'a str>,
) -> ParameterSchema {
    let depth = path.len();
    let (resolved, cyclic) = resolve(prop, defs, path);
    let description = prop
        .get("description")
        .or_else(|| resolved.get("description"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned();

    let ty = type_of(resolved);
    let properties = match ty {
        SchemaType::Object if !cyclic => derive_properties(resolved, defs, path),
        _ => Parameters::new(),
    };
    path.truncate(depth);

    ParameterSchema {
        ty,
        description,
        required,
        properties,
    }
}

/// Follow `$ref` into `$defs` and unwrap single-variant `allOf` and
/// nullable `anyOf`/`oneOf` wrappers.
///
/// Followed names are pushed onto `path`. Returns `true` alongside the
/// node when a name already on `path` is reached again.
fn resolve<'a>(
    mut node: &'a Value,
    defs: Option<&'a Value>,
    path: &mut Vec<&'a str>,
) -> (&'a Value, bool) {
    loop {
        let target = node
            .get("$ref")
            .and_then(Value::as_str)
            .and_then(|r| r.strip_prefix("#/$defs/"))
            .and_then(|name| Some((name, defs?.get(name)?)));
        if let Some((name, target)) = target {
            if path.contains(&name) {
                return (target, true);
            }
            path.push(name);
            node = target;
            continue;
        }

        let variants = ["allOf", "anyOf", "oneOf"]
            .into_iter()
            .find_map(move |keyword| node.get(keyword))
            .and_then(Value::as_array);
        if let Some(variants) = variants {
            let mut non_null = variants
                .iter()
                .filter(|v| v.get("type").and_then(Value::as_str) != Some("null"));
            if let (Some(only), None) = (non_null.next(), non_null.next()) {
                node = only;
                continue;
            }
        }

        return (node, false);
    }
}

fn type_of(node: &Value) -> SchemaType {
    let keyword = match node.get("type") {
        Some(Value::String(ty)) => Some(ty.as_str()),
        // `Option<T>` on primitives: ["string", "null"]
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|ty| *ty != "null"),
        _ => None,
    };

    match keyword.and_then(SchemaType::from_keyword) {
        Some(ty) => ty,
        None if node.get("properties").is_some() => SchemaType::Object,
        None => SchemaType::String,
    }
}
