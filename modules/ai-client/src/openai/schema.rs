use schemars::{schema_for, JsonSchema};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Types whose JSON schema is handed to a model or service as a strict
/// output contract.
///
/// Automatically implemented for any type that implements `JsonSchema + DeserializeOwned`.
pub trait StructuredOutput: JsonSchema + DeserializeOwned {
    /// Generate a strict, self-contained JSON schema for this type:
    /// every object closes with `additionalProperties: false`, lists all of
    /// its properties as `required`, and carries no `$ref` indirection.
    fn strict_schema() -> Value {
        let schema = schema_for!(Self);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        let definitions = value.get("definitions").cloned().unwrap_or(Value::Null);
        tighten(&mut value, &definitions);

        if let Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }
}

impl<T: JsonSchema + DeserializeOwned> StructuredOutput for T {}

/// Inline references and close object schemas in one pass.
fn tighten(value: &mut Value, definitions: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(ref_path)) = map.get("$ref").cloned() {
                let name = ref_path.trim_start_matches("#/definitions/");
                if let Some(def) = definitions.get(name) {
                    *value = def.clone();
                    tighten(value, definitions);
                    return;
                }
            }

            if let Some(Value::Array(all_of)) = map.get("allOf").cloned() {
                if let [single] = all_of.as_slice() {
                    *value = single.clone();
                    tighten(value, definitions);
                    return;
                }
            }

            if map.get("type").and_then(Value::as_str) == Some("object") {
                map.insert("additionalProperties".to_string(), Value::Bool(false));
                if let Some(Value::Object(props)) = map.get("properties") {
                    let required = props.keys().cloned().map(Value::String).collect();
                    map.insert("required".to_string(), Value::Array(required));
                }
            }

            for (key, v) in map.iter_mut() {
                if key != "definitions" {
                    tighten(v, definitions);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                tighten(item, definitions);
            }
        }
        _ => {}
    }
}
