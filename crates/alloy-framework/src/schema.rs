//! Minimal required-properties + primitive-type checker over a
//! JSON-schema-shaped [`Value`] (spec §4.8 step 3). Not a full JSON-Schema
//! implementation — that is explicitly out of scope (spec §9).

use alloy_core::CoreError;
use serde_json::Value;

/// Checks that `schema` is well-formed enough to be used as a tool input
/// schema: an object with a `"type": "object"` (or no type, implying object)
/// and, if present, `"properties"`/`"required"` of the expected shapes
/// (spec §4.6: "well-formed input schema").
pub fn validate_schema_shape(schema: &Value) -> bool {
    let Some(obj) = schema.as_object() else {
        return false;
    };
    if let Some(ty) = obj.get("type")
        && ty.as_str() != Some("object")
    {
        return false;
    }
    if let Some(props) = obj.get("properties")
        && !props.is_object()
    {
        return false;
    }
    if let Some(required) = obj.get("required")
        && !required.is_array()
    {
        return false;
    }
    true
}

/// Validates `input` against `schema`'s `required` list and each declared
/// property's primitive `type`. Returns the first violation as an
/// `InvalidInput`-shaped reason string.
pub fn validate_input(
    plugin: &str,
    tool: &str,
    schema: &Value,
    input: &Value,
) -> Result<(), CoreError> {
    let reason = |reason: String| CoreError::InvalidInput {
        plugin: plugin.to_string(),
        tool: tool.to_string(),
        reason,
    };

    let Some(input_obj) = input.as_object() else {
        return Err(reason("tool input must be a JSON object".into()));
    };

    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for name in required {
            let Some(name) = name.as_str() else {
                continue;
            };
            if !input_obj.contains_key(name) {
                return Err(reason(format!("missing required property '{name}'")));
            }
        }
    }

    if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
        for (name, prop_schema) in properties {
            let Some(value) = input_obj.get(name) else {
                continue;
            };
            if let Some(expected) = prop_schema.get("type").and_then(Value::as_str)
                && !matches_primitive_type(value, expected)
            {
                return Err(reason(format!(
                    "property '{name}' expected type '{expected}', got '{}'",
                    json_type_name(value)
                )));
            }
        }
    }

    Ok(())
}

fn matches_primitive_type(value: &Value, expected: &str) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_well_formed_schema() {
        let schema = json!({
            "type": "object",
            "properties": {"title": {"type": "string"}},
            "required": ["title"],
        });
        assert!(validate_schema_shape(&schema));
    }

    #[test]
    fn rejects_non_object_schema() {
        assert!(!validate_schema_shape(&json!("not a schema")));
    }

    #[test]
    fn rejects_missing_required_property() {
        let schema = json!({"required": ["title"]});
        let err = validate_input("notes", "add", &schema, &json!({})).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_wrong_primitive_type() {
        let schema = json!({"properties": {"count": {"type": "integer"}}});
        let err =
            validate_input("notes", "add", &schema, &json!({"count": "five"})).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput { .. }));
    }

    #[test]
    fn accepts_valid_input() {
        let schema = json!({
            "required": ["title"],
            "properties": {"title": {"type": "string"}},
        });
        assert!(validate_input("notes", "add", &schema, &json!({"title": "x"})).is_ok());
    }
}
