use serde_json::Value;

/// Shape of a raw field value as received from Jira.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// An object whose `type` is `doc`.
    Document,
    /// An object with any other string `type`.
    Node,
    /// A legacy plain-text value.
    String,
    /// Missing or `null`.
    Absent,
    /// Anything else: numbers, arrays, untyped objects.
    Unrecognized,
}

/// Classify a raw value by shallow inspection. Never looks at children.
pub fn classify(value: Option<&Value>) -> Classification {
    match value {
        None | Some(Value::Null) => Classification::Absent,
        Some(Value::String(_)) => Classification::String,
        Some(Value::Object(object)) => match object.get("type").and_then(Value::as_str) {
            Some("doc") => Classification::Document,
            Some(_) => Classification::Node,
            None => Classification::Unrecognized,
        },
        Some(Value::Bool(_) | Value::Number(_) | Value::Array(_)) => Classification::Unrecognized,
    }
}
