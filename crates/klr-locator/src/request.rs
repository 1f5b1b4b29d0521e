use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding the optional "render binary" flag.
pub const BINARY_FIELD: &str = "binary";
/// Field holding the legacy positional form `[<hex key>]`.
pub const PARAMS_FIELD: &str = "params";

/// A loosely-typed locator request: field name to JSON value.
///
/// Immutable once constructed. Unknown fields are kept and ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocatorRequest {
    fields: Map<String, Value>,
}

impl LocatorRequest {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wrap a JSON value. Returns `None` unless it is an object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The `binary` flag. Anything other than a JSON boolean counts as unset.
    pub fn binary(&self) -> bool {
        self.fields
            .get(BINARY_FIELD)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl From<Map<String, Value>> for LocatorRequest {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_objects_are_requests() {
        assert!(LocatorRequest::from_value(json!({"index": "00"})).is_some());
        assert!(LocatorRequest::from_value(json!(["index"])).is_none());
        assert!(LocatorRequest::from_value(json!("index")).is_none());
    }

    #[test]
    fn binary_flag() {
        let req = |v: Value| LocatorRequest::from_value(v).unwrap();
        assert!(req(json!({"binary": true})).binary());
        assert!(!req(json!({"binary": false})).binary());
        assert!(!req(json!({"binary": "true"})).binary());
        assert!(!req(json!({})).binary());
    }

    #[test]
    fn deserializes_transparently() {
        let req: LocatorRequest = serde_json::from_str(r#"{"hook": "AB"}"#).unwrap();
        assert!(req.contains("hook"));
        assert_eq!(req.get("hook"), Some(&json!("AB")));
    }
}
