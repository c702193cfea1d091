use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

/// Normalized outcome of one triggered action.
///
/// Handlers never fail with an error type: every failure is reported through
/// `ok == false` plus an optional message and data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ActionResult {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
    /// Set when the action has no implementation and nothing was run.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unimplemented: bool,
}

impl ActionResult {
    /// The external call ran and succeeded.
    pub fn success() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    /// Failure with a message and no data.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Nothing was run because the action is not implemented.
    pub fn unimplemented(message: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("message".to_string(), Value::String(message.into()));
        Self {
            ok: true,
            data: Some(data),
            unimplemented: true,
            ..Default::default()
        }
    }

    /// Attach one data entry.
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Read one data entry.
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_to_bare_ok() {
        let json = serde_json::to_value(ActionResult::success()).unwrap();
        assert_eq!(json, json!({"ok": true}));
    }

    #[test]
    fn failure_carries_message_and_data() {
        let res = ActionResult::failure("HTTP 404").with_data("status", 404);
        assert!(!res.ok);
        assert_eq!(res.error.as_deref(), Some("HTTP 404"));
        assert_eq!(res.data("status"), Some(&json!(404)));
        assert!(!res.unimplemented);
    }

    #[test]
    fn unimplemented_is_distinguishable_from_success() {
        let res = ActionResult::unimplemented("not wired");
        assert!(res.ok);
        assert!(res.unimplemented);
        assert_ne!(res, ActionResult::success());

        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(
            json,
            json!({"ok": true, "data": {"message": "not wired"}, "unimplemented": true})
        );
    }
}
