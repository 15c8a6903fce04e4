use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Coarse sender role. Only switches the composer placeholder copy for now;
/// it is deliberately not part of the `/send` payload yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "CITIZEN")]
    Citizen,
    #[serde(rename = "EMS")]
    Ems,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Citizen, Role::Ems];

    pub fn label(self) -> &'static str {
        match self {
            Role::Citizen => "Citizen",
            Role::Ems => "Emergency Services",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Role::Citizen => "Type your message…",
            Role::Ems => "Type an alert or update…",
        }
    }
}

/// One element of a `/messages` response. The backend normally sends plain
/// strings, but structured `{id, content, category, sender, timestamp}`
/// objects and arbitrary JSON are tolerated via the fallback arms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireMessage {
    Text(String),
    Structured { content: String },
    Other(Value),
}

impl WireMessage {
    pub fn display_text(self) -> String {
        match self {
            WireMessage::Text(s) => s,
            WireMessage::Structured { content } => content,
            WireMessage::Other(v) => v.to_string(),
        }
    }
}

/// Coerces a `/messages` body into display lines, preserving order and
/// duplicates. A wrapped list under `messages` or `data` is unwrapped; a
/// null body is an empty board. Any other shape is unusable and yields
/// `None` so the caller leaves the displayed list alone.
pub fn decode_messages(body: Value) -> Option<Vec<String>> {
    let items = match body {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("messages").or_else(|| map.remove("data")) {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };
    let decoded: Result<Vec<WireMessage>, _> =
        items.into_iter().map(serde_json::from_value).collect();
    decoded
        .ok()
        .map(|msgs| msgs.into_iter().map(WireMessage::display_text).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_array_is_taken_verbatim() {
        let out = decode_messages(json!(["hello", "world"])).unwrap();
        assert_eq!(out, vec!["hello", "world"]);
    }

    #[test]
    fn duplicates_and_order_survive() {
        let out = decode_messages(json!(["a", "a", "b", "a"])).unwrap();
        assert_eq!(out, vec!["a", "a", "b", "a"]);
    }

    #[test]
    fn structured_messages_degrade_to_content() {
        let out = decode_messages(json!([
            {"id": "1", "content": "alert", "category": "EMERGENCY"},
            {"id": "x"},
        ]))
        .unwrap();
        assert_eq!(out[0], "alert");
        // No content field: the whole object is serialized.
        assert_eq!(out[1], r#"{"id":"x"}"#);
    }

    #[test]
    fn non_string_content_falls_through_to_serialization() {
        let out = decode_messages(json!([{"content": 5}])).unwrap();
        assert_eq!(out, vec![r#"{"content":5}"#]);
    }

    #[test]
    fn wrapped_lists_are_unwrapped() {
        let out = decode_messages(json!({"messages": ["a", "b"]})).unwrap();
        assert_eq!(out, vec!["a", "b"]);
        let out = decode_messages(json!({"data": [{"content": "c"}]})).unwrap();
        assert_eq!(out, vec!["c"]);
    }

    #[test]
    fn null_body_is_an_empty_board() {
        assert_eq!(decode_messages(Value::Null).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unusable_shapes_are_rejected() {
        assert!(decode_messages(json!(42)).is_none());
        assert!(decode_messages(json!("just a string")).is_none());
        assert!(decode_messages(json!({"status": "ok"})).is_none());
    }

    #[test]
    fn role_placeholder_copy() {
        assert_eq!(Role::Citizen.placeholder(), "Type your message…");
        assert_eq!(Role::Ems.placeholder(), "Type an alert or update…");
    }
}
