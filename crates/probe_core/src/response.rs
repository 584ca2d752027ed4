use serde_json::{Map, Value};

pub const BODY_PREVIEW_CHARS: usize = 300;
/// Key under which a non-JSON body is wrapped.
pub const RAW_BODY_KEY: &str = "raw";

/// What the engine read off the wire, independent of status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    pub status: u16,
    /// Header names lowercased, in arrival order.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> &str {
        self.header("content-type").unwrap_or("")
    }

    /// Headers as a JSON object; repeated names are joined with ", ".
    pub fn headers_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.headers {
            let key = name.to_ascii_lowercase();
            let joined = match map.get(&key).and_then(Value::as_str) {
                Some(existing) => format!("{existing}, {value}"),
                None => value.clone(),
            };
            map.insert(key, Value::String(joined));
        }
        Value::Object(map)
    }
}

/// Parses the body as JSON, wrapping unparseable text as `{"raw": text}`.
pub fn parse_payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| {
        let mut map = Map::new();
        map.insert(RAW_BODY_KEY.to_string(), Value::String(body.to_string()));
        Value::Object(map)
    })
}

/// The payload's `message` field, or the whole payload in compact JSON.
pub fn extract_message(payload: &Value) -> String {
    match payload.get("message") {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => payload.to_string(),
        Some(other) => other.to_string(),
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// First `BODY_PREVIEW_CHARS` characters of the body.
pub fn body_preview(body: &str) -> &str {
    match body.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn message_field_is_extracted() {
        let payload = parse_payload(r#"{"message":"pong","extra":1}"#);
        assert_eq!(extract_message(&payload), "pong");
    }

    #[test]
    fn non_json_body_falls_back_to_raw_wrapper() {
        let payload = parse_payload("plain text");
        assert_eq!(payload, json!({ "raw": "plain text" }));
        assert_eq!(extract_message(&payload), r#"{"raw":"plain text"}"#);
    }

    #[test]
    fn payload_without_message_is_stringified() {
        let payload = parse_payload(r#"{"status":"OK"}"#);
        assert_eq!(extract_message(&payload), r#"{"status":"OK"}"#);
    }

    #[test]
    fn non_string_message_uses_its_json_form() {
        assert_eq!(extract_message(&json!({ "message": 42 })), "42");
        assert_eq!(
            extract_message(&json!({ "message": null })),
            r#"{"message":null}"#
        );
    }

    #[test]
    fn scalar_payloads_do_not_panic() {
        assert_eq!(extract_message(&parse_payload("null")), "null");
        assert_eq!(extract_message(&parse_payload("[1,2]")), "[1,2]");
        assert_eq!(extract_message(&parse_payload("")), r#"{"raw":""}"#);
    }

    #[test]
    fn preview_cuts_on_char_boundary() {
        let body = "é".repeat(BODY_PREVIEW_CHARS + 20);
        let preview = body_preview(&body);
        assert_eq!(preview.chars().count(), BODY_PREVIEW_CHARS);
        assert_eq!(body_preview("short"), "short");
    }

    #[test]
    fn repeated_headers_are_joined() {
        let response = RawResponse {
            status: 200,
            headers: vec![
                ("Vary".to_string(), "Origin".to_string()),
                ("content-type".to_string(), "application/json".to_string()),
                ("vary".to_string(), "Accept".to_string()),
            ],
            body: String::new(),
        };
        assert_eq!(
            response.headers_json(),
            json!({ "vary": "Origin, Accept", "content-type": "application/json" })
        );
        assert_eq!(response.content_type(), "application/json");
    }

    #[test]
    fn only_2xx_is_ok() {
        let status = |status| RawResponse {
            status,
            ..RawResponse::default()
        };
        assert!(status(200).is_ok());
        assert!(status(299).is_ok());
        assert!(!status(304).is_ok());
        assert!(!status(503).is_ok());
    }
}
