use serde::{Deserialize, Serialize};

/// The envelope every Bot API response comes wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default = "Option::default")]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of a `sendMessage` call.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessage {
    pub chat_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
}

/// One entry from `getUpdates`. Updates that aren't plain text messages (edits, stickers, joins, ...) arrive with
/// `message` or `message.text` absent; the poller still consumes their sequence number.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
}

impl Update {
    /// The message text, if this update carries any.
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref().and_then(|m| m.text.as_deref())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_updates_response_parses() {
        let json = r#"{
            "ok": true,
            "result": [
                {"update_id": 101, "message": {"message_id": 7, "text": "/approve PAY-AB12CD34", "date": 1700000000}},
                {"update_id": 102, "message": {"message_id": 8, "photo": []}},
                {"update_id": 103}
            ]
        }"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(response.ok);
        let updates = response.result.unwrap();
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].text(), Some("/approve PAY-AB12CD34"));
        assert_eq!(updates[1].text(), None);
        assert_eq!(updates[2].text(), None);
    }

    #[test]
    fn error_response_parses() {
        let json = r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#;
        let response: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!response.ok);
        assert_eq!(response.description.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn send_message_omits_parse_mode_when_unset() {
        let plain = SendMessage { chat_id: "42".into(), text: "hi".into(), parse_mode: None };
        assert_eq!(serde_json::to_string(&plain).unwrap(), r#"{"chat_id":"42","text":"hi"}"#);
        let markdown = SendMessage { chat_id: "42".into(), text: "hi".into(), parse_mode: Some("Markdown".into()) };
        assert!(serde_json::to_string(&markdown).unwrap().contains(r#""parse_mode":"Markdown""#));
    }
}
