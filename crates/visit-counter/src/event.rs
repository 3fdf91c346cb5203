//! Invocation payloads

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::HandlerError;
use crate::store::VisitRecord;

/// Name of the only event field the handler reads
pub const USER_FIELD: &str = "user";

/// Inbound event. Any field other than `user` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationEvent {
    pub user: String,
}

impl InvocationEvent {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Extract the event from a raw payload.
    ///
    /// `user` must be present and a non-empty string; anything else is
    /// reported as a missing field.
    pub fn from_payload(payload: &JsonValue) -> Result<Self, HandlerError> {
        payload
            .get(USER_FIELD)
            .and_then(JsonValue::as_str)
            .filter(|user| !user.is_empty())
            .map(Self::new)
            .ok_or(HandlerError::MissingField(USER_FIELD))
    }
}

/// Value returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    pub message: String,
}

impl InvocationResult {
    /// Greeting for a freshly incremented record
    pub fn greeting(record: &VisitRecord) -> Self {
        Self {
            message: format!(
                "Hello {}! You have visited us {} times.",
                record.key, record.count
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_payload() {
        let event = InvocationEvent::from_payload(&json!({"user": "alim", "extra": 1})).unwrap();
        assert_eq!(event, InvocationEvent::new("alim"));
    }

    #[test]
    fn test_from_payload_rejects_bad_user() {
        let payloads = [
            json!({}),
            json!({"user": null}),
            json!({"user": ""}),
            json!({"user": 42}),
            json!("alim"),
        ];

        for payload in payloads {
            let err = InvocationEvent::from_payload(&payload).unwrap_err();
            assert!(
                matches!(err, HandlerError::MissingField("user")),
                "unexpected result for {payload}"
            );
        }
    }

    #[test]
    fn test_greeting() {
        let result = InvocationResult::greeting(&VisitRecord::new("alim", 1));
        assert_eq!(result.message, "Hello alim! You have visited us 1 times.");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"message": "Hello alim! You have visited us 1 times."})
        );
    }
}
