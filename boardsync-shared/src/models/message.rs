/// Discussion message model
///
/// Messages are append-only: once created they are never edited or
/// deleted, and the backend serves them in ascending creation order. The
/// client always replaces its local list wholesale with the fetched one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single discussion message on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: i64,

    /// Author display name
    pub user: String,

    /// Message body
    pub content: String,

    /// When the message was posted; arrives naive (assumed UTC) or with
    /// an explicit offset
    #[serde(deserialize_with = "crate::models::timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_naive_created_at_deserializes_as_utc() {
        let json = r#"{
            "id": 1,
            "user": "alice",
            "content": "привет",
            "created_at": "2026-08-30T12:00:00"
        }"#;

        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(
            message.created_at,
            Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_offset_created_at_still_deserializes() {
        let json = r#"{"id":1,"user":"bob","content":"ок","created_at":"2026-08-30T12:00:00Z"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(
            message.created_at,
            Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
        );
    }
}
