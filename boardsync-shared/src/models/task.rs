/// Task model
///
/// A task belongs to exactly one status at a time, carried here by name
/// (denormalized from the status vocabulary by the backend). The list
/// endpoint omits the long description and timestamps, so those fields
/// are optional and only populated on the detail fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Board task as served by the backend
///
/// `is_mine` and `is_lower` are visibility hints computed server-side
/// from the viewer's role; the core carries them as opaque display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Task title
    pub title: String,

    /// One or two sentence summary shown on the card
    pub short_description: String,

    /// Long description, only present on the detail view
    #[serde(default)]
    pub description: Option<String>,

    /// Current status, by name
    pub status: String,

    /// Assignee username, if assigned
    #[serde(default)]
    pub assignee: Option<String>,

    /// Assignee user ID, if assigned
    #[serde(default)]
    pub assignee_id: Option<i64>,

    /// Assignee role, if assigned
    #[serde(default)]
    pub assignee_role: Option<String>,

    /// Username of the task creator
    #[serde(default)]
    pub created_by: Option<String>,

    /// True when the task is assigned to the viewer or unassigned
    #[serde(default)]
    pub is_mine: bool,

    /// True when the task is assigned to someone below the viewer's role
    #[serde(default)]
    pub is_lower: bool,

    /// When the task was created, only present on the detail view
    #[serde(
        default,
        deserialize_with = "crate::models::timestamp::deserialize_optional"
    )]
    pub created_at: Option<DateTime<Utc>>,

    /// When the task was last updated, only present on the detail view
    #[serde(
        default,
        deserialize_with = "crate::models::timestamp::deserialize_optional"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_shape_deserializes_without_detail_fields() {
        let json = r#"{
            "id": 7,
            "title": "Добавить авторизацию",
            "short_description": "JWT через /auth/login",
            "status": "в работе",
            "assignee": null,
            "assignee_id": null,
            "assignee_role": null,
            "created_by": "admin",
            "is_mine": true,
            "is_lower": false
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.status, "в работе");
        assert!(task.description.is_none());
        assert!(task.created_at.is_none());
    }

    #[test]
    fn test_detail_shape_carries_description() {
        let json = r#"{
            "id": 7,
            "title": "t",
            "short_description": "s",
            "description": "полное описание",
            "status": "сделать",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T09:30:00Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.description.as_deref(), Some("полное описание"));
        assert!(task.created_at.is_some());
    }

    #[test]
    fn test_detail_shape_accepts_naive_timestamps() {
        let json = r#"{
            "id": 7,
            "title": "t",
            "short_description": "s",
            "status": "сделать",
            "created_at": "2026-08-30T09:15:00",
            "updated_at": null
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        let created = task.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2026-08-30T09:15:00+00:00");
        assert!(task.updated_at.is_none());
    }
}
