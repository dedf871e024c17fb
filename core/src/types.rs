//! Domain DTOs and response envelopes for the todo API.
//!
//! # Design
//! The server and the client share these types, so the wire shape is defined
//! once. `TodoItem` is what the API returns; `NewItem` and `ItemPatch` are
//! what it accepts. Server-owned fields (`id`, timestamps) only exist on
//! `TodoItem`, so a client can never set them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::paging::Paging;
use crate::status::Status;

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    pub status: Status,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating an item.
///
/// A missing title decodes as empty and is rejected as blank by the server.
/// Unknown fields such as `id` or `created_at` are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Request payload for updating an item. Only the fields present in the JSON
/// are written; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}

/// `{"data": ...}` envelope used by every successful response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"data": [...], "paging": {...}}` envelope returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub paging: Paging,
}

/// `{"error": "..."}` body of every failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = TodoItem {
            id: 7,
            title: "Test".to_string(),
            status: Status::Done,
            created_at: None,
            updated_at: None,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["status"], "Done");
        assert!(json["created_at"].is_null());
        assert!(json["updated_at"].is_null());
    }

    #[test]
    fn item_timestamps_are_rfc3339() {
        let raw = r#"{"id":1,"title":"t","status":"Doing","created_at":"2024-05-01T10:00:00Z","updated_at":null}"#;
        let item: TodoItem = serde_json::from_str(raw).unwrap();
        let created = item.created_at.unwrap();
        assert_eq!(created.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert!(item.updated_at.is_none());
    }

    #[test]
    fn new_item_defaults_title_and_status() {
        let input: NewItem = serde_json::from_str("{}").unwrap();
        assert_eq!(input.title, "");
        assert!(input.status.is_none());
    }

    #[test]
    fn new_item_ignores_server_owned_fields() {
        let input: NewItem =
            serde_json::from_str(r#"{"id":99,"title":"Buy milk","created_at":"x"}"#).unwrap();
        assert_eq!(input.title, "Buy milk");
    }

    #[test]
    fn new_item_rejects_unknown_status() {
        let result: Result<NewItem, _> =
            serde_json::from_str(r#"{"title":"t","status":"Archived"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn patch_all_fields_optional() {
        let patch: ItemPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_partial_fields() {
        let patch: ItemPatch = serde_json::from_str(r#"{"status":"Done"}"#).unwrap();
        assert!(patch.title.is_none());
        assert_eq!(patch.status, Some(Status::Done));
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_omits_absent_fields_when_serialized() {
        let patch = ItemPatch {
            title: Some("New".to_string()),
            status: None,
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"title": "New"}));
    }
}
