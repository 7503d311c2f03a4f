//! Wire model for task records as transmitted by the board service.
//!
//! The wire shape keeps field names, enumerated value spellings and
//! nullability exactly as transmitted; the conversions here are the only
//! place the wire and domain shapes meet. The task record has gone
//! through incompatible revisions, so inbound records carry an explicit
//! `schema_version`; anything other than the current version is rejected
//! as a parse error instead of being guessed at from field presence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::task::{Task, TaskCreate, TaskStatus, TaskType, TaskUpdate};

/// Wire-schema version this client implements.
pub const SCHEMA_VERSION: u32 = 3;

/// A task record exactly as transmitted by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTask {
    /// Unique task identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description (transmitted as null when absent)
    #[serde(default)]
    pub description: Option<String>,
    /// Agent result text, if any
    #[serde(default)]
    pub result: Option<String>,
    /// Status spelling from the wire vocabulary
    pub status: String,
    /// Type spelling from the wire vocabulary; older records omit it
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Owning project, if any
    #[serde(default)]
    pub project_id: Option<String>,
    /// Parent task, if any
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, if reported
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Declared wire-schema version; absent means current
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,
}

impl WireTask {
    /// Convert the wire record into the domain shape.
    ///
    /// Total over legal wire values: every vocabulary spelling has a
    /// defined domain value and optional fields get their defaults. A
    /// value outside the vocabulary or an unsupported schema version is
    /// a [`ParseError`], never a panic.
    pub fn into_task(self) -> Result<Task, ParseError> {
        if let Some(found) = self.schema_version {
            if found != SCHEMA_VERSION {
                return Err(ParseError::UnsupportedSchemaVersion {
                    found,
                    expected: SCHEMA_VERSION,
                });
            }
        }

        let status = TaskStatus::from_wire(&self.status).ok_or_else(|| {
            ParseError::UnknownStatus {
                value: self.status.clone(),
            }
        })?;

        let kind = match self.kind.as_deref() {
            Some(value) => TaskType::from_wire(value).ok_or_else(|| {
                ParseError::UnknownTaskType {
                    value: value.to_string(),
                }
            })?,
            None => TaskType::default(),
        };

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            result: self.result,
            status,
            kind,
            project_id: self.project_id,
            parent_id: self.parent_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Outbound payload for task creation.
#[derive(Debug, Clone, Serialize)]
pub struct WireTaskCreate {
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Initial status wire spelling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// Type wire spelling
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    /// Owning project
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Parent task
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl From<TaskCreate> for WireTaskCreate {
    fn from(create: TaskCreate) -> Self {
        Self {
            title: create.title,
            description: create.description,
            status: create.status.map(TaskStatus::wire_name),
            kind: create.kind.map(TaskType::wire_name),
            project_id: create.project_id,
            parent_id: create.parent_id,
        }
    }
}

/// Outbound payload for a partial task update.
///
/// Fields the caller did not set are omitted entirely, so the service
/// only touches what was explicitly changed.
#[derive(Debug, Clone, Serialize)]
pub struct WireTaskUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status wire spelling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    /// New type wire spelling
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl From<TaskUpdate> for WireTaskUpdate {
    fn from(update: TaskUpdate) -> Self {
        Self {
            title: update.title,
            description: update.description,
            status: update.status.map(TaskStatus::wire_name),
            kind: update.kind.map(TaskType::wire_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_wire_task() -> serde_json::Value {
        serde_json::json!({
            "id": "t-1",
            "title": "Write the report",
            "description": null,
            "result": null,
            "status": "todo",
            "type": "research",
            "project_id": "p-1",
            "parent_id": null,
            "created_at": "2026-08-01T10:00:00Z"
        })
    }

    #[test]
    fn wire_task_maps_to_domain() {
        let wire: WireTask = serde_json::from_value(sample_wire_task()).unwrap();
        let task = wire.into_task().unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.kind, TaskType::Research);
        assert_eq!(task.description, None);
        assert_eq!(task.project_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn missing_type_defaults_to_neutral() {
        let mut value = sample_wire_task();
        value.as_object_mut().unwrap().remove("type");
        let wire: WireTask = serde_json::from_value(value).unwrap();
        assert_eq!(wire.into_task().unwrap().kind, TaskType::Neutral);
    }

    #[test]
    fn unknown_status_is_a_parse_error() {
        let mut value = sample_wire_task();
        value["status"] = "archived".into();
        let wire: WireTask = serde_json::from_value(value).unwrap();
        match wire.into_task() {
            Err(ParseError::UnknownStatus { value }) => assert_eq!(value, "archived"),
            other => panic!("expected UnknownStatus, got {other:?}"),
        }
    }

    #[test]
    fn stale_schema_version_is_rejected() {
        let mut value = sample_wire_task();
        value["schema_version"] = 1.into();
        let wire: WireTask = serde_json::from_value(value).unwrap();
        match wire.into_task() {
            Err(ParseError::UnsupportedSchemaVersion { found, expected }) => {
                assert_eq!(found, 1);
                assert_eq!(expected, SCHEMA_VERSION);
            }
            other => panic!("expected UnsupportedSchemaVersion, got {other:?}"),
        }
    }

    #[test]
    fn absent_schema_version_is_read_as_current() {
        let wire: WireTask = serde_json::from_value(sample_wire_task()).unwrap();
        assert!(wire.into_task().is_ok());
    }

    #[test]
    fn partial_update_omits_unset_fields() {
        let update = TaskUpdate::status(TaskStatus::Done);
        let wire = WireTaskUpdate::from(update);
        let json = serde_json::to_value(&wire).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["status"], "done");
        assert!(!object.contains_key("title"));
        assert!(!object.contains_key("description"));
        assert!(!object.contains_key("type"));
    }

    #[test]
    fn empty_update_serializes_to_empty_object() {
        let wire = WireTaskUpdate::from(TaskUpdate::default());
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json.as_object().unwrap().is_empty());
    }

    #[test]
    fn create_payload_uses_wire_spellings() {
        let create = TaskCreate {
            title: "Spike".to_string(),
            status: Some(TaskStatus::InProgress),
            kind: Some(TaskType::Dev),
            ..TaskCreate::default()
        };
        let json = serde_json::to_value(WireTaskCreate::from(create)).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["type"], "dev");
        assert!(!json.as_object().unwrap().contains_key("project_id"));
    }
}
