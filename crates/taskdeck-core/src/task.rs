//! Domain model for board tasks.
//!
//! The status and type vocabularies each carry a fixed bidirectional
//! table between the wire spelling (lowercase, exactly as transmitted)
//! and the domain variant. The tables are the single source of truth
//! for both inbound normalization and outbound payload construction, so
//! `domain -> wire -> domain` is the identity for every legal value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task status driving the Kanban columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Actively being worked
    InProgress,
    /// Finished but awaiting review
    NeedsReview,
    /// Completed
    Done,
}

const STATUS_TABLE: [(TaskStatus, &str); 4] = [
    (TaskStatus::Todo, "todo"),
    (TaskStatus::InProgress, "in_progress"),
    (TaskStatus::NeedsReview, "needs_review"),
    (TaskStatus::Done, "done"),
];

impl TaskStatus {
    /// Every status variant, in column order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::NeedsReview,
        TaskStatus::Done,
    ];

    /// Wire spelling of this status.
    pub fn wire_name(self) -> &'static str {
        // The table is total over the enum, so the lookup cannot miss.
        STATUS_TABLE
            .iter()
            .find(|(status, _)| *status == self)
            .map(|(_, name)| *name)
            .unwrap_or("todo")
    }

    /// Resolve a wire spelling, or `None` for values outside the vocabulary.
    pub fn from_wire(value: &str) -> Option<Self> {
        STATUS_TABLE
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(status, _)| *status)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::NeedsReview => "NEEDS_REVIEW",
            TaskStatus::Done => "DONE",
        };
        write!(f, "{label}")
    }
}

/// Task type category for visual distinction on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// Research and investigation work
    Research,
    /// Development work
    Dev,
    /// Notes and documentation
    Notes,
    /// Uncategorized
    Neutral,
}

const TYPE_TABLE: [(TaskType, &str); 4] = [
    (TaskType::Research, "research"),
    (TaskType::Dev, "dev"),
    (TaskType::Notes, "notes"),
    (TaskType::Neutral, "neutral"),
];

impl TaskType {
    /// Every type variant.
    pub const ALL: [TaskType; 4] = [
        TaskType::Research,
        TaskType::Dev,
        TaskType::Notes,
        TaskType::Neutral,
    ];

    /// Wire spelling of this type.
    pub fn wire_name(self) -> &'static str {
        TYPE_TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("neutral")
    }

    /// Resolve a wire spelling, or `None` for values outside the vocabulary.
    pub fn from_wire(value: &str) -> Option<Self> {
        TYPE_TABLE
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(kind, _)| *kind)
    }
}

impl Default for TaskType {
    fn default() -> Self {
        TaskType::Neutral
    }
}

/// A board task in its domain shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Result text produced by an agent run, if any
    pub result: Option<String>,
    /// Current Kanban status
    pub status: TaskStatus,
    /// Task category
    pub kind: TaskType,
    /// Owning project, if any
    pub project_id: Option<String>,
    /// Parent task for subtasks, if any
    pub parent_id: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp, if the service reported one
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new task.
///
/// Only `title` is required; the service applies defaults for the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskCreate {
    /// Task title
    pub title: String,
    /// Optional detailed description
    pub description: Option<String>,
    /// Initial status (service default: todo)
    pub status: Option<TaskStatus>,
    /// Task category (service default: neutral)
    pub kind: Option<TaskType>,
    /// Owning project
    pub project_id: Option<String>,
    /// Parent task for subtasks
    pub parent_id: Option<String>,
}

impl TaskCreate {
    /// Create a payload with just a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial change set for updating an existing task.
///
/// Unset fields are omitted from the wire payload entirely so the
/// service never sees a spurious default overwriting state the caller
/// did not touch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    /// New title, if changing
    pub title: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// New status, if changing
    pub status: Option<TaskStatus>,
    /// New category, if changing
    pub kind: Option<TaskType>,
}

impl TaskUpdate {
    /// Change set moving a task to a new status and nothing else.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.kind.is_none()
    }
}

/// A structured log line emitted by an agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLogEntry {
    /// When the line was emitted
    pub timestamp: DateTime<Utc>,
    /// Log line category as reported by the agent (open vocabulary)
    #[serde(rename = "type")]
    pub kind: String,
    /// Log line text
    pub content: String,
}

/// Stream payload tying an agent log line to its task and run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentLogEvent {
    /// Task the agent run belongs to
    pub parent_id: String,
    /// Identifier of the agent run that produced the line
    pub run_id: String,
    /// The log line itself
    pub log: AgentLogEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_spelling() {
        for status in TaskStatus::ALL {
            let wire = status.wire_name();
            assert_eq!(TaskStatus::from_wire(wire), Some(status));
        }
    }

    #[test]
    fn status_wire_spellings_round_trip_back() {
        for wire in ["todo", "in_progress", "needs_review", "done"] {
            let status = TaskStatus::from_wire(wire).unwrap();
            assert_eq!(status.wire_name(), wire);
        }
    }

    #[test]
    fn status_mapping_is_injective() {
        let mut seen = std::collections::HashSet::new();
        for status in TaskStatus::ALL {
            assert!(seen.insert(status.wire_name()));
        }
    }

    #[test]
    fn type_round_trips_through_wire_spelling() {
        for kind in TaskType::ALL {
            assert_eq!(TaskType::from_wire(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn unknown_spellings_resolve_to_none() {
        assert_eq!(TaskStatus::from_wire("archived"), None);
        assert_eq!(TaskType::from_wire("chore"), None);
    }

    #[test]
    fn domain_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&TaskStatus::Todo).unwrap();
        assert_eq!(json, "\"TODO\"");
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
    }

    #[test]
    fn empty_update_reports_empty() {
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate::status(TaskStatus::Done).is_empty());
    }
}
