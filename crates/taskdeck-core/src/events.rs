//! Event taxonomy and frame dispatcher for the server-push stream.
//!
//! The transport delivers raw [`WireFrame`]s (a type tag plus an opaque
//! payload). [`parse_frame`] turns each one into a closed [`TaskEvent`]
//! tagged union so downstream handling is exhaustive at compile time.
//! A tag outside the taxonomy is a reported [`ParseError`], never a
//! silent drop: callers must be able to observe that the wire sent
//! something unexpected.

use serde::Deserialize;

use crate::error::ParseError;
use crate::task::{AgentLogEvent, Task};
use crate::wire::WireTask;

/// Connection state of one stream subscription.
///
/// Exactly one value is active at a time; transitions are emitted to an
/// optional observer and its absence changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// A transport connection attempt is in flight
    Connecting,
    /// The stream is live
    Connected,
    /// No connection; a retry may be pending
    Disconnected,
}

/// Closed set of event type tags carried by stream frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// A task was created
    TaskCreated,
    /// A task was updated
    TaskUpdated,
    /// A task was deleted
    TaskDeleted,
    /// An agent run emitted a log line
    AgentLog,
    /// Liveness signal, no payload
    Heartbeat,
}

const EVENT_TABLE: [(EventType, &str); 5] = [
    (EventType::TaskCreated, "task_created"),
    (EventType::TaskUpdated, "task_updated"),
    (EventType::TaskDeleted, "task_deleted"),
    (EventType::AgentLog, "agent_log"),
    (EventType::Heartbeat, "heartbeat"),
];

impl EventType {
    /// Wire tag for this event type.
    pub fn wire_name(self) -> &'static str {
        EVENT_TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("heartbeat")
    }

    /// Resolve a wire tag, or `None` for tags outside the taxonomy.
    pub fn from_wire(tag: &str) -> Option<Self> {
        EVENT_TABLE
            .iter()
            .find(|(_, name)| *name == tag)
            .map(|(kind, _)| *kind)
    }
}

/// A raw stream frame as produced by the transport.
///
/// Never mutated after receipt; parsing happens in [`parse_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireFrame {
    /// Event type tag
    pub event: String,
    /// Opaque payload blob (JSON text)
    pub data: String,
}

impl WireFrame {
    /// Build a frame from a tag and payload.
    pub fn new(event: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data: data.into(),
        }
    }
}

/// A parsed, normalized stream event in the domain model.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// A task was created; carries the full domain record
    TaskCreated(Task),
    /// A task was updated; carries the full domain record
    TaskUpdated(Task),
    /// A task was deleted; carries only the identifier
    TaskDeleted {
        /// Identifier of the deleted task
        id: String,
    },
    /// An agent run emitted a log line
    AgentLog(AgentLogEvent),
    /// Liveness signal; carries no payload and is not an error if unhandled
    Heartbeat,
}

#[derive(Deserialize)]
struct DeletedPayload {
    id: String,
}

fn task_payload(tag: &'static str, data: &str) -> Result<Task, ParseError> {
    let wire: WireTask =
        serde_json::from_str(data).map_err(|source| ParseError::InvalidPayload { tag, source })?;
    wire.into_task()
}

/// Parse a raw frame into a typed domain event.
///
/// Dispatch is by the frame's type tag. Conversion failures identify the
/// offending tag or field and leave the caller free to continue the
/// stream; nothing here is fatal.
pub fn parse_frame(frame: &WireFrame) -> Result<TaskEvent, ParseError> {
    let kind = EventType::from_wire(&frame.event).ok_or_else(|| ParseError::UnknownEventType {
        tag: frame.event.clone(),
    })?;

    match kind {
        EventType::TaskCreated => Ok(TaskEvent::TaskCreated(task_payload(
            "task_created",
            &frame.data,
        )?)),
        EventType::TaskUpdated => Ok(TaskEvent::TaskUpdated(task_payload(
            "task_updated",
            &frame.data,
        )?)),
        EventType::TaskDeleted => {
            let payload: DeletedPayload = serde_json::from_str(&frame.data).map_err(|source| {
                ParseError::InvalidPayload {
                    tag: "task_deleted",
                    source,
                }
            })?;
            Ok(TaskEvent::TaskDeleted { id: payload.id })
        }
        EventType::AgentLog => {
            let payload: AgentLogEvent = serde_json::from_str(&frame.data).map_err(|source| {
                ParseError::InvalidPayload {
                    tag: "agent_log",
                    source,
                }
            })?;
            Ok(TaskEvent::AgentLog(payload))
        }
        EventType::Heartbeat => Ok(TaskEvent::Heartbeat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn task_json() -> String {
        serde_json::json!({
            "id": "t-9",
            "title": "Ship it",
            "status": "todo",
            "type": "dev",
            "created_at": "2026-08-01T10:00:00Z"
        })
        .to_string()
    }

    #[test]
    fn created_frame_parses_to_domain_event() {
        let frame = WireFrame::new("task_created", task_json());
        match parse_frame(&frame).unwrap() {
            TaskEvent::TaskCreated(task) => {
                assert_eq!(task.id, "t-9");
                assert_eq!(task.status, TaskStatus::Todo);
            }
            other => panic!("expected TaskCreated, got {other:?}"),
        }
    }

    #[test]
    fn deleted_frame_carries_only_the_id() {
        let frame = WireFrame::new("task_deleted", r#"{"id":"t-3"}"#);
        assert_eq!(
            parse_frame(&frame).unwrap(),
            TaskEvent::TaskDeleted { id: "t-3".into() }
        );
    }

    #[test]
    fn agent_log_frame_parses() {
        let frame = WireFrame::new(
            "agent_log",
            serde_json::json!({
                "parent_id": "t-9",
                "run_id": "r-1",
                "log": {
                    "timestamp": "2026-08-01T10:05:00Z",
                    "type": "tool_use",
                    "content": "reading repository"
                }
            })
            .to_string(),
        );
        match parse_frame(&frame).unwrap() {
            TaskEvent::AgentLog(event) => {
                assert_eq!(event.parent_id, "t-9");
                assert_eq!(event.log.kind, "tool_use");
            }
            other => panic!("expected AgentLog, got {other:?}"),
        }
    }

    #[test]
    fn heartbeat_ignores_payload() {
        let frame = WireFrame::new("heartbeat", "{}");
        assert_eq!(parse_frame(&frame).unwrap(), TaskEvent::Heartbeat);
    }

    #[test]
    fn unknown_tag_surfaces_the_raw_tag() {
        let frame = WireFrame::new("task_archived", "{}");
        match parse_frame(&frame) {
            Err(ParseError::UnknownEventType { tag }) => assert_eq!(tag, "task_archived"),
            other => panic!("expected UnknownEventType, got {other:?}"),
        }
    }

    #[test]
    fn malformed_payload_names_the_tag() {
        let frame = WireFrame::new("task_created", "{not json");
        match parse_frame(&frame) {
            Err(ParseError::InvalidPayload { tag, .. }) => assert_eq!(tag, "task_created"),
            other => panic!("expected InvalidPayload, got {other:?}"),
        }
    }

    #[test]
    fn event_tags_round_trip() {
        for (kind, name) in EVENT_TABLE {
            assert_eq!(EventType::from_wire(name), Some(kind));
            assert_eq!(kind.wire_name(), name);
        }
        assert_eq!(EventType::from_wire("nope"), None);
    }
}
