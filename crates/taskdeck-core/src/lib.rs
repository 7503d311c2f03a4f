//! Core data layer for the Taskdeck board client.
//!
//! This crate is pure data: the domain model used by application logic,
//! the wire model as transmitted by the board service, the vocabulary
//! tables that translate between the two, and the event taxonomy for the
//! server-push stream. It performs no I/O; networking lives in
//! `taskdeck-client`.

pub mod agent;
pub mod error;
pub mod events;
pub mod schema;
pub mod settings;
pub mod task;
pub mod wire;

pub use agent::{AgentRun, AgentRunStatus, AgentStopOutcome};
pub use error::{ParseError, TaskdeckError, TaskdeckResult};
pub use events::{parse_frame, ConnectionState, EventType, TaskEvent, WireFrame};
pub use task::{
    AgentLogEntry, AgentLogEvent, Task, TaskCreate, TaskStatus, TaskType, TaskUpdate,
};
pub use wire::{WireTask, WireTaskCreate, WireTaskUpdate, SCHEMA_VERSION};
