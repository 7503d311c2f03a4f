//! Agent run records as exchanged with `/api/agent/*`.
//!
//! Unlike the task record, the run record's status spelling is the same
//! on the wire and in the domain, so the enum derives serde directly and
//! the table only backs the explicit `wire_name`/`from_wire` lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::AgentLogEntry;

/// Lifecycle status of one agent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRunStatus {
    /// Queued, not yet started
    Pending,
    /// Actively executing
    Running,
    /// Finished but awaiting human review
    NeedsReview,
    /// Finished successfully
    Completed,
    /// Finished with an error
    Failed,
    /// Stopped on request
    Cancelled,
}

const RUN_STATUS_TABLE: [(AgentRunStatus, &str); 6] = [
    (AgentRunStatus::Pending, "pending"),
    (AgentRunStatus::Running, "running"),
    (AgentRunStatus::NeedsReview, "needs_review"),
    (AgentRunStatus::Completed, "completed"),
    (AgentRunStatus::Failed, "failed"),
    (AgentRunStatus::Cancelled, "cancelled"),
];

impl AgentRunStatus {
    /// Every run status variant, in lifecycle order.
    pub const ALL: [AgentRunStatus; 6] = [
        AgentRunStatus::Pending,
        AgentRunStatus::Running,
        AgentRunStatus::NeedsReview,
        AgentRunStatus::Completed,
        AgentRunStatus::Failed,
        AgentRunStatus::Cancelled,
    ];

    /// Wire spelling of this status.
    pub fn wire_name(self) -> &'static str {
        RUN_STATUS_TABLE
            .iter()
            .find(|(status, _)| *status == self)
            .map(|(_, name)| *name)
            .unwrap_or("pending")
    }

    /// Resolve a wire spelling, or `None` for values outside the vocabulary.
    pub fn from_wire(value: &str) -> Option<Self> {
        RUN_STATUS_TABLE
            .iter()
            .find(|(_, name)| *name == value)
            .map(|(status, _)| *status)
    }

    /// True once the run can no longer change status on its own.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            AgentRunStatus::Completed | AgentRunStatus::Failed | AgentRunStatus::Cancelled
        )
    }
}

/// One agent execution run against a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRun {
    /// Unique run identifier
    pub id: String,
    /// Task the run executes against
    pub task_id: String,
    /// Current lifecycle status
    pub status: AgentRunStatus,
    /// Accumulated log entries as a JSON blob, if any
    #[serde(default)]
    pub logs: Option<String>,
    /// Error detail when the run failed
    #[serde(default)]
    pub error_message: Option<String>,
    /// When execution began; unset while pending
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// When the run reached a terminal status
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl AgentRun {
    /// Decode the accumulated log blob into structured entries.
    ///
    /// A run with no logs yet decodes to an empty list.
    pub fn log_entries(&self) -> Result<Vec<AgentLogEntry>, serde_json::Error> {
        match self.logs.as_deref() {
            Some(blob) => serde_json::from_str(blob),
            None => Ok(Vec::new()),
        }
    }
}

/// Acknowledgement returned when stopping a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStopOutcome {
    /// Whether the stop request took effect
    pub success: bool,
    /// Run status after the stop request, in wire spelling
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_run() -> serde_json::Value {
        serde_json::json!({
            "id": "r-1",
            "task_id": "t-9",
            "status": "running",
            "logs": null,
            "error_message": null,
            "started_at": "2026-08-01T10:00:00Z",
            "completed_at": null
        })
    }

    #[test]
    fn run_status_round_trips_through_wire_spelling() {
        for status in AgentRunStatus::ALL {
            assert_eq!(AgentRunStatus::from_wire(status.wire_name()), Some(status));
        }
        assert_eq!(AgentRunStatus::from_wire("paused"), None);
    }

    #[test]
    fn run_status_serde_matches_wire_spelling() {
        for status in AgentRunStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.wire_name()));
        }
    }

    #[test]
    fn run_record_parses_wire_shape() {
        let run: AgentRun = serde_json::from_value(sample_run()).unwrap();
        assert_eq!(run.status, AgentRunStatus::Running);
        assert_eq!(run.error_message, None);
        assert!(run.started_at.is_some());
        assert!(run.completed_at.is_none());
    }

    #[test]
    fn absent_logs_decode_to_no_entries() {
        let run: AgentRun = serde_json::from_value(sample_run()).unwrap();
        assert!(run.log_entries().unwrap().is_empty());
    }

    #[test]
    fn log_blob_decodes_to_structured_entries() {
        let mut value = sample_run();
        value["logs"] = serde_json::json!(
            r#"[{"timestamp":"2026-08-01T10:01:00Z","type":"tool_use","content":"reading repository"}]"#
        );
        let run: AgentRun = serde_json::from_value(value).unwrap();
        let entries = run.log_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, "tool_use");
    }

    #[test]
    fn terminal_statuses_are_exactly_the_finished_ones() {
        let terminal: Vec<_> = AgentRunStatus::ALL
            .into_iter()
            .filter(|status| status.is_terminal())
            .collect();
        assert_eq!(
            terminal,
            vec![
                AgentRunStatus::Completed,
                AgentRunStatus::Failed,
                AgentRunStatus::Cancelled,
            ]
        );
    }
}
