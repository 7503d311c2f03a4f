//! Unified error system for the Taskdeck client SDK.
//!
//! `TaskdeckError` is the single error type crossing public API
//! boundaries. Frame-level parse and mapping failures use the separate
//! [`ParseError`] because they are recoverable and local: they are
//! reported through the caller's error channel and never tear down a
//! stream connection.

/// Unified error type for all Taskdeck operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskdeckError {
    /// Network or transport error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network failure
        message: String,
    },

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the service
        status: u16,
        /// Error detail reported by the service
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the serialization failure
        message: String,
    },

    /// Invalid configuration
    #[error("Config error: {message}")]
    Config {
        /// Description of the invalid configuration
        message: String,
    },

    /// Local persistence failed
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage failure
        message: String,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl TaskdeckError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an API error from a status code and service detail
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Convenience result alias for Taskdeck operations.
pub type TaskdeckResult<T> = Result<T, TaskdeckError>;

/// Non-fatal failure while parsing or mapping a single stream frame.
///
/// A `ParseError` identifies what the wire sent that the taxonomy did
/// not expect. It is surfaced to the caller's error channel and logged,
/// but the stream continues uninterrupted.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The frame's type tag is outside the known event taxonomy
    #[error("unrecognized event type: {tag}")]
    UnknownEventType {
        /// Raw tag as received from the wire
        tag: String,
    },

    /// The record declares a wire-schema version this client does not speak
    #[error("unsupported schema version {found} (expected {expected})")]
    UnsupportedSchemaVersion {
        /// Version declared by the record
        found: u32,
        /// Version this client implements
        expected: u32,
    },

    /// A status value outside the known status vocabulary
    #[error("unknown task status: {value}")]
    UnknownStatus {
        /// Raw status spelling as received
        value: String,
    },

    /// A task type value outside the known type vocabulary
    #[error("unknown task type: {value}")]
    UnknownTaskType {
        /// Raw type spelling as received
        value: String,
    },

    /// The payload failed to deserialize against the expected shape
    #[error("invalid payload for {tag}: {source}")]
    InvalidPayload {
        /// Event tag whose payload was malformed
        tag: &'static str,
        /// Underlying deserialization error (names the offending field)
        source: serde_json::Error,
    },
}
