//! Application-state containers for Taskdeck frontends.
//!
//! Both containers here are explicitly owned by the application root and
//! passed by reference to whatever needs them; there is no module-level
//! mutable state. [`SettingsStore`] holds locally persisted UI
//! preferences with subscribe/notify semantics; [`SchemaCache`] memoizes
//! the service's schema metadata with one explicit invalidation
//! operation and no other invalidation policy.

pub mod schema;
pub mod settings;

pub use schema::{SchemaCache, SchemaSource};
pub use settings::SettingsStore;
