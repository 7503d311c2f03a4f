//! Settings types.
//!
//! `UiSettings` lives on the client machine (persisted by the settings
//! store); `BackendSettings` is exchanged with `/api/settings`.

use serde::{Deserialize, Serialize};

/// Locally persisted UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Monospace font family key
    pub font_family: String,
    /// Base font size in pixels
    pub font_size: u32,
    /// Whether desktop notifications are enabled
    pub notifications: bool,
    /// Whether anonymous usage analytics are enabled
    pub analytics: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_family: "jetbrains-mono".to_string(),
            font_size: 14,
            notifications: true,
            analytics: false,
        }
    }
}

/// Git integration settings held by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitSettings {
    /// Whether to checkpoint automatically after agent runs
    pub auto_checkpoint: bool,
    /// Commit message prefix for checkpoints
    pub checkpoint_prefix: String,
}

/// Agent execution settings held by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSettings {
    /// Maximum agent turns per run
    pub max_turns: u32,
    /// Model identifier used for runs
    pub model: String,
}

/// Full service-side settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Git integration settings
    pub git: GitSettings,
    /// Agent execution settings
    pub agent: AgentSettings,
}
