//! Client configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskdeck_core::{TaskdeckError, TaskdeckResult};

/// Retry timing for the reconnecting event stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound on the retry delay, in milliseconds
    pub max_delay_ms: u64,
    /// Multiplicative growth factor applied after each failure
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1_000,
            max_delay_ms: 30_000,
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Initial retry delay as a [`Duration`].
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Maximum retry delay as a [`Duration`].
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    /// Check the parameter invariants.
    ///
    /// All values must be positive, the multiplier must exceed 1, and
    /// the initial delay must not exceed the maximum.
    pub fn validate(&self) -> TaskdeckResult<()> {
        if self.initial_delay_ms == 0 {
            return Err(TaskdeckError::config("initial_delay_ms must be positive"));
        }
        if self.multiplier <= 1.0 {
            return Err(TaskdeckError::config("multiplier must be greater than 1"));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(TaskdeckError::config(
                "initial_delay_ms must not exceed max_delay_ms",
            ));
        }
        Ok(())
    }

    /// Copy with out-of-range values replaced by the nearest legal ones.
    ///
    /// `validate` rejects bad parameters where configuration is loaded;
    /// hand-built values that skipped it must still never panic or stall
    /// the retry path. A non-finite or non-growing multiplier clamps to
    /// a constant delay.
    pub fn clamped(&self) -> Self {
        let initial_delay_ms = self.initial_delay_ms.max(1);
        Self {
            initial_delay_ms,
            max_delay_ms: self.max_delay_ms.max(initial_delay_ms),
            multiplier: if self.multiplier.is_finite() && self.multiplier > 1.0 {
                self.multiplier
            } else {
                1.0
            },
        }
    }
}

/// Connection settings for the board service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the board service
    pub base_url: String,
    /// Path of the event-stream endpoint
    pub events_path: String,
    /// Retry timing for the event stream
    pub retry: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            events_path: "/api/events".to_string(),
            retry: RetryConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file, validating the retry timing.
    pub fn load(path: impl AsRef<Path>) -> TaskdeckResult<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TaskdeckError::config(format!(
                "failed to read {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| TaskdeckError::config(format!("invalid config: {e}")))?;
        config.retry.validate()?;
        Ok(config)
    }

    /// Full URL of the event-stream endpoint.
    pub fn events_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.events_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.retry.validate().is_ok());
        assert_eq!(config.events_url(), "http://localhost:8000/api/events");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let config = ClientConfig {
            base_url: "http://board.local/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(config.events_url(), "http://board.local/api/events");
    }

    #[test]
    fn rejects_non_growing_multiplier() {
        let retry = RetryConfig {
            multiplier: 1.0,
            ..RetryConfig::default()
        };
        assert!(retry.validate().is_err());
    }

    #[test]
    fn rejects_initial_above_max() {
        let retry = RetryConfig {
            initial_delay_ms: 60_000,
            max_delay_ms: 30_000,
            ..RetryConfig::default()
        };
        assert!(retry.validate().is_err());
    }

    #[test]
    fn clamping_leaves_legal_parameters_untouched() {
        let retry = RetryConfig::default();
        assert_eq!(retry.clamped(), retry);
    }

    #[test]
    fn clamping_repairs_hostile_parameters() {
        let retry = RetryConfig {
            initial_delay_ms: 0,
            max_delay_ms: 0,
            multiplier: -2.0,
        };
        let clamped = retry.clamped();
        assert_eq!(clamped.initial_delay_ms, 1);
        assert_eq!(clamped.max_delay_ms, 1);
        assert_eq!(clamped.multiplier, 1.0);

        let nan = RetryConfig {
            multiplier: f64::NAN,
            ..RetryConfig::default()
        };
        assert_eq!(nan.clamped().multiplier, 1.0);
    }

    #[test]
    fn loads_partial_toml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taskdeck.toml");
        std::fs::write(&path, "base_url = \"http://10.0.0.2:8000\"\n").unwrap();
        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:8000");
        assert_eq!(config.retry, RetryConfig::default());
    }
}
