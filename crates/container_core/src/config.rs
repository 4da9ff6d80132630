//! Controller configuration.
//!
//! # Responsibility
//! - Hold the tunables of the recompute controller and the load boundary.
//! - Decode them from JSON with defaults for every missing field.
//!
//! # Invariants
//! - `load_timeout_ms` is strictly positive after validation.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_LOAD_TIMEOUT_MS: u64 = 10_000;

/// Which search term a non-search trigger derives views with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCommitPolicy {
    /// Sort changes and loads use the term as currently typed, submitted or
    /// not. This is how the list has always behaved.
    #[default]
    ApplyPendingTerm,
    /// Sort changes and loads use the last submitted term only.
    SubmittedOnly,
}

/// Tunables for [`crate::controller::ContainerListController`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControllerConfig {
    pub search_policy: SearchCommitPolicy,
    /// Upper bound for the one-shot container load.
    pub load_timeout_ms: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            search_policy: SearchCommitPolicy::default(),
            load_timeout_ms: DEFAULT_LOAD_TIMEOUT_MS,
        }
    }
}

/// Configuration decoding/validation failures.
#[derive(Debug)]
pub enum ConfigError {
    Decode(serde_json::Error),
    ZeroTimeout,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "invalid controller config: {err}"),
            Self::ZeroTimeout => write!(f, "load_timeout_ms must be greater than zero"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            Self::ZeroTimeout => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value)
    }
}

impl ControllerConfig {
    /// Decodes and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.load_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ControllerConfig, SearchCommitPolicy};
    use std::time::Duration;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ControllerConfig::from_json_str("{}").expect("empty config should decode");
        assert_eq!(config, ControllerConfig::default());
        assert_eq!(config.search_policy, SearchCommitPolicy::ApplyPendingTerm);
        assert_eq!(config.load_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn policy_and_timeout_decode() {
        let config = ControllerConfig::from_json_str(
            r#"{"search_policy":"submitted_only","load_timeout_ms":250}"#,
        )
        .expect("config should decode");
        assert_eq!(config.search_policy, SearchCommitPolicy::SubmittedOnly);
        assert_eq!(config.load_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn zero_timeout_and_unknown_fields_are_rejected() {
        let zero = ControllerConfig::from_json_str(r#"{"load_timeout_ms":0}"#)
            .expect_err("zero timeout should fail");
        assert!(matches!(zero, ConfigError::ZeroTimeout));

        let unknown = ControllerConfig::from_json_str(r#"{"page_size":10}"#)
            .expect_err("unknown field should fail");
        assert!(matches!(unknown, ConfigError::Decode(_)));
    }
}
