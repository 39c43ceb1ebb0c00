//! Configuration loading and typed config structures for a Concord session.
//!
//! The canonical configuration lives in `concord-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure, a loader, and the fail-fast validation that
//! session construction relies on: configuration problems surface at
//! startup, never lazily inside a round.

use std::path::Path;

use serde::Deserialize;

use crate::error::CoreError;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level session configuration.
///
/// Mirrors the structure of `concord-config.yaml`. All fields have
/// defaults matching the reference scenario: five agents voting over
/// three cultural projects every two seconds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SessionConfig {
    /// Session-level settings (name, seed, timing).
    #[serde(default)]
    pub session: SessionSettings,

    /// Governance scenario settings (proposals, population, history).
    #[serde(default)]
    pub governance: GovernanceConfig,
}

impl SessionConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_yml::from_str(&contents)?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Validate the configuration for session construction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfiguration`] if the proposal list
    /// is empty or contains duplicates, the agent count is zero, or a
    /// bounded history window is zero-sized.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.governance.proposals.is_empty() {
            return Err(CoreError::InvalidConfiguration {
                reason: "at least one proposal must be configured".to_owned(),
            });
        }

        let mut seen = std::collections::BTreeSet::new();
        for name in &self.governance.proposals {
            if !seen.insert(name.as_str()) {
                // Duplicates would silently collapse tally keys and break
                // the tally-sum invariant.
                return Err(CoreError::InvalidConfiguration {
                    reason: format!("duplicate proposal name: {name}"),
                });
            }
        }

        if self.governance.agent_count == 0 {
            return Err(CoreError::InvalidConfiguration {
                reason: "agent_count must be at least 1".to_owned(),
            });
        }

        if self.governance.history_window == Some(0) {
            return Err(CoreError::InvalidConfiguration {
                reason: "history_window must be at least 1 when bounded".to_owned(),
            });
        }

        Ok(())
    }
}

/// Session-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionSettings {
    /// Human-readable session name.
    #[serde(default = "default_session_name")]
    pub name: String,

    /// Random seed for deterministic replay. `None` seeds from the
    /// process-wide generator.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop the engine after this many ticks. `None` runs until
    /// interrupted.
    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            name: default_session_name(),
            seed: None,
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: None,
        }
    }
}

/// Governance scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GovernanceConfig {
    /// Ordered list of proposal names being voted on. Ordering is
    /// significant: it drives the policy tiers and the tie-break.
    #[serde(default = "default_proposals")]
    pub proposals: Vec<String>,

    /// Number of agents in the population.
    #[serde(default = "default_agent_count")]
    pub agent_count: u32,

    /// Maximum retained history entries. `None` retains everything.
    #[serde(default)]
    pub history_window: Option<usize>,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            proposals: default_proposals(),
            agent_count: default_agent_count(),
            history_window: None,
        }
    }
}

fn default_session_name() -> String {
    String::from("concord")
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_proposals() -> Vec<String> {
    vec![
        String::from("Cultural Project A"),
        String::from("Cultural Project B"),
        String::from("Cultural Project C"),
    ]
}

const fn default_agent_count() -> u32 {
    5
}
