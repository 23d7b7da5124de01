//! # Host Configuration
//!
//! Parameters of the interchain account host submodule.

use crate::domain::ALLOW_ALL_WILDCARD;
use crate::ports::outbound::HostParamsSource;
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Allow-list contains an empty entry.
    #[error("allow-list entry {0} is blank")]
    BlankAllowListEntry(usize),

    /// Environment variable could not be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Interchain account host configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Accept execute packets at all.
    pub host_enabled: bool,

    /// Permitted operation type URLs. `"*"` anywhere permits every type.
    pub allow_messages: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host_enabled: true,
            allow_messages: Vec::new(),
        }
    }
}

impl HostConfig {
    /// Enabled host accepting every operation type.
    pub fn for_testing() -> Self {
        Self {
            host_enabled: true,
            allow_messages: vec![ALLOW_ALL_WILDCARD.to_string()],
        }
    }

    /// Enabled host with the given allow-list.
    pub fn with_allow_messages(allow_messages: Vec<String>) -> Self {
        Self {
            host_enabled: true,
            allow_messages,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `QC_ICA_HOST_ENABLED`: `true`/`false` (default: true)
    /// - `QC_ICA_ALLOW_MESSAGES`: comma-separated type URLs (default: empty)
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = env::var("QC_ICA_HOST_ENABLED") {
            let parsed = value.trim().parse::<bool>();
            config.host_enabled = parsed.map_err(|_| ConfigError::InvalidEnv {
                var: "QC_ICA_HOST_ENABLED",
                value,
            })?;
        }

        if let Ok(value) = env::var("QC_ICA_ALLOW_MESSAGES") {
            config.allow_messages = parse_allow_list(&value);
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject blank allow-list entries.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self
            .allow_messages
            .iter()
            .position(|entry| entry.trim().is_empty())
        {
            Some(index) => Err(ConfigError::BlankAllowListEntry(index)),
            None => Ok(()),
        }
    }

    /// Returns true if the wildcard entry is present.
    pub fn allows_all(&self) -> bool {
        self.allow_messages
            .iter()
            .any(|entry| entry == ALLOW_ALL_WILDCARD)
    }
}

/// Split a comma-separated allow-list, dropping surrounding whitespace.
fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

impl HostParamsSource for HostConfig {
    fn host_enabled(&self) -> bool {
        self.host_enabled
    }

    fn allow_messages(&self) -> Vec<String> {
        self.allow_messages.clone()
    }
}
