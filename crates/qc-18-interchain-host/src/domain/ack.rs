//! # Acknowledgement
//!
//! Deterministic acknowledgement returned to the controller chain.
//!
//! Errors are reduced to their numeric code: error strings may differ
//! between implementations, and every node must write the same ack bytes.

use super::errors::HostError;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// Acknowledgement written for a received packet.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Acknowledgement {
    /// Encoded batch result.
    Result(#[serde_as(as = "Base64")] Vec<u8>),
    /// Code-only error message.
    Error(String),
}

impl Acknowledgement {
    /// Build from a packet handling outcome.
    pub fn from_outcome(outcome: &Result<Vec<u8>, HostError>) -> Self {
        match outcome {
            Ok(result) => Self::Result(result.clone()),
            Err(err) => Self::error(err),
        }
    }

    /// Build an error acknowledgement.
    pub fn error(err: &HostError) -> Self {
        Self::Error(format!(
            "ABCI code: {}: error handling packet: see events for details",
            err.code()
        ))
    }

    /// Returns true for a result acknowledgement.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Result(_))
    }

    /// Result bytes, if successful.
    pub fn result(&self) -> Option<&[u8]> {
        match self {
            Self::Result(bytes) => Some(bytes),
            Self::Error(_) => None,
        }
    }

    /// Canonical JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
