//! # Domain Errors
//!
//! Error types for the Interchain Account Host.
//!
//! Every error raised below the packet handler travels up unchanged. Each
//! variant carries a stable numeric code; acknowledgements only ever expose
//! that code, never the error detail.

use thiserror::Error;

/// Failure reported by a single operation (validation or handler execution).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Operation fields are structurally invalid.
    #[error("invalid operation: {0}")]
    Invalid(String),

    /// Address field could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Coin amount is zero or malformed.
    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    /// Not enough balance to perform the operation.
    #[error("insufficient funds: {denom} required {required}, available {available}")]
    InsufficientFunds {
        /// Coin denomination.
        denom: String,
        /// Amount requested.
        required: u128,
        /// Amount held.
        available: u128,
    },

    /// Handler received a message of a type it does not handle.
    #[error("unexpected message type: {0}")]
    UnexpectedMessage(String),

    /// Handler-specific failure.
    #[error("{0}")]
    Failed(String),
}

/// Why an operation was refused by the authenticator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnauthorizedReason {
    /// Type URL is not on the host allow-list.
    #[error("message type not allowed: {type_url}")]
    DisallowedType {
        /// Refused type URL.
        type_url: String,
    },

    /// A required signer is not the interchain account.
    #[error("unexpected signer address: expected {expected}, got {got}")]
    SignerMismatch {
        /// Interchain account address.
        expected: String,
        /// Signer found on the operation.
        got: String,
    },
}

/// Host error types.
#[derive(Debug, Error)]
pub enum HostError {
    /// Packet data or operation batch could not be decoded.
    ///
    /// The decoder detail is deliberately absent: it is not guaranteed to be
    /// identical across decoder implementations.
    #[error("cannot decode interchain account packet data")]
    Decode,

    /// Envelope type tag is not supported.
    #[error("unsupported interchain account packet type: {0}")]
    UnsupportedType(String),

    /// Destination channel does not exist (or has no connection hop).
    #[error("channel not found: port {port}, channel {channel}")]
    ChannelNotFound {
        /// Destination port.
        port: String,
        /// Destination channel.
        channel: String,
    },

    /// No interchain account registered for the controller.
    #[error("failed to retrieve interchain account on connection {connection}, port {port}")]
    AccountNotFound {
        /// Connection identifier.
        connection: String,
        /// Controller port identifier.
        port: String,
    },

    /// Operation refused by the allow-list authenticator.
    #[error("unauthorized operation {index}: {reason}")]
    Unauthorized {
        /// Position of the refused operation in the batch.
        index: usize,
        /// Refusal reason.
        reason: UnauthorizedReason,
    },

    /// No handler registered for the operation type.
    #[error("no route for operation {index}: {type_url}")]
    NoRoute {
        /// Position of the operation in the batch.
        index: usize,
        /// Unrouted type URL.
        type_url: String,
    },

    /// Operation failed its structural validation.
    #[error("operation {index} failed validation: {source}")]
    InvalidOperation {
        /// Position of the operation in the batch.
        index: usize,
        /// Validation error.
        #[source]
        source: OperationError,
    },

    /// Operation handler reported a failure.
    #[error("operation {index} failed: {source}")]
    OperationFailed {
        /// Position of the operation in the batch.
        index: usize,
        /// Handler error.
        #[source]
        source: OperationError,
    },

    /// Batch result could not be serialized. State is already committed.
    #[error("failed to encode execution result: {0}")]
    Encode(String),

    /// Host submodule is disabled by configuration.
    #[error("host submodule is disabled")]
    HostDisabled,
}

impl HostError {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            Self::Decode => 2,
            Self::UnsupportedType(_) => 3,
            Self::ChannelNotFound { .. } => 4,
            Self::AccountNotFound { .. } => 5,
            Self::Unauthorized { .. } => 6,
            Self::NoRoute { .. } => 7,
            Self::InvalidOperation { .. } => 8,
            Self::OperationFailed { .. } => 9,
            Self::Encode(_) => 10,
            Self::HostDisabled => 11,
        }
    }

    /// Index of the operation that caused the failure, if any.
    pub fn failing_index(&self) -> Option<usize> {
        match self {
            Self::Unauthorized { index, .. }
            | Self::NoRoute { index, .. }
            | Self::InvalidOperation { index, .. }
            | Self::OperationFailed { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Returns true if the ambient state may have been modified.
    ///
    /// Only `Encode` is raised after the batch has been committed.
    pub fn is_post_commit(&self) -> bool {
        matches!(self, Self::Encode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_hides_detail() {
        let err = HostError::Decode;
        assert_eq!(
            err.to_string(),
            "cannot decode interchain account packet data"
        );
        assert_eq!(err.code(), 2);
    }

    #[test]
    fn test_unauthorized_error_cites_index() {
        let err = HostError::Unauthorized {
            index: 3,
            reason: UnauthorizedReason::SignerMismatch {
                expected: "ica1".to_string(),
                got: "mallory".to_string(),
            },
        };
        assert_eq!(err.failing_index(), Some(3));
        assert!(err.to_string().contains("expected ica1, got mallory"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            HostError::Decode,
            HostError::UnsupportedType("x".into()),
            HostError::ChannelNotFound {
                port: "p".into(),
                channel: "c".into(),
            },
            HostError::AccountNotFound {
                connection: "c".into(),
                port: "p".into(),
            },
            HostError::Unauthorized {
                index: 0,
                reason: UnauthorizedReason::DisallowedType {
                    type_url: "t".into(),
                },
            },
            HostError::NoRoute {
                index: 0,
                type_url: "t".into(),
            },
            HostError::InvalidOperation {
                index: 0,
                source: OperationError::Invalid("x".into()),
            },
            HostError::OperationFailed {
                index: 0,
                source: OperationError::Failed("x".into()),
            },
            HostError::Encode("x".into()),
            HostError::HostDisabled,
        ];
        let mut codes: Vec<u32> = errors.iter().map(HostError::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_only_encode_is_post_commit() {
        assert!(HostError::Encode("x".into()).is_post_commit());
        assert!(!HostError::Decode.is_post_commit());
        assert!(!HostError::HostDisabled.is_post_commit());
    }

    #[test]
    fn test_insufficient_funds_error() {
        let err = OperationError::InsufficientFunds {
            denom: "uatom".into(),
            required: 10,
            available: 3,
        };
        assert!(err.to_string().contains("required 10, available 3"));
    }
}
