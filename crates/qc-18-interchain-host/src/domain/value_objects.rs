//! # Domain Value Objects
//!
//! Immutable identifiers and small value types for the Interchain Account Host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Allow-list entry that permits every operation type.
pub const ALLOW_ALL_WILDCARD: &str = "*";

/// Upper bound on the size of an encoded operation batch or batch result.
pub const MAX_PACKET_DATA_BYTES: u64 = 1024 * 1024;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Port identifier (e.g. `icahost`, `icacontroller-<owner>`).
    PortId
);

string_id!(
    /// Channel identifier (e.g. `channel-0`).
    ChannelId
);

string_id!(
    /// Connection identifier (e.g. `connection-0`).
    ConnectionId
);

/// Interchain account packet type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PacketType {
    /// Default zero value; never executed.
    Unspecified,
    /// Execute the embedded operation batch.
    ExecuteTx,
    /// Any tag this host does not recognise.
    Unrecognized(String),
}

impl PacketType {
    /// Wire tag of the unspecified type.
    pub const UNSPECIFIED_TAG: &'static str = "TYPE_UNSPECIFIED";
    /// Wire tag of the execute type.
    pub const EXECUTE_TX_TAG: &'static str = "TYPE_EXECUTE_TX";

    /// Parse a wire tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::UNSPECIFIED_TAG => Self::Unspecified,
            Self::EXECUTE_TX_TAG => Self::ExecuteTx,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Wire tag for this type.
    pub fn tag(&self) -> &str {
        match self {
            Self::Unspecified => Self::UNSPECIFIED_TAG,
            Self::ExecuteTx => Self::EXECUTE_TX_TAG,
            Self::Unrecognized(tag) => tag,
        }
    }
}

/// A token amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination.
    pub denom: String,
    /// Amount in the smallest unit.
    pub amount: u128,
}

impl Coin {
    /// Create a coin.
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Valid if the denom is non-empty and the amount positive.
    pub fn is_valid(&self) -> bool {
        !self.denom.trim().is_empty() && self.amount > 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}
