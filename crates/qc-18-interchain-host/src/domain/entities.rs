//! # Domain Entities
//!
//! Packets, envelopes, channel ends, events and execution results.

use super::value_objects::{ChannelId, ConnectionId, PacketType, PortId};
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

/// One unit of cross-chain message delivery, as handed over by the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Packet {
    /// Sequence number on the channel.
    pub sequence: u64,
    /// Port on the controller side.
    pub source_port: PortId,
    /// Channel on the controller side.
    pub source_channel: ChannelId,
    /// Port on this host.
    pub destination_port: PortId,
    /// Channel on this host.
    pub destination_channel: ChannelId,
    /// Opaque payload (JSON-encoded [`PacketData`]).
    pub data: Vec<u8>,
}

/// Decoded packet envelope.
///
/// JSON wire form: `{"type": "TYPE_EXECUTE_TX", "data": "<base64>", "memo": ""}`.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacketData {
    /// Raw type tag; see [`PacketType`].
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Encoded operation batch.
    #[serde_as(as = "Base64")]
    pub data: Vec<u8>,
    /// Free-form memo, ignored by execution.
    #[serde(default)]
    pub memo: String,
}

impl PacketData {
    /// Build an execute envelope around an encoded operation batch.
    pub fn execute(data: Vec<u8>, memo: impl Into<String>) -> Self {
        Self {
            type_tag: PacketType::ExecuteTx.tag().to_string(),
            data,
            memo: memo.into(),
        }
    }

    /// Parsed packet type.
    pub fn packet_type(&self) -> PacketType {
        PacketType::from_tag(&self.type_tag)
    }

    /// Canonical JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Channel end as stored by the channel registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEnd {
    /// Port of the counterparty.
    pub counterparty_port: PortId,
    /// Channel of the counterparty.
    pub counterparty_channel: ChannelId,
    /// Connections the channel runs over; the first hop is used.
    pub connection_hops: Vec<ConnectionId>,
}

impl ChannelEnd {
    /// Connection this channel is bound to.
    pub fn connection(&self) -> Option<&ConnectionId> {
        self.connection_hops.first()
    }
}

/// Event attribute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    /// Attribute key.
    pub key: String,
    /// Attribute value.
    pub value: String,
}

/// Event emitted during packet handling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type.
    pub kind: String,
    /// Ordered attributes.
    pub attributes: Vec<EventAttribute>,
}

impl Event {
    /// Create an event without attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            attributes: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(EventAttribute {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.key == key)
            .map(|attr| attr.value.as_str())
    }
}

/// A type-tagged, encoded operation as carried on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackedOperation {
    /// Operation type URL.
    pub type_url: String,
    /// Encoded operation fields.
    pub value: Vec<u8>,
}

/// Ordered batch of packed operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationBatch {
    /// Operations in execution order.
    pub messages: Vec<PackedOperation>,
}

/// Result of one executed operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Type URL of the executed operation.
    pub msg_type: String,
    /// Raw handler result.
    pub data: Vec<u8>,
}

/// Ordered results of an executed batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    /// One entry per operation, in batch order.
    pub data: Vec<OperationResult>,
}
