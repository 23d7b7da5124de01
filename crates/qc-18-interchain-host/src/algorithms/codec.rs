//! # Operation Codec
//!
//! Strict decoding of operation batches and encoding of batch results.
//!
//! Operation values are resolved through an explicit [`MsgRegistry`]; an
//! unregistered type URL is a decode failure, never a silently dropped entry.

use crate::domain::msg::wire_options;
use crate::domain::{
    pack, BatchResult, HostError, HostMsg, OperationBatch, OperationResult, TypedMsg,
};
use bincode::Options;
use std::collections::BTreeMap;
use tracing::debug;

type DecodeFn = fn(&[u8]) -> Result<Box<dyn HostMsg>, bincode::Error>;

fn decode_typed<T: TypedMsg>(bytes: &[u8]) -> Result<Box<dyn HostMsg>, bincode::Error> {
    let msg: T = wire_options().deserialize(bytes)?;
    Ok(Box::new(msg))
}

/// Registry of decodable operation types.
#[derive(Clone, Default)]
pub struct MsgRegistry {
    decoders: BTreeMap<&'static str, DecodeFn>,
}

impl MsgRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under its type URL.
    pub fn register<T: TypedMsg>(&mut self) -> &mut Self {
        self.decoders.insert(T::TYPE_URL, decode_typed::<T>);
        self
    }

    /// Builder form of [`MsgRegistry::register`].
    pub fn with<T: TypedMsg>(mut self) -> Self {
        self.register::<T>();
        self
    }

    /// Returns true if `type_url` is registered.
    pub fn is_registered(&self, type_url: &str) -> bool {
        self.decoders.contains_key(type_url)
    }

    /// Registered type URLs in sorted order.
    pub fn type_urls(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.keys().copied()
    }

    /// Decode an operation batch.
    ///
    /// Fails on malformed bytes, an empty batch, an unknown type URL or a
    /// malformed operation value.
    pub fn decode_operations(&self, bytes: &[u8]) -> Result<Vec<Box<dyn HostMsg>>, HostError> {
        let batch: OperationBatch = wire_options().deserialize(bytes).map_err(|err| {
            debug!("[qc-18] Malformed operation batch: {}", err);
            HostError::Decode
        })?;

        if batch.messages.is_empty() {
            debug!("[qc-18] Empty operation batch");
            return Err(HostError::Decode);
        }

        batch
            .messages
            .iter()
            .enumerate()
            .map(|(index, packed)| {
                let decode = self.decoders.get(packed.type_url.as_str()).ok_or_else(|| {
                    debug!(index, type_url = %packed.type_url, "[qc-18] Unregistered operation type");
                    HostError::Decode
                })?;
                decode(&packed.value).map_err(|err| {
                    debug!(index, type_url = %packed.type_url, "[qc-18] Malformed operation: {}", err);
                    HostError::Decode
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for MsgRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.decoders.keys()).finish()
    }
}

/// Encode an operation batch.
pub fn encode_operations(msgs: &[&dyn HostMsg]) -> Result<Vec<u8>, HostError> {
    let messages = msgs
        .iter()
        .map(|msg| pack(*msg))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| HostError::Encode(err.to_string()))?;

    wire_options()
        .serialize(&OperationBatch { messages })
        .map_err(|err| HostError::Encode(err.to_string()))
}

/// Encode the ordered results of an executed batch.
pub fn encode_results(results: &[OperationResult]) -> Result<Vec<u8>, HostError> {
    let batch = BatchResult {
        data: results.to_vec(),
    };
    wire_options()
        .serialize(&batch)
        .map_err(|err| HostError::Encode(err.to_string()))
}

/// Decode a batch result produced by [`encode_results`].
pub fn decode_results(bytes: &[u8]) -> Result<Vec<OperationResult>, HostError> {
    let batch: BatchResult = wire_options()
        .deserialize(bytes)
        .map_err(|_| HostError::Decode)?;
    Ok(batch.data)
}
