//! # Host Messages
//!
//! Dynamically-typed operations carried in an execute packet.
//!
//! Concrete operations implement [`TypedMsg`]; the blanket impl turns every
//! `TypedMsg` into a [`HostMsg`] trait object that the authenticator, the
//! executor and the router work with.

use super::errors::OperationError;
use super::entities::PackedOperation;
use super::value_objects::MAX_PACKET_DATA_BYTES;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Binary encoding shared by operation values, batches and results.
///
/// Fixed-width integers, trailing bytes rejected, bounded allocation.
pub(crate) fn wire_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_PACKET_DATA_BYTES)
}

/// A remote-directed operation, type-erased.
pub trait HostMsg: fmt::Debug + Send + Sync + 'static {
    /// Type URL identifying the operation kind.
    fn type_url(&self) -> &'static str;

    /// Addresses that must have authorized this operation.
    fn signers(&self) -> Vec<String>;

    /// Cheap, state-independent structural checks.
    fn validate_basic(&self) -> Result<(), OperationError>;

    /// Encode the operation fields.
    fn encode_value(&self) -> Result<Vec<u8>, bincode::Error>;

    /// Upcast for handler-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A concrete, serializable operation type.
pub trait TypedMsg: Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static {
    /// Type URL identifying this operation kind.
    const TYPE_URL: &'static str;

    /// Addresses that must have authorized this operation.
    fn signers(&self) -> Vec<String>;

    /// Cheap, state-independent structural checks.
    fn validate_basic(&self) -> Result<(), OperationError>;
}

impl<T: TypedMsg> HostMsg for T {
    fn type_url(&self) -> &'static str {
        T::TYPE_URL
    }

    fn signers(&self) -> Vec<String> {
        TypedMsg::signers(self)
    }

    fn validate_basic(&self) -> Result<(), OperationError> {
        TypedMsg::validate_basic(self)
    }

    fn encode_value(&self) -> Result<Vec<u8>, bincode::Error> {
        wire_options().serialize(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Pack an operation for the wire.
pub fn pack(msg: &dyn HostMsg) -> Result<PackedOperation, bincode::Error> {
    Ok(PackedOperation {
        type_url: msg.type_url().to_string(),
        value: msg.encode_value()?,
    })
}

/// Downcast a type-erased operation to its concrete type.
pub fn downcast<T: TypedMsg>(msg: &dyn HostMsg) -> Option<&T> {
    msg.as_any().downcast_ref::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct MsgPing {
        sender: String,
        nonce: u64,
    }

    impl TypedMsg for MsgPing {
        const TYPE_URL: &'static str = "/test.v1.MsgPing";

        fn signers(&self) -> Vec<String> {
            vec![self.sender.clone()]
        }

        fn validate_basic(&self) -> Result<(), OperationError> {
            if self.sender.is_empty() {
                return Err(OperationError::InvalidAddress("empty sender".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_pack_uses_type_url() {
        let msg = MsgPing {
            sender: "ica1".into(),
            nonce: 7,
        };
        let packed = pack(&msg).unwrap();
        assert_eq!(packed.type_url, "/test.v1.MsgPing");
        let decoded: MsgPing = wire_options().deserialize(&packed.value).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn test_downcast() {
        let msg: Box<dyn HostMsg> = Box::new(MsgPing {
            sender: "ica1".into(),
            nonce: 1,
        });
        let concrete = downcast::<MsgPing>(msg.as_ref()).unwrap();
        assert_eq!(concrete.nonce, 1);
    }

    #[test]
    fn test_validate_basic_through_trait_object() {
        let msg: Box<dyn HostMsg> = Box::new(MsgPing {
            sender: String::new(),
            nonce: 1,
        });
        assert!(msg.validate_basic().is_err());
        assert_eq!(msg.signers(), vec![String::new()]);
    }

    #[test]
    fn test_wire_rejects_trailing_bytes() {
        let mut bytes = wire_options().serialize(&7u64).unwrap();
        bytes.push(0);
        let result: Result<u64, _> = wire_options().deserialize(&bytes);
        assert!(result.is_err());
    }
}
