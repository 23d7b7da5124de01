//! # Outbound Ports
//!
//! Collaborators the host depends on: ledger state, channel and account
//! registries, host parameters and the message dispatch table.
//!
//! All of them are passed in explicitly so the executor can be built over
//! test doubles.

use crate::domain::{
    downcast, ChannelEnd, ChannelId, ConnectionId, Event, HostMsg, OperationError, PortId,
    TypedMsg,
};
use std::fmt;
use std::marker::PhantomData;

// =============================================================================
// LEDGER STATE
// =============================================================================

/// Key/value view of ledger state.
pub trait KvStore {
    /// Read a value.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Write a value.
    fn set(&mut self, key: &[u8], value: Vec<u8>);

    /// Remove a value.
    fn delete(&mut self, key: &[u8]);

    /// Returns true if the key holds a value.
    fn has(&self, key: &[u8]) -> bool {
        self.get(key).is_some()
    }
}

/// Append-only event stream.
pub trait EventSink {
    /// Append events, preserving their order.
    fn emit_events(&mut self, events: Vec<Event>);

    /// Events emitted so far, oldest first.
    fn events(&self) -> &[Event];
}

/// Ambient ledger state: a key/value store with an event stream.
pub trait LedgerState: KvStore + EventSink {}

impl<T: KvStore + EventSink + ?Sized> LedgerState for T {}

// =============================================================================
// REGISTRIES
// =============================================================================

/// Channel registry.
pub trait ChannelKeeper: Send + Sync {
    /// Look up a channel end on this host.
    fn get_channel(&self, port: &PortId, channel: &ChannelId) -> Option<ChannelEnd>;
}

/// Interchain account registry.
pub trait AccountRegistry: Send + Sync {
    /// Address of the interchain account owned by `(connection, controller port)`.
    fn interchain_account_address(
        &self,
        connection: &ConnectionId,
        controller_port: &PortId,
    ) -> Option<String>;
}

/// Host parameter store.
pub trait HostParamsSource: Send + Sync {
    /// Whether the host accepts packets at all.
    fn host_enabled(&self) -> bool;

    /// Permitted operation type URLs (may contain the wildcard).
    fn allow_messages(&self) -> Vec<String>;
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Successful handler outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandlerResponse {
    /// Raw result returned to the controller.
    pub data: Vec<u8>,
    /// Events produced by the handler.
    pub events: Vec<Event>,
}

/// Execution logic for one operation type.
pub trait MsgHandler: Send + Sync {
    /// Execute `msg` against `store`.
    fn handle(
        &self,
        store: &mut dyn KvStore,
        msg: &dyn HostMsg,
    ) -> Result<HandlerResponse, OperationError>;
}

/// Dispatch table.
pub trait MsgRouter: Send + Sync {
    /// Handler registered for `type_url`.
    fn handler(&self, type_url: &str) -> Option<&dyn MsgHandler>;
}

/// Handler built from a closure over the type-erased message.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&mut dyn KvStore, &dyn HostMsg) -> Result<HandlerResponse, OperationError>
        + Send
        + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> MsgHandler for FnHandler<F>
where
    F: Fn(&mut dyn KvStore, &dyn HostMsg) -> Result<HandlerResponse, OperationError>
        + Send
        + Sync,
{
    fn handle(
        &self,
        store: &mut dyn KvStore,
        msg: &dyn HostMsg,
    ) -> Result<HandlerResponse, OperationError> {
        (self.f)(store, msg)
    }
}

/// Handler for a single concrete operation type.
///
/// Messages of any other type are refused with `UnexpectedMessage`.
pub struct TypedHandler<T, F> {
    f: F,
    _msg: PhantomData<fn(&T)>,
}

impl<T, F> TypedHandler<T, F>
where
    T: TypedMsg,
    F: Fn(&mut dyn KvStore, &T) -> Result<HandlerResponse, OperationError> + Send + Sync,
{
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self {
            f,
            _msg: PhantomData,
        }
    }
}

impl<T, F> MsgHandler for TypedHandler<T, F>
where
    T: TypedMsg,
    F: Fn(&mut dyn KvStore, &T) -> Result<HandlerResponse, OperationError> + Send + Sync,
{
    fn handle(
        &self,
        store: &mut dyn KvStore,
        msg: &dyn HostMsg,
    ) -> Result<HandlerResponse, OperationError> {
        let typed = downcast::<T>(msg)
            .ok_or_else(|| OperationError::UnexpectedMessage(msg.type_url().to_string()))?;
        (self.f)(store, typed)
    }
}

impl<T, F> fmt::Debug for TypedHandler<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedHandler")
            .field("msg", &std::any::type_name::<T>())
            .finish()
    }
}
