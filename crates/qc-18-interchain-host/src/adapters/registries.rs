//! # In-Memory Registries
//!
//! Channel and interchain account registries backed by hash maps.

use crate::domain::{ChannelEnd, ChannelId, ConnectionId, PortId};
use crate::ports::outbound::{AccountRegistry, ChannelKeeper};
use std::collections::HashMap;

/// In-memory channel registry.
#[derive(Clone, Debug, Default)]
pub struct InMemoryChannelKeeper {
    channels: HashMap<(PortId, ChannelId), ChannelEnd>,
}

impl InMemoryChannelKeeper {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a channel end.
    pub fn insert(&mut self, port: PortId, channel: ChannelId, end: ChannelEnd) {
        self.channels.insert((port, channel), end);
    }
}

impl ChannelKeeper for InMemoryChannelKeeper {
    fn get_channel(&self, port: &PortId, channel: &ChannelId) -> Option<ChannelEnd> {
        self.channels.get(&(port.clone(), channel.clone())).cloned()
    }
}

/// In-memory interchain account registry.
#[derive(Clone, Debug, Default)]
pub struct InMemoryAccountRegistry {
    accounts: HashMap<(ConnectionId, PortId), String>,
}

impl InMemoryAccountRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the account owned by `(connection, controller_port)`.
    pub fn register(
        &mut self,
        connection: ConnectionId,
        controller_port: PortId,
        address: impl Into<String>,
    ) {
        self.accounts
            .insert((connection, controller_port), address.into());
    }
}

impl AccountRegistry for InMemoryAccountRegistry {
    fn interchain_account_address(
        &self,
        connection: &ConnectionId,
        controller_port: &PortId,
    ) -> Option<String> {
        self.accounts
            .get(&(connection.clone(), controller_port.clone()))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_lookup() {
        let mut keeper = InMemoryChannelKeeper::new();
        keeper.insert(
            PortId::new("icahost"),
            ChannelId::new("channel-0"),
            ChannelEnd {
                counterparty_port: PortId::new("icacontroller-alice"),
                counterparty_channel: ChannelId::new("channel-1"),
                connection_hops: vec![ConnectionId::new("connection-0")],
            },
        );

        assert!(keeper
            .get_channel(&PortId::new("icahost"), &ChannelId::new("channel-0"))
            .is_some());
        assert!(keeper
            .get_channel(&PortId::new("transfer"), &ChannelId::new("channel-0"))
            .is_none());
    }

    #[test]
    fn test_account_lookup_is_keyed_by_connection_and_port() {
        let mut accounts = InMemoryAccountRegistry::new();
        accounts.register(
            ConnectionId::new("connection-0"),
            PortId::new("icacontroller-alice"),
            "ica1",
        );

        assert_eq!(
            accounts.interchain_account_address(
                &ConnectionId::new("connection-0"),
                &PortId::new("icacontroller-alice")
            ),
            Some("ica1".to_string())
        );
        assert!(accounts
            .interchain_account_address(
                &ConnectionId::new("connection-1"),
                &PortId::new("icacontroller-alice")
            )
            .is_none());
        assert!(accounts
            .interchain_account_address(
                &ConnectionId::new("connection-0"),
                &PortId::new("icacontroller-bob")
            )
            .is_none());
    }
}
