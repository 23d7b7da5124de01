//! # Inbound Ports
//!
//! API trait defining what the Interchain Account Host can do.

use crate::domain::{Acknowledgement, HostError, Packet};
use crate::ports::outbound::LedgerState;
use crate::service::HostStats;

/// Interchain account host API - inbound port.
///
/// Each call is one synchronous unit of work over `state`; operations of a
/// packet are applied to `state` entirely or not at all.
pub trait InterchainHostApi: Send + Sync {
    /// Handle a received packet and return the encoded batch result.
    ///
    /// On `Err`, `state` is unchanged unless the error is
    /// [`HostError::Encode`], which is raised after commit.
    fn on_recv_packet(
        &self,
        state: &mut dyn LedgerState,
        packet: &Packet,
    ) -> Result<Vec<u8>, HostError>;

    /// Handle a received packet and return its acknowledgement.
    ///
    /// Also records an `ics27_packet` event on `state` for either outcome.
    fn on_recv_packet_ack(&self, state: &mut dyn LedgerState, packet: &Packet) -> Acknowledgement;

    /// Packet handling statistics.
    fn stats(&self) -> HostStats;
}
