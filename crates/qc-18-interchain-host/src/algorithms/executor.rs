//! # Atomic Executor
//!
//! Executes an authenticated operation batch with all-or-nothing semantics.
//!
//! ## Algorithm
//!
//! 1. Resolve the destination channel and its connection.
//! 2. Authenticate the batch (no state is touched on failure).
//! 3. Branch the ambient state; validate and dispatch each operation in order.
//! 4. On full success merge branch events, then branch writes, into the
//!    ambient state. Any failure drops the branch.
//! 5. Encode the ordered results.
//!
//! Encoding happens after the merge: an `Encode` error is the one error
//! returned with the batch already committed.

use super::authenticate::authenticate_tx;
use super::branch::CacheBranch;
use super::codec::encode_results;
use super::dispatch::execute_msg;
use crate::domain::{ChannelId, HostError, HostMsg, OperationResult, PortId};
use crate::ports::outbound::{
    AccountRegistry, ChannelKeeper, EventSink, HostParamsSource, LedgerState, MsgRouter,
};
use tracing::{debug, info};

/// Executor over borrowed collaborators.
#[derive(Clone, Copy)]
pub struct AtomicExecutor<'a> {
    /// Channel registry.
    pub channels: &'a dyn ChannelKeeper,
    /// Interchain account registry.
    pub accounts: &'a dyn AccountRegistry,
    /// Host parameters.
    pub params: &'a dyn HostParamsSource,
    /// Dispatch table.
    pub router: &'a dyn MsgRouter,
}

impl<'a> AtomicExecutor<'a> {
    /// Execute `msgs` received on `(dest_port, dest_channel)` from `source_port`.
    ///
    /// Returns the encoded [`crate::domain::BatchResult`].
    pub fn execute_tx(
        &self,
        state: &mut dyn LedgerState,
        source_port: &PortId,
        dest_port: &PortId,
        dest_channel: &ChannelId,
        msgs: &[Box<dyn HostMsg>],
    ) -> Result<Vec<u8>, HostError> {
        let channel_not_found = || HostError::ChannelNotFound {
            port: dest_port.to_string(),
            channel: dest_channel.to_string(),
        };
        let channel = self
            .channels
            .get_channel(dest_port, dest_channel)
            .ok_or_else(channel_not_found)?;
        let connection = channel.connection().ok_or_else(channel_not_found)?;

        authenticate_tx(self.accounts, self.params, msgs, connection, source_port)?;

        let mut branch = CacheBranch::new(state);
        let mut results = Vec::with_capacity(msgs.len());

        for (index, msg) in msgs.iter().enumerate() {
            msg.validate_basic()
                .map_err(|source| HostError::InvalidOperation { index, source })?;

            let data = execute_msg(self.router, &mut branch, index, msg.as_ref())?;

            results.push(OperationResult {
                msg_type: msg.type_url().to_string(),
                data,
            });
        }

        debug!(
            writes = branch.pending_writes(),
            events = branch.events().len(),
            "[qc-18] Committing batch"
        );
        branch.write();

        info!(
            connection = %connection,
            operations = results.len(),
            "[qc-18] Batch executed"
        );

        encode_results(&results)
    }
}
