//! # Dispatch
//!
//! Resolves and invokes the handler for a single operation.

use super::branch::CacheBranch;
use crate::domain::{HostError, HostMsg};
use crate::ports::outbound::{EventSink, MsgRouter};
use tracing::debug;

/// Execute one operation against the branch and return its result data.
///
/// Handler events land in the branch's event buffer only on success.
pub fn execute_msg(
    router: &dyn MsgRouter,
    branch: &mut CacheBranch<'_>,
    index: usize,
    msg: &dyn HostMsg,
) -> Result<Vec<u8>, HostError> {
    let handler = router
        .handler(msg.type_url())
        .ok_or_else(|| HostError::NoRoute {
            index,
            type_url: msg.type_url().to_string(),
        })?;

    let response = handler
        .handle(branch, msg)
        .map_err(|source| HostError::OperationFailed { index, source })?;

    debug!(
        index,
        type_url = msg.type_url(),
        events = response.events.len(),
        "[qc-18] Operation executed"
    );

    branch.emit_events(response.events);
    Ok(response.data)
}
