//! # Allow-List Authentication
//!
//! Checks that a controller may act as its interchain account for every
//! operation in a batch.
//!
//! Checks run in batch order and stop at the first refused operation, so
//! every node rejects a packet citing the same operation.

use crate::domain::{invariant_operation_authorized, ConnectionId, HostError, HostMsg, PortId};
use crate::ports::outbound::{AccountRegistry, HostParamsSource};
use tracing::{debug, warn};

/// Authenticate `msgs` for the account owned by `(connection, controller_port)`.
///
/// Pure with respect to ledger state.
pub fn authenticate_tx(
    accounts: &dyn AccountRegistry,
    params: &dyn HostParamsSource,
    msgs: &[Box<dyn HostMsg>],
    connection: &ConnectionId,
    controller_port: &PortId,
) -> Result<(), HostError> {
    let account = accounts
        .interchain_account_address(connection, controller_port)
        .ok_or_else(|| HostError::AccountNotFound {
            connection: connection.to_string(),
            port: controller_port.to_string(),
        })?;

    let allow_list = params.allow_messages();
    debug!(
        account = %account,
        allowed = allow_list.len(),
        "[qc-18] Authenticating {} operations",
        msgs.len()
    );

    for (index, msg) in msgs.iter().enumerate() {
        if let Err(reason) = invariant_operation_authorized(&allow_list, msg.as_ref(), &account) {
            warn!(index, type_url = msg.type_url(), "[qc-18] Operation refused: {}", reason);
            return Err(HostError::Unauthorized { index, reason });
        }
    }

    Ok(())
}
