//! # Domain Invariants
//!
//! Authorization rules for operations executed on behalf of an interchain
//! account.

use super::errors::UnauthorizedReason;
use super::msg::HostMsg;
use super::value_objects::ALLOW_ALL_WILDCARD;

/// Invariant: operation type is on the allow-list.
///
/// A wildcard entry anywhere in the list permits every type, regardless of
/// the other entries.
pub fn invariant_type_allowed(allow_list: &[String], type_url: &str) -> bool {
    allow_list
        .iter()
        .any(|entry| entry == ALLOW_ALL_WILDCARD || entry == type_url)
}

/// Invariant: every signer of the operation is the interchain account.
///
/// Returns the first offending signer.
pub fn invariant_signers_match(
    msg: &dyn HostMsg,
    account: &str,
) -> Result<(), UnauthorizedReason> {
    match msg.signers().into_iter().find(|signer| signer != account) {
        Some(got) => Err(UnauthorizedReason::SignerMismatch {
            expected: account.to_string(),
            got,
        }),
        None => Ok(()),
    }
}

/// Check both invariants for one operation, type first.
pub fn invariant_operation_authorized(
    allow_list: &[String],
    msg: &dyn HostMsg,
    account: &str,
) -> Result<(), UnauthorizedReason> {
    if !invariant_type_allowed(allow_list, msg.type_url()) {
        return Err(UnauthorizedReason::DisallowedType {
            type_url: msg.type_url().to_string(),
        });
    }
    invariant_signers_match(msg, account)
}
