//! # Bank Operations
//!
//! Coin transfers executed on behalf of an interchain account.
//!
//! Balances live under `balances/<address>/<denom>` as 16-byte big-endian
//! amounts.

use crate::domain::{Coin, Event, OperationError, TypedMsg};
use crate::ports::outbound::{HandlerResponse, KvStore};
use serde::{Deserialize, Serialize};

/// Event type emitted by a successful transfer.
pub const TRANSFER_EVENT: &str = "transfer";

fn balance_key(address: &str, denom: &str) -> Vec<u8> {
    format!("balances/{address}/{denom}").into_bytes()
}

fn read_balance(store: &dyn KvStore, address: &str, denom: &str) -> Result<u128, OperationError> {
    match store.get(&balance_key(address, denom)) {
        None => Ok(0),
        Some(bytes) => {
            let raw: [u8; 16] = bytes.as_slice().try_into().map_err(|_| {
                OperationError::Failed(format!("corrupt balance for {address}/{denom}"))
            })?;
            Ok(u128::from_be_bytes(raw))
        }
    }
}

/// Balance of `address` in `denom` (zero if absent or unreadable).
pub fn balance(store: &dyn KvStore, address: &str, denom: &str) -> u128 {
    read_balance(store, address, denom).unwrap_or(0)
}

/// Overwrite the balance of `address` in `denom`.
pub fn set_balance(store: &mut dyn KvStore, address: &str, denom: &str, amount: u128) {
    store.set(&balance_key(address, denom), amount.to_be_bytes().to_vec());
}

/// Send coins from one account to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSend {
    /// Sender; must be the interchain account.
    pub from_address: String,
    /// Recipient.
    pub to_address: String,
    /// Coins to transfer.
    pub amount: Vec<Coin>,
}

impl TypedMsg for MsgSend {
    const TYPE_URL: &'static str = "/cosmos.bank.v1beta1.MsgSend";

    fn signers(&self) -> Vec<String> {
        vec![self.from_address.clone()]
    }

    fn validate_basic(&self) -> Result<(), OperationError> {
        if self.from_address.trim().is_empty() {
            return Err(OperationError::InvalidAddress("empty sender".into()));
        }
        if self.to_address.trim().is_empty() {
            return Err(OperationError::InvalidAddress("empty recipient".into()));
        }
        if self.amount.is_empty() {
            return Err(OperationError::InvalidCoins("no coins".into()));
        }
        if let Some(coin) = self.amount.iter().find(|coin| !coin.is_valid()) {
            return Err(OperationError::InvalidCoins(coin.to_string()));
        }
        Ok(())
    }
}

/// Execute a [`MsgSend`].
pub fn send_handler(
    store: &mut dyn KvStore,
    msg: &MsgSend,
) -> Result<HandlerResponse, OperationError> {
    for coin in &msg.amount {
        let available = read_balance(store, &msg.from_address, &coin.denom)?;
        let remaining =
            available
                .checked_sub(coin.amount)
                .ok_or_else(|| OperationError::InsufficientFunds {
                    denom: coin.denom.clone(),
                    required: coin.amount,
                    available,
                })?;
        set_balance(store, &msg.from_address, &coin.denom, remaining);

        let credited = read_balance(store, &msg.to_address, &coin.denom)?
            .checked_add(coin.amount)
            .ok_or_else(|| OperationError::Failed("balance overflow".into()))?;
        set_balance(store, &msg.to_address, &coin.denom, credited);
    }

    let amount = msg
        .amount
        .iter()
        .map(Coin::to_string)
        .collect::<Vec<_>>()
        .join(",");

    Ok(HandlerResponse {
        data: Vec::new(),
        events: vec![Event::new(TRANSFER_EVENT)
            .with_attribute("recipient", msg.to_address.clone())
            .with_attribute("sender", msg.from_address.clone())
            .with_attribute("amount", amount)],
    })
}
