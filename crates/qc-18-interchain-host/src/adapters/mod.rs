//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports, plus the bank transfer
//! operation used as the reference handler.

pub mod bank;
mod memory_state;
mod registries;
mod router;

pub use memory_state::InMemoryLedger;
pub use registries::{InMemoryAccountRegistry, InMemoryChannelKeeper};
pub use router::MsgServiceRouter;
