//! # QC-18 Interchain Account Host
//!
//! Executes operation batches sent by a controller chain on behalf of its
//! interchain account on this chain.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A controller chain owns an interchain account here and directs it over a
//! cross-chain channel. For every received packet the host:
//! - decodes the envelope and the operation batch,
//! - checks every operation against the allow-list and the account address,
//! - executes the batch atomically on a cache branch of ledger state,
//! - returns the encoded per-operation results as acknowledgement data.
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | Atomicity | Cache branch merged only after every operation succeeds |
//! | Determinism | Fixed batch order, ordered write set, code-only error acks |
//! | Authorization first | Allow-list and signer checks run before any branch exists |
//! | Strict decoding | Unknown types, empty batches and trailing bytes are refused |
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-interchain-host/
//! ├── domain/          # Packet, PacketData, HostMsg, errors, invariants, ack
//! ├── algorithms/      # Codec, authentication, dispatch, cache branch, executor
//! ├── ports/           # InterchainHostApi, registries, router, ledger state
//! ├── adapters/        # In-memory ledger, registries, router, bank MsgSend
//! ├── config.rs        # HostConfig (host_enabled, allow_messages)
//! └── service.rs       # InterchainHostService (packet handler)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{
    InMemoryAccountRegistry, InMemoryChannelKeeper, InMemoryLedger, MsgServiceRouter,
};
pub use algorithms::{
    authenticate_tx, decode_results, encode_operations, encode_results, execute_msg,
    AtomicExecutor, CacheBranch, MsgRegistry,
};
pub use config::{ConfigError, HostConfig};
pub use domain::{
    Acknowledgement, BatchResult, ChannelEnd, ChannelId, Coin, ConnectionId, Event, HostError,
    HostMsg, OperationError, OperationResult, Packet, PacketData, PacketType, PortId, TypedMsg,
    UnauthorizedReason, ALLOW_ALL_WILDCARD,
};
pub use ports::{
    AccountRegistry, ChannelKeeper, EventSink, FnHandler, HandlerResponse, HostParamsSource,
    InterchainHostApi, KvStore, LedgerState, MsgHandler, MsgRouter, TypedHandler,
};
pub use service::{HostStats, InterchainHostService};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
