//! # Algorithms Module
//!
//! The packet execution pipeline: codec, authentication, dispatch, the
//! cache branch and the atomic executor built on top of them.

pub mod authenticate;
pub mod branch;
pub mod codec;
pub mod dispatch;
pub mod executor;

pub use authenticate::authenticate_tx;
pub use branch::CacheBranch;
pub use codec::{decode_results, encode_operations, encode_results, MsgRegistry};
pub use dispatch::execute_msg;
pub use executor::AtomicExecutor;
