//! # Domain Module
//!
//! Core domain types for the Interchain Account Host.

pub mod ack;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod msg;
pub mod value_objects;

pub use ack::Acknowledgement;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use msg::{downcast, pack, HostMsg, TypedMsg};
pub use value_objects::*;
