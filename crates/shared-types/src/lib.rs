//! # Shared Types Crate
//!
//! This crate contains the data model shared by every Nom-Chain subsystem:
//! account blocks, momentums, plasma bookkeeping types, fixed protocol
//! constants and the network-variant [`ProtocolConfig`].
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Immutable protocol parameters**: Values that differ between network
//!   variants live in [`ProtocolConfig`], which is built once from the
//!   genesis configuration and then passed by reference. Nothing here is a
//!   process-wide mutable global.
//! - **Deterministic encoding**: Hashes are computed over a canonical
//!   big-endian field encoding so every node derives identical values.

pub mod constants;
pub mod entities;
pub mod errors;
pub mod protocol;

pub use entities::*;
pub use errors::*;
pub use protocol::*;
