//! # Nom-Chain - Embedded Contracts (Subsystem 03)
//!
//! **Bounded Context:** Protocol-Native Contract Dispatch
//!
//! ## Purpose
//!
//! Resolves a call to an embedded contract (address + 4-byte method
//! selector) to the method implementation enabled under the active sporks.
//!
//! ## Dispatch Table
//!
//! ```text
//! base registry ──► + Accelerator overlay ──► + DynamicPlasma overlay ──► table
//!                     (if spork active)          (if spork active)
//! ```
//!
//! The table is composed fresh from an immutable base for every query;
//! nothing is mutated in place. Lookups fail with one of three distinct
//! outcomes: the address is not a contract address, no contract lives at
//! the address, or the method is not enabled.
//!
//! ## Module Structure
//!
//! - [`abi`]: selectors and parameter encoding
//! - [`context`]: state a method reads and writes while receiving
//! - [`methods`]: plasma, spork and donation methods
//! - [`registry`]: base table, overlays, lookup

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod context;
pub mod error;
pub mod methods;
pub mod registry;

pub use context::{EmbeddedContext, FusionEntry, MemoryContext, SporkInfo};
pub use error::{EmbeddedError, Result};
pub use methods::{EmbeddedMethod, PlasmaTable};
pub use registry::{ContractRegistry, ContractTable};
