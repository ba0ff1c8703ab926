//! # Nom-Chain - Momentum Production (Subsystem 04)
//!
//! **Bounded Context:** Momentum Assembly
//!
//! ## Purpose
//!
//! When the local pillar's producer slot starts, this subsystem builds the
//! next momentum on top of the frontier:
//! - Chooses which uncommitted account blocks go into it, by priority and
//!   within the per-momentum plasma budget
//! - Records the next round's fusion and work prices
//! - Hands the result to a finalizer that signs it
//!
//! Before the dynamic plasma spork is enforced, content comes from the
//! legacy selection and momentums carry version 1 with no prices.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - Memory: store, block pool and finalizer          │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: MomentumProducerService                 │
//! │  - Outbound: MomentumStore, UncommittedBlockPool,   │
//! │    MomentumFinalizer                                │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain (Inner - Pure Logic)                        │
//! │  - ContentSelector                                  │
//! │  - Stable merge sort                                │
//! │  - Invariants: plasma budget, contract cap, heights │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Plasma Budget**: sum(base_plasma) of user blocks ≤ budget
//! 2. **Contract Cap**: contract blocks ≤ budget / 52_500
//! 3. **Height Ordering**: blocks of one account appear by ascending height
//! 4. **Contract Pairs**: a contract's receive and the sends it produced are
//!    admitted together or not at all
//! 5. **Serialized Rounds**: at most one momentum is built at a time
//!
//! ## Module Structure
//!
//! - [`domain`]: content selection, stable sort and invariant checks
//! - [`ports`]: hexagonal interfaces (inbound/outbound)
//! - [`adapters`]: in-memory implementations of the outbound ports
//! - [`service`]: the round orchestrator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::MomentumProductionConfig;
pub use domain::ContentSelector;
pub use error::{MomentumProductionError, Result};
pub use metrics::Metrics;
pub use ports::{
    MomentumFinalizer, MomentumProducerService, MomentumStore, SignerKey, UncommittedBlockPool,
};
pub use service::ConcreteMomentumProducer;
