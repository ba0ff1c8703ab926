//! # Nom-Chain - Producer Election (Subsystem 02)
//!
//! **Bounded Context:** Consensus Scheduling
//!
//! ## Purpose
//!
//! Selects the ordered list of pillars allowed to produce momentums during
//! one election tick, reproducibly by any node from public chain data only:
//! the weighted candidate set and the anchor momentum height.
//!
//! ## Critical Invariants
//!
//! 1. **Determinism**: identical candidates and seed give identical output
//! 2. **Exact Size**: the result has exactly `node_count` entries; repeats
//!    are expected when there are fewer candidates than slots
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let election = ProducerElection::new(ElectionAlgorithm::Uniform, 30);
//! let elected = election.select_producers(&delegations, anchor.height)?;
//! let events = producer_events(&elected, tick_start, block_time);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod election;
pub mod error;
pub mod schedule;

pub use election::ProducerElection;
pub use error::{ElectionError, Result};
pub use schedule::producer_events;
pub use shared_types::ElectionAlgorithm;
