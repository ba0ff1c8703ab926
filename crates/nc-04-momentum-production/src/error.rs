//! Error types for momentum production

use shared_types::Address;
use thiserror::Error;

/// Result type for momentum production operations
pub type Result<T> = std::result::Result<T, MomentumProductionError>;

/// Momentum production errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MomentumProductionError {
    /// Chain state could not be read
    #[error("Momentum store error: {0}")]
    Store(String),

    /// Uncommitted blocks could not be read
    #[error("Block pool error: {0}")]
    Pool(String),

    /// Signing or finalization failed
    #[error("Finalizer error: {0}")]
    Finalizer(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The frontier is at the last representable height
    #[error("Momentum height overflow after {height}")]
    HeightOverflow {
        /// Frontier height
        height: u64,
    },

    /// Selected user blocks exceed the plasma budget
    #[error("Plasma budget exceeded: used {used}, limit {limit}")]
    PlasmaBudgetExceeded {
        /// Base plasma of the selected user blocks
        used: u64,
        /// Budget for the round
        limit: u64,
    },

    /// Selected contract blocks exceed the per-momentum cap
    #[error("Contract block cap exceeded: {count} > {cap}")]
    ContractCapExceeded {
        /// Selected contract blocks
        count: usize,
        /// Cap for the round
        cap: usize,
    },

    /// Blocks of one account are out of height order
    #[error("Height order violation for {address}: {previous} then {next}")]
    HeightOrderViolation {
        /// Account
        address: Address,
        /// Height seen first
        previous: u64,
        /// Height seen after it
        next: u64,
    },
}

impl MomentumProductionError {
    /// Check if the round can simply be retried at the next slot
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MomentumProductionError::Store(_)
                | MomentumProductionError::Pool(_)
                | MomentumProductionError::Finalizer(_)
        )
    }

    /// Check if this error indicates a selection bug
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            MomentumProductionError::PlasmaBudgetExceeded { .. }
                | MomentumProductionError::ContractCapExceeded { .. }
                | MomentumProductionError::HeightOrderViolation { .. }
        )
    }
}
