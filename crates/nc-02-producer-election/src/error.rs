//! Error types for producer election

use thiserror::Error;

/// Result type alias for election operations
pub type Result<T> = std::result::Result<T, ElectionError>;

/// Errors that can occur during producer election
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElectionError {
    /// No pillar is eligible in this tick
    #[error("Cannot elect producers from an empty candidate set")]
    EmptyCandidateSet,
}
