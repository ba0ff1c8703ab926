//! Error types for the dynamic plasma subsystem

use thiserror::Error;

/// Result type alias for dynamic plasma operations
pub type Result<T> = std::result::Result<T, DynamicPlasmaError>;

/// Errors that can occur while pricing plasma
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynamicPlasmaError {
    /// A parameter lies outside protocol bounds
    #[error("Forbidden parameter: {0}")]
    ForbiddenParam(String),
}
