//! Error types for embedded contract dispatch and execution

use nc_01_dynamic_plasma::DynamicPlasmaError;
use thiserror::Error;

/// Result type alias for embedded contract operations
pub type Result<T> = std::result::Result<T, EmbeddedError>;

/// Errors raised by dispatch or by a method
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddedError {
    /// Address does not carry the embedded contract prefix
    #[error("Address is not a contract address")]
    NotContractAddress,

    /// No embedded contract at this address under the active sporks
    #[error("Contract does not exist")]
    ContractDoesntExist,

    /// Contract exists but the method is unknown or not enabled
    #[error("Contract method not found")]
    ContractMethodNotFound,

    /// Call data could not be decoded
    #[error("Failed to unpack call data")]
    UnpackError,

    /// Wrong token or amount for this method
    #[error("Invalid token or amount")]
    InvalidTokenOrAmount,

    /// Caller may not invoke this method
    #[error("Permission denied")]
    PermissionDenied,

    /// Parameter outside protocol bounds
    #[error("Forbidden parameter: {0}")]
    ForbiddenParam(String),

    /// Referenced entry does not exist
    #[error("Data non existent")]
    DataNonExistent,

    /// Fusion is still locked
    #[error("Revoke not due")]
    RevokeNotDue,

    /// Spork is already active
    #[error("Spork already active")]
    AlreadyActive,
}

impl From<DynamicPlasmaError> for EmbeddedError {
    fn from(err: DynamicPlasmaError) -> Self {
        match err {
            DynamicPlasmaError::ForbiddenParam(reason) => EmbeddedError::ForbiddenParam(reason),
        }
    }
}
