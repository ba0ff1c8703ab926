//! # Error Types
//!
//! Defines error types shared across subsystems.

use thiserror::Error;

/// Errors from parsing textual identifiers (addresses, token standards).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input is not valid hex.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Decoded byte length does not match the identifier size.
    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Errors from applying network-variant overrides at genesis.
///
/// Any of these refuses startup; no core component is built from a
/// partially applied configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenesisError {
    /// Override string has the wrong number of fields.
    #[error("Malformed genesis extra data: expected 4 fields, got {0}")]
    WrongArgumentCount(usize),

    /// Election algorithm identifier is not known.
    #[error("Unknown election algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Block time is not a number.
    #[error("Invalid block time: {0}")]
    InvalidBlockTime(String),

    /// Block time outside `1..=3600` seconds.
    #[error("Block time out of range: {0}s (allowed 1..=3600)")]
    BlockTimeOutOfRange(u64),

    /// The genesis must define both native tokens.
    #[error("Genesis defines {0} tokens, at least 2 required")]
    MissingTokens(usize),
}
