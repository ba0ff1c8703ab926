//! # Embedded Methods
//!
//! Every method exposes the same capability: its plasma cost, a static
//! check on send blocks, and the receive step that applies a send block.

pub mod donate;
pub mod plasma;
pub mod spork;

use shared_types::constants::{
    EMBEDDED_SIMPLE_PLASMA, EMBEDDED_W_DOUBLE_WITHDRAW_PLASMA, EMBEDDED_W_WITHDRAW_PLASMA,
};
use shared_types::AccountBlock;

use crate::context::EmbeddedContext;
use crate::error::Result;

pub use donate::DonateMethod;
pub use plasma::{CancelFuseMethod, FuseMethod, SetPlasmaVariablesMethod};
pub use spork::{ActivateSporkMethod, CreateSporkMethod};

/// Plasma charged for embedded calls, including the receive block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlasmaTable {
    /// Call without withdrawal.
    pub embedded_simple: u64,
    /// Call that refunds tokens.
    pub embedded_w_withdraw: u64,
    /// Call that performs two withdrawals.
    pub embedded_w_double_withdraw: u64,
}

impl Default for PlasmaTable {
    fn default() -> Self {
        Self {
            embedded_simple: EMBEDDED_SIMPLE_PLASMA,
            embedded_w_withdraw: EMBEDDED_W_WITHDRAW_PLASMA,
            embedded_w_double_withdraw: EMBEDDED_W_DOUBLE_WITHDRAW_PLASMA,
        }
    }
}

/// A method of an embedded contract.
pub trait EmbeddedMethod: Send + Sync {
    /// Method signature, e.g. `"Fuse(address)"`.
    fn signature(&self) -> &'static str;

    /// Plasma required to call this method.
    fn required_plasma(&self, table: &PlasmaTable) -> u64;

    /// Static check every send block must pass before entering a chain.
    fn validate_send_block(&self, block: &AccountBlock) -> Result<()>;

    /// Apply `send_block` and return the blocks the contract sends in turn.
    ///
    /// On error the caller discards the context writes and refunds the
    /// sender.
    fn receive_block(
        &self,
        context: &mut dyn EmbeddedContext,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>>;
}
