//! Donations to a contract treasury.

use std::sync::Arc;

use shared_types::{AccountBlock, ProtocolConfig};
use tracing::debug;

use super::{EmbeddedMethod, PlasmaTable};
use crate::abi::unpack_method;
use crate::context::EmbeddedContext;
use crate::error::{EmbeddedError, Result};

/// `Donate()` signature.
pub const DONATE_SIGNATURE: &str = "Donate()";

/// Credit ZNN or QSR to the receiving contract.
pub struct DonateMethod {
    protocol: Arc<ProtocolConfig>,
}

impl DonateMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for DonateMethod {
    fn signature(&self) -> &'static str {
        DONATE_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_simple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        unpack_method::<()>(DONATE_SIGNATURE, &block.data)?;
        let known_token = block.token_standard == self.protocol.znn_token
            || block.token_standard == self.protocol.qsr_token;
        if !known_token || block.amount.is_zero() {
            return Err(EmbeddedError::InvalidTokenOrAmount);
        }
        Ok(())
    }

    fn receive_block(
        &self,
        context: &mut dyn EmbeddedContext,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>> {
        self.validate_send_block(send_block)?;
        context.add_balance(
            &send_block.to_address,
            &send_block.token_standard,
            send_block.amount,
        );
        debug!(
            "[nc-03] Donation of {} {} to {}",
            send_block.amount, send_block.token_standard, send_block.to_address
        );
        Ok(Vec::new())
    }
}
