//! Spork contract: creation and activation of protocol upgrade switches.

use std::sync::Arc;

use shared_types::{AccountBlock, Hash, ProtocolConfig};
use tracing::info;

use super::{EmbeddedMethod, PlasmaTable};
use crate::abi::unpack_method;
use crate::context::{EmbeddedContext, SporkInfo};
use crate::error::{EmbeddedError, Result};

/// `CreateSpork(string,string)` signature.
pub const CREATE_SPORK_SIGNATURE: &str = "CreateSpork(string,string)";
/// `ActivateSpork(hash)` signature.
pub const ACTIVATE_SPORK_SIGNATURE: &str = "ActivateSpork(hash)";

/// Shortest allowed spork name.
pub const SPORK_NAME_MIN_LENGTH: usize = 5;
/// Longest allowed spork name.
pub const SPORK_NAME_MAX_LENGTH: usize = 40;
/// Longest allowed spork description.
pub const SPORK_DESCRIPTION_MAX_LENGTH: usize = 400;
/// Momentums between activation and enforcement.
pub const SPORK_MIN_HEIGHT_DELAY: u64 = 6;

fn check_spork_caller(protocol: &ProtocolConfig, block: &AccountBlock) -> Result<()> {
    if block.address != protocol.spork_address {
        return Err(EmbeddedError::PermissionDenied);
    }
    if !block.amount.is_zero() {
        return Err(EmbeddedError::InvalidTokenOrAmount);
    }
    Ok(())
}

/// Record a new, inactive spork.
pub struct CreateSporkMethod {
    protocol: Arc<ProtocolConfig>,
}

impl CreateSporkMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for CreateSporkMethod {
    fn signature(&self) -> &'static str {
        CREATE_SPORK_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_simple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        check_spork_caller(&self.protocol, block)?;
        let (name, description): (String, String) =
            unpack_method(CREATE_SPORK_SIGNATURE, &block.data)?;
        if !(SPORK_NAME_MIN_LENGTH..=SPORK_NAME_MAX_LENGTH).contains(&name.len()) {
            return Err(EmbeddedError::ForbiddenParam(format!(
                "spork name length {}",
                name.len()
            )));
        }
        if description.len() > SPORK_DESCRIPTION_MAX_LENGTH {
            return Err(EmbeddedError::ForbiddenParam(format!(
                "spork description length {}",
                description.len()
            )));
        }
        Ok(())
    }

    fn receive_block(
        &self,
        context: &mut dyn EmbeddedContext,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>> {
        self.validate_send_block(send_block)?;
        let (name, description): (String, String) =
            unpack_method(CREATE_SPORK_SIGNATURE, &send_block.data)?;
        info!("[nc-03] Spork '{}' created with id {:?}", name, send_block.hash);
        context.save_spork(SporkInfo {
            id: send_block.hash,
            name,
            description,
            activated: false,
            enforcement_height: 0,
        });
        Ok(Vec::new())
    }
}

/// Activate a recorded spork after a fixed delay.
pub struct ActivateSporkMethod {
    protocol: Arc<ProtocolConfig>,
}

impl ActivateSporkMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for ActivateSporkMethod {
    fn signature(&self) -> &'static str {
        ACTIVATE_SPORK_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_simple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        check_spork_caller(&self.protocol, block)?;
        unpack_method::<Hash>(ACTIVATE_SPORK_SIGNATURE, &block.data)?;
        Ok(())
    }

    fn receive_block(
        &self,
        context: &mut dyn EmbeddedContext,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>> {
        self.validate_send_block(send_block)?;
        let id: Hash = unpack_method(ACTIVATE_SPORK_SIGNATURE, &send_block.data)?;

        let mut spork = context.spork(&id).ok_or(EmbeddedError::DataNonExistent)?;
        if spork.activated {
            return Err(EmbeddedError::AlreadyActive);
        }
        spork.activated = true;
        spork.enforcement_height = context.frontier_momentum().height + SPORK_MIN_HEIGHT_DELAY;
        info!(
            "[nc-03] Spork '{}' activated, enforced from height {}",
            spork.name, spork.enforcement_height
        );
        context.save_spork(spork);
        Ok(Vec::new())
    }
}
