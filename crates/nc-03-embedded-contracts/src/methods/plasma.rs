//! Plasma contract: fusion of QSR and governance of plasma variables.

use std::sync::Arc;

use nc_01_dynamic_plasma::validate_plasma_variables;
use primitive_types::U256;
use shared_types::constants::{COST_PER_FUSION_UNIT, FUSE_MIN_AMOUNT};
use shared_types::{
    AccountBlock, Address, BlockType, Hash, PlasmaVariables, ProtocolConfig, PLASMA_CONTRACT,
};
use tracing::debug;

use super::{EmbeddedMethod, PlasmaTable};
use crate::abi::unpack_method;
use crate::context::{EmbeddedContext, FusionEntry};
use crate::error::{EmbeddedError, Result};

/// `Fuse(address)` signature.
pub const FUSE_SIGNATURE: &str = "Fuse(address)";
/// `CancelFuse(hash)` signature.
pub const CANCEL_FUSE_SIGNATURE: &str = "CancelFuse(hash)";
/// `SetVariables(...)` signature.
pub const SET_VARIABLES_SIGNATURE: &str = "SetVariables(uint64,uint64,uint64,uint8,uint8)";

// =============================================================================
// FUSE
// =============================================================================

/// Lock QSR to grant plasma to a beneficiary.
pub struct FuseMethod {
    protocol: Arc<ProtocolConfig>,
}

impl FuseMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for FuseMethod {
    fn signature(&self) -> &'static str {
        FUSE_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_simple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        unpack_method::<Address>(FUSE_SIGNATURE, &block.data)?;

        if block.token_standard != self.protocol.qsr_token
            || block.amount < U256::from(FUSE_MIN_AMOUNT)
        {
            return Err(EmbeddedError::InvalidTokenOrAmount);
        }
        if !(block.amount % U256::from(COST_PER_FUSION_UNIT)).is_zero() {
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
        let beneficiary: Address = unpack_method(FUSE_SIGNATURE, &send_block.data)?;

        let entry = FusionEntry {
            owner: send_block.address,
            id: send_block.hash,
            amount: send_block.amount,
            beneficiary,
            expiration_height: context.frontier_momentum().height + self.protocol.fuse_expiration,
        };
        let fused = context.fused_amount(&beneficiary).saturating_add(send_block.amount);
        context.set_fused_amount(&beneficiary, fused);

        debug!(
            "[nc-03] Fused {} for {} (expires at {})",
            entry.amount, beneficiary, entry.expiration_height
        );
        context.save_fusion_entry(entry);
        Ok(Vec::new())
    }
}

// =============================================================================
// CANCEL FUSE
// =============================================================================

/// Unlock an expired fusion and refund the QSR.
pub struct CancelFuseMethod {
    protocol: Arc<ProtocolConfig>,
}

impl CancelFuseMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for CancelFuseMethod {
    fn signature(&self) -> &'static str {
        CANCEL_FUSE_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_w_withdraw
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        unpack_method::<Hash>(CANCEL_FUSE_SIGNATURE, &block.data)?;
        if !block.amount.is_zero() {
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
        let id: Hash = unpack_method(CANCEL_FUSE_SIGNATURE, &send_block.data)?;

        let entry = context
            .fusion_entry(&send_block.address, &id)
            .ok_or(EmbeddedError::DataNonExistent)?;
        if entry.expiration_height > context.frontier_momentum().height {
            return Err(EmbeddedError::RevokeNotDue);
        }

        let remaining = context
            .fused_amount(&entry.beneficiary)
            .saturating_sub(entry.amount);
        context.set_fused_amount(&entry.beneficiary, remaining);
        context.delete_fusion_entry(&send_block.address, &id);

        debug!(
            "[nc-03] Cancelled fusion {:?}, beneficiary {} keeps {}",
            id, entry.beneficiary, remaining
        );

        Ok(vec![AccountBlock {
            block_type: BlockType::ContractSend,
            address: PLASMA_CONTRACT,
            to_address: send_block.address,
            amount: entry.amount,
            token_standard: self.protocol.qsr_token,
            ..Default::default()
        }])
    }
}

// =============================================================================
// SET PLASMA VARIABLES
// =============================================================================

/// Governance update of the dynamic plasma variables.
pub struct SetPlasmaVariablesMethod {
    protocol: Arc<ProtocolConfig>,
}

impl SetPlasmaVariablesMethod {
    /// Create the method for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self { protocol }
    }
}

impl EmbeddedMethod for SetPlasmaVariablesMethod {
    fn signature(&self) -> &'static str {
        SET_VARIABLES_SIGNATURE
    }

    fn required_plasma(&self, table: &PlasmaTable) -> u64 {
        table.embedded_simple
    }

    fn validate_send_block(&self, block: &AccountBlock) -> Result<()> {
        if block.address != self.protocol.governance_address {
            return Err(EmbeddedError::PermissionDenied);
        }
        let variables: PlasmaVariables = unpack_method(SET_VARIABLES_SIGNATURE, &block.data)?;
        if !block.amount.is_zero() {
            return Err(EmbeddedError::InvalidTokenOrAmount);
        }
        validate_plasma_variables(&variables)?;
        Ok(())
    }

    fn receive_block(
        &self,
        context: &mut dyn EmbeddedContext,
        send_block: &AccountBlock,
    ) -> Result<Vec<AccountBlock>> {
        self.validate_send_block(send_block)?;
        let variables: PlasmaVariables = unpack_method(SET_VARIABLES_SIGNATURE, &send_block.data)?;
        context.set_plasma_variables(variables);
        debug!("[nc-03] Plasma variables updated: {:?}", variables);
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::pack_method;
    use crate::methods::test_support::{context_at, protocol, send};
    use shared_types::constants::DECIMALS;
    use shared_types::Momentum;

    fn owner() -> Address {
        Address::from_public_key(b"owner")
    }

    fn fuse_block(amount: u64, beneficiary: Address) -> AccountBlock {
        let mut block = send(
            owner(),
            PLASMA_CONTRACT,
            pack_method(FUSE_SIGNATURE, &beneficiary).unwrap(),
            amount,
        );
        block.token_standard = ProtocolConfig::mainnet().qsr_token;
        block.ensure_cache();
        block
    }

    #[test]
    fn test_fuse_validation() {
        let method = FuseMethod::new(protocol());
        assert!(method.validate_send_block(&fuse_block(10 * DECIMALS, owner())).is_ok());
        assert_eq!(
            method.validate_send_block(&fuse_block(9 * DECIMALS, owner())),
            Err(EmbeddedError::InvalidTokenOrAmount)
        );
        assert_eq!(
            method.validate_send_block(&fuse_block(10 * DECIMALS + 1, owner())),
            Err(EmbeddedError::InvalidTokenOrAmount)
        );

        let mut wrong_token = fuse_block(10 * DECIMALS, owner());
        wrong_token.token_standard = ProtocolConfig::mainnet().znn_token;
        assert_eq!(
            method.validate_send_block(&wrong_token),
            Err(EmbeddedError::InvalidTokenOrAmount)
        );

        let mut garbage = fuse_block(10 * DECIMALS, owner());
        garbage.data = vec![1, 2, 3, 4, 5];
        assert_eq!(method.validate_send_block(&garbage), Err(EmbeddedError::UnpackError));
    }

    #[test]
    fn test_fuse_then_cancel() {
        let fuse = FuseMethod::new(protocol());
        let cancel = CancelFuseMethod::new(protocol());
        let beneficiary = Address::from_public_key(b"beneficiary");
        let mut context = context_at(100);

        let fuse_send = fuse_block(20 * DECIMALS, beneficiary);
        assert!(fuse.receive_block(&mut context, &fuse_send).unwrap().is_empty());
        assert_eq!(context.fused_amount(&beneficiary), U256::from(20 * DECIMALS));

        let entry = context.fusion_entry(&owner(), &fuse_send.hash).unwrap();
        assert_eq!(entry.expiration_height, 100 + 3_600);

        let cancel_send = send(
            owner(),
            PLASMA_CONTRACT,
            pack_method(CANCEL_FUSE_SIGNATURE, &fuse_send.hash).unwrap(),
            0,
        );
        assert_eq!(
            cancel.receive_block(&mut context, &cancel_send),
            Err(EmbeddedError::RevokeNotDue)
        );

        context.set_frontier(Momentum {
            height: 100 + 3_600,
            ..Default::default()
        });
        let refund = cancel.receive_block(&mut context, &cancel_send).unwrap();
        assert_eq!(refund.len(), 1);
        assert_eq!(refund[0].block_type, BlockType::ContractSend);
        assert_eq!(refund[0].to_address, owner());
        assert_eq!(refund[0].amount, U256::from(20 * DECIMALS));
        assert!(context.fused_amount(&beneficiary).is_zero());

        assert_eq!(
            cancel.receive_block(&mut context, &cancel_send),
            Err(EmbeddedError::DataNonExistent)
        );
    }

    #[test]
    fn test_set_variables_permission_and_bounds() {
        let method = SetPlasmaVariablesMethod::new(protocol());
        let governance = ProtocolConfig::mainnet().governance_address;
        let update = PlasmaVariables {
            max_base_plasma_in_momentum: 2_100_000,
            ..Default::default()
        };
        let data = pack_method(SET_VARIABLES_SIGNATURE, &update).unwrap();

        let intruder = send(owner(), PLASMA_CONTRACT, data.clone(), 0);
        assert_eq!(
            method.validate_send_block(&intruder),
            Err(EmbeddedError::PermissionDenied)
        );

        let paid = send(governance, PLASMA_CONTRACT, data.clone(), 1);
        assert_eq!(
            method.validate_send_block(&paid),
            Err(EmbeddedError::InvalidTokenOrAmount)
        );

        let mut context = context_at(10);
        let ok = send(governance, PLASMA_CONTRACT, data, 0);
        method.receive_block(&mut context, &ok).unwrap();
        assert_eq!(context.plasma_variables(), update);

        let forbidden = PlasmaVariables {
            max_price_change_percent: 0,
            ..Default::default()
        };
        let rejected = send(
            governance,
            PLASMA_CONTRACT,
            pack_method(SET_VARIABLES_SIGNATURE, &forbidden).unwrap(),
            0,
        );
        assert!(matches!(
            method.receive_block(&mut context, &rejected),
            Err(EmbeddedError::ForbiddenParam(_))
        ));
        assert_eq!(context.plasma_variables(), update);
    }
}
