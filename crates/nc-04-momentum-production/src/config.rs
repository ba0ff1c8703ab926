//! Configuration types for momentum production

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::BTreeSet;

use crate::error::{MomentumProductionError, Result};

/// Runtime configuration for momentum production
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumProductionConfig {
    /// Chain identifier stamped on every momentum
    pub chain_identifier: u64,

    /// Producer address of the local pillar
    pub coinbase: Address,

    /// Accounts whose blocks outrank every other user block
    pub priority_addresses: BTreeSet<Address>,
}

impl MomentumProductionConfig {
    /// Check the configuration is usable for a producer signing as `signer`
    pub fn validate(&self, signer: &Address) -> Result<()> {
        if self.coinbase != *signer {
            return Err(MomentumProductionError::InvalidConfig(format!(
                "coinbase {} does not match signer {}",
                self.coinbase, signer
            )));
        }
        if let Some(contract) = self.priority_addresses.iter().find(|a| a.is_embedded()) {
            return Err(MomentumProductionError::InvalidConfig(format!(
                "priority address {} is an embedded contract",
                contract
            )));
        }
        Ok(())
    }
}
