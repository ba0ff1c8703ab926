//! Invariant checkers for selected momentum content
//!
//! Every selection must satisfy these; a failure means the selector is
//! broken, not that the input was bad.

use std::collections::BTreeMap;

use shared_types::{AccountBlock, Address};

use crate::error::{MomentumProductionError, Result};

/// Base plasma of the selected user blocks MUST NOT exceed `limit`.
pub fn check_plasma_budget(blocks: &[AccountBlock], limit: u64) -> Result<()> {
    let used = blocks
        .iter()
        .filter(|b| !b.address.is_embedded())
        .fold(0u64, |acc, b| acc.saturating_add(b.base_plasma));
    if used > limit {
        return Err(MomentumProductionError::PlasmaBudgetExceeded { used, limit });
    }
    Ok(())
}

/// The number of contract blocks MUST NOT exceed `cap`.
pub fn check_contract_block_cap(blocks: &[AccountBlock], cap: usize) -> Result<()> {
    let count = blocks.iter().filter(|b| b.address.is_embedded()).count();
    if count > cap {
        return Err(MomentumProductionError::ContractCapExceeded { count, cap });
    }
    Ok(())
}

/// Blocks of one account MUST appear by strictly ascending height.
pub fn check_account_height_ordering(blocks: &[AccountBlock]) -> Result<()> {
    let mut last_height: BTreeMap<Address, u64> = BTreeMap::new();
    for block in blocks {
        if let Some(previous) = last_height.insert(block.address, block.height) {
            if block.height <= previous {
                return Err(MomentumProductionError::HeightOrderViolation {
                    address: block.address,
                    previous,
                    next: block.height,
                });
            }
        }
    }
    Ok(())
}
