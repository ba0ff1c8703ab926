//! Conversions between plasma, PoW difficulty and fused QSR.

use primitive_types::U256;
use shared_types::constants::{
    COST_PER_FUSION_UNIT, MAX_DIFFICULTY_FOR_ACCOUNT_BLOCK, MAX_FUSED_AMOUNT_FOR_ACCOUNT,
    MAX_FUSION_PLASMA_FOR_ACCOUNT, MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK, PLASMA_PER_FUSION_UNIT,
    POW_DIFFICULTY_PER_PLASMA,
};

use crate::error::{DynamicPlasmaError, Result};

/// Plasma bought by a PoW difficulty. Saturates above the per-block maximum.
pub fn difficulty_to_plasma(difficulty: u64) -> u64 {
    if difficulty == 0 {
        return 0;
    }
    if difficulty > MAX_DIFFICULTY_FOR_ACCOUNT_BLOCK {
        return MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK;
    }
    difficulty / POW_DIFFICULTY_PER_PLASMA
}

/// Difficulty a block must carry to buy `plasma` with PoW.
pub fn required_difficulty_for_plasma(plasma: u64) -> Result<u64> {
    if plasma > MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK {
        return Err(DynamicPlasmaError::ForbiddenParam(format!(
            "plasma {plasma} exceeds PoW maximum {MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK}"
        )));
    }
    Ok(plasma * POW_DIFFICULTY_PER_PLASMA)
}

/// Plasma granted by a fused QSR amount.
///
/// Only whole fusion units count.
pub fn fused_amount_to_plasma(amount: U256) -> u64 {
    if amount.is_zero() {
        return 0;
    }
    if amount >= U256::from(MAX_FUSED_AMOUNT_FOR_ACCOUNT) {
        return MAX_FUSION_PLASMA_FOR_ACCOUNT;
    }
    let units = (amount / U256::from(COST_PER_FUSION_UNIT)).low_u64();
    units * PLASMA_PER_FUSION_UNIT
}
