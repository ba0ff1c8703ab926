//! # Protocol Constants
//!
//! Fixed protocol parameters shared by every network variant. Values that a
//! network variant may override at genesis live in
//! [`ProtocolConfig`](crate::ProtocolConfig) instead.

// =============================================================================
// AMOUNTS
// =============================================================================

/// Number of base units in one coin.
pub const DECIMALS: u64 = 100_000_000;

// =============================================================================
// PLASMA TABLE
// =============================================================================

/// Plasma declared by a plain user account block.
pub const ACCOUNT_BLOCK_BASE_PLASMA: u64 = 21_000;

/// Plasma for an embedded call that performs no withdrawal.
pub const EMBEDDED_SIMPLE_PLASMA: u64 = 5 * ACCOUNT_BLOCK_BASE_PLASMA / 2;

/// Plasma for an embedded call that refunds tokens to the caller.
pub const EMBEDDED_W_WITHDRAW_PLASMA: u64 = 7 * ACCOUNT_BLOCK_BASE_PLASMA / 2;

/// Plasma for an embedded call that performs two withdrawals.
pub const EMBEDDED_W_DOUBLE_WITHDRAW_PLASMA: u64 = 9 * ACCOUNT_BLOCK_BASE_PLASMA / 2;

// =============================================================================
// FUSION & POW
// =============================================================================

/// Proof-of-work difficulty that buys one unit of plasma.
pub const POW_DIFFICULTY_PER_PLASMA: u64 = 1_500;

/// Amount of QSR locked per fusion unit.
pub const COST_PER_FUSION_UNIT: u64 = DECIMALS;

/// Plasma granted per fusion unit.
pub const PLASMA_PER_FUSION_UNIT: u64 = 2_100;

/// Minimum amount accepted by a single fuse call.
pub const FUSE_MIN_AMOUNT: u64 = 10 * DECIMALS;

/// Theoretical cap on fusion units a single account can hold.
pub const MAX_FUSION_UNITS_PER_ACCOUNT: u64 = 100_000_000;

/// Theoretical cap on fusion plasma a single account can hold.
pub const MAX_FUSION_PLASMA_FOR_ACCOUNT: u64 = MAX_FUSION_UNITS_PER_ACCOUNT * COST_PER_FUSION_UNIT;

/// Fused amount at which fusion plasma saturates.
pub const MAX_FUSED_AMOUNT_FOR_ACCOUNT: u64 = COST_PER_FUSION_UNIT * MAX_FUSION_UNITS_PER_ACCOUNT;

/// Cap on plasma purchasable with proof-of-work for a single block.
pub const MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK: u64 = MAX_FUSION_PLASMA_FOR_ACCOUNT;

/// Difficulty at which PoW plasma saturates.
pub const MAX_DIFFICULTY_FOR_ACCOUNT_BLOCK: u64 =
    MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK * POW_DIFFICULTY_PER_PLASMA;

// =============================================================================
// DYNAMIC PLASMA
// =============================================================================

/// Lower bound for both resource prices.
pub const MIN_RESOURCE_PRICE: u64 = 1_000;

/// A price of `PRICE_SCALE_FACTOR` means plasma is sold at face value.
pub const PRICE_SCALE_FACTOR: u64 = 1_000;

/// Momentum format produced before dynamic plasma activation.
pub const LEGACY_MOMENTUM_VERSION: u64 = 1;

/// Momentum format that records the next round's resource prices.
pub const DYNAMIC_PLASMA_MOMENTUM_VERSION: u64 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plasma_table() {
        assert_eq!(EMBEDDED_SIMPLE_PLASMA, 52_500);
        assert_eq!(EMBEDDED_W_WITHDRAW_PLASMA, 73_500);
        assert_eq!(EMBEDDED_W_DOUBLE_WITHDRAW_PLASMA, 94_500);
    }

    #[test]
    fn test_max_difficulty_fits_u64() {
        let wide = MAX_POW_PLASMA_FOR_ACCOUNT_BLOCK as u128 * POW_DIFFICULTY_PER_PLASMA as u128;
        assert_eq!(wide, MAX_DIFFICULTY_FOR_ACCOUNT_BLOCK as u128);
    }
}
