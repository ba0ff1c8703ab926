//! Per-round pricing context.
//!
//! A [`DynamicPlasma`] is built from the previous momentum's recorded
//! prices and the current [`PlasmaVariables`], answers every pricing
//! question for one round, and is then discarded.

use primitive_types::{U256, U512};
use shared_types::constants::{
    ACCOUNT_BLOCK_BASE_PLASMA, DYNAMIC_PLASMA_MOMENTUM_VERSION, EMBEDDED_SIMPLE_PLASMA,
    MIN_RESOURCE_PRICE, PRICE_SCALE_FACTOR,
};
use shared_types::{AccountBlock, BasePlasma, Momentum, PlasmaVariables};
use tracing::debug;

use super::conversion::difficulty_to_plasma;
use super::price::next_price;

/// Outcome of comparing the price two blocks pay per unit of base plasma.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceComparison {
    /// The first block pays strictly more.
    Higher,
    /// Both pay exactly the same.
    Same,
    /// The first block pays strictly less.
    Worse,
}

/// Read-only pricing context for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DynamicPlasma {
    fusion_price: u64,
    work_price: u64,
    config: PlasmaVariables,
}

impl DynamicPlasma {
    /// Build the context for the round following `previous`.
    ///
    /// Momentums older than the dynamic plasma format carry no prices, so
    /// the protocol minimum applies.
    pub fn new(previous: &Momentum, config: PlasmaVariables) -> Self {
        let (fusion_price, work_price) = if previous.version >= DYNAMIC_PLASMA_MOMENTUM_VERSION {
            (previous.next_fusion_price, previous.next_work_price)
        } else {
            (MIN_RESOURCE_PRICE, MIN_RESOURCE_PRICE)
        };
        debug!(
            "[nc-01] Pricing context at height {}: fusion_price={}, work_price={}",
            previous.height, fusion_price, work_price
        );
        Self::with_prices(fusion_price, work_price, config)
    }

    /// Build a context from explicit prices. Both are floored at the minimum.
    pub fn with_prices(fusion_price: u64, work_price: u64, config: PlasmaVariables) -> Self {
        Self {
            fusion_price: fusion_price.max(MIN_RESOURCE_PRICE),
            work_price: work_price.max(MIN_RESOURCE_PRICE),
            config,
        }
    }

    /// Current fusion price.
    pub fn fusion_price(&self) -> u64 {
        self.fusion_price
    }

    /// Current work price.
    pub fn work_price(&self) -> u64 {
        self.work_price
    }

    /// Variables in effect for this round.
    pub fn config(&self) -> &PlasmaVariables {
        &self.config
    }

    /// Budget of non-contract base plasma per momentum.
    pub fn max_base_plasma_in_momentum(&self) -> u64 {
        self.config.max_base_plasma_in_momentum
    }

    /// Cap on contract blocks per momentum.
    pub fn max_contract_blocks_in_momentum(&self) -> usize {
        (self.config.max_base_plasma_in_momentum / EMBEDDED_SIMPLE_PLASMA) as usize
    }

    /// Fusion price for the next round given this round's fusion usage.
    pub fn next_fusion_price(&self, used: u64) -> u64 {
        next_price(
            self.fusion_price,
            used,
            self.config.fused_plasma_target,
            self.config.max_price_change_percent,
            self.config.price_change_denominator,
        )
    }

    /// Work price for the next round given this round's PoW usage.
    pub fn next_work_price(&self, used: u64) -> u64 {
        next_price(
            self.work_price,
            used,
            self.config.pow_plasma_target,
            self.config.max_price_change_percent,
            self.config.price_change_denominator,
        )
    }

    /// Split a block's base plasma between fusion and PoW.
    ///
    /// Both payments are weighted by both prices since they compete for
    /// the same budget. The PoW share is the remainder.
    pub fn compute_base_plasma(&self, block: &AccountBlock) -> BasePlasma {
        if block.address.is_embedded() {
            return BasePlasma::default();
        }
        if block.difficulty == 0 {
            return BasePlasma::new(block.base_plasma, 0);
        }
        if block.fused_plasma == 0 {
            return BasePlasma::new(0, block.base_plasma);
        }

        let prices = U512::from(self.fusion_price) * U512::from(self.work_price);
        let fused = U512::from(block.fused_plasma) * prices;
        let pow = U512::from(difficulty_to_plasma(block.difficulty)) * prices;
        let total = fused + pow;
        if total.is_zero() {
            return BasePlasma::new(block.base_plasma, 0);
        }

        let fusion = (fused * U512::from(block.base_plasma) / total).low_u64();
        BasePlasma::new(fusion, block.base_plasma - fusion)
    }

    /// Elementwise sum of [`compute_base_plasma`](Self::compute_base_plasma).
    pub fn compute_total_base_plasma(&self, blocks: &[AccountBlock]) -> BasePlasma {
        blocks.iter().fold(BasePlasma::default(), |mut total, block| {
            total.add(self.compute_base_plasma(block));
            total
        })
    }

    /// Compare the price `a` and `b` pay per unit of base plasma.
    pub fn higher_price(&self, a: &AccountBlock, b: &AccountBlock) -> PriceComparison {
        let lhs = self.weighted_payment(a) * U256::from(b.base_plasma);
        let rhs = self.weighted_payment(b) * U256::from(a.base_plasma);
        match lhs.cmp(&rhs) {
            std::cmp::Ordering::Greater => PriceComparison::Higher,
            std::cmp::Ordering::Equal => PriceComparison::Same,
            std::cmp::Ordering::Less => PriceComparison::Worse,
        }
    }

    /// True when the block pays at least the current fusion price.
    pub fn valid_price(&self, block: &AccountBlock) -> bool {
        if block.address.is_embedded() {
            return true;
        }
        let reference = AccountBlock {
            fused_plasma: ACCOUNT_BLOCK_BASE_PLASMA * self.fusion_price / PRICE_SCALE_FACTOR,
            difficulty: 0,
            base_plasma: ACCOUNT_BLOCK_BASE_PLASMA,
            ..Default::default()
        };
        self.higher_price(block, &reference) != PriceComparison::Worse
    }

    // fused * work_price + pow * fusion_price
    fn weighted_payment(&self, block: &AccountBlock) -> U256 {
        U256::from(block.fused_plasma) * U256::from(self.work_price)
            + U256::from(difficulty_to_plasma(block.difficulty)) * U256::from(self.fusion_price)
    }
}
