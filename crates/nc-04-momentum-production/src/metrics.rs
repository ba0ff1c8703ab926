//! Metrics collection for momentum production

use std::sync::atomic::{AtomicU64, Ordering};

use shared_types::BasePlasma;

/// Metrics collector for momentum production
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total momentums produced
    pub momentums_produced: AtomicU64,

    /// Momentums produced with legacy content selection
    pub legacy_momentums: AtomicU64,

    /// Total account blocks included
    pub account_blocks_included: AtomicU64,

    /// Total contract blocks included
    pub contract_blocks_included: AtomicU64,

    /// Total fusion base plasma committed
    pub fused_plasma_used: AtomicU64,

    /// Total PoW base plasma committed
    pub pow_plasma_used: AtomicU64,

    /// Total content selection time (microseconds)
    pub selection_time_us: AtomicU64,

    /// Rounds that ended in an error
    pub failed_rounds: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a produced momentum
    pub fn record_momentum_produced(
        &self,
        block_count: usize,
        contract_count: usize,
        plasma: BasePlasma,
    ) {
        self.momentums_produced.fetch_add(1, Ordering::Relaxed);
        self.account_blocks_included
            .fetch_add(block_count as u64, Ordering::Relaxed);
        self.contract_blocks_included
            .fetch_add(contract_count as u64, Ordering::Relaxed);
        self.fused_plasma_used
            .fetch_add(plasma.fusion, Ordering::Relaxed);
        self.pow_plasma_used.fetch_add(plasma.pow, Ordering::Relaxed);
    }

    /// Record a momentum built with legacy content
    pub fn record_legacy_momentum(&self) {
        self.legacy_momentums.fetch_add(1, Ordering::Relaxed);
    }

    /// Record content selection time
    pub fn record_selection_time(&self, duration_us: u64) {
        self.selection_time_us
            .fetch_add(duration_us, Ordering::Relaxed);
    }

    /// Record a failed round
    pub fn record_failed_round(&self) {
        self.failed_rounds.fetch_add(1, Ordering::Relaxed);
    }

    /// Get momentums produced
    pub fn get_momentums_produced(&self) -> u64 {
        self.momentums_produced.load(Ordering::Relaxed)
    }

    /// Get failed rounds
    pub fn get_failed_rounds(&self) -> u64 {
        self.failed_rounds.load(Ordering::Relaxed)
    }

    /// Get average account blocks per momentum
    pub fn get_avg_blocks_per_momentum(&self) -> f64 {
        let momentums = self.momentums_produced.load(Ordering::Relaxed);
        if momentums == 0 {
            return 0.0;
        }
        let blocks = self.account_blocks_included.load(Ordering::Relaxed);
        blocks as f64 / momentums as f64
    }

    /// Get total base plasma committed
    pub fn get_total_plasma_used(&self) -> BasePlasma {
        BasePlasma::new(
            self.fused_plasma_used.load(Ordering::Relaxed),
            self.pow_plasma_used.load(Ordering::Relaxed),
        )
    }

    /// Get average selection time (microseconds)
    pub fn get_avg_selection_time(&self) -> f64 {
        let momentums = self.momentums_produced.load(Ordering::Relaxed);
        if momentums == 0 {
            return 0.0;
        }
        let time = self.selection_time_us.load(Ordering::Relaxed);
        time as f64 / momentums as f64
    }
}
