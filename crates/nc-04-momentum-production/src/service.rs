//! Concrete Momentum Producer Service Implementation
//!
//! This module provides the concrete implementation of the
//! MomentumProducerService trait for use in a pillar node.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use nc_01_dynamic_plasma::DynamicPlasma;
use shared_types::constants::{DYNAMIC_PLASMA_MOMENTUM_VERSION, LEGACY_MOMENTUM_VERSION};
use shared_types::{
    AccountBlock, BasePlasma, DetailedMomentum, Momentum, MomentumContent, ProducerEvent,
    SignedMomentum, Spork,
};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::MomentumProductionConfig,
    domain::{
        check_account_height_ordering, check_contract_block_cap, check_plasma_budget,
        ContentSelector,
    },
    error::{MomentumProductionError, Result},
    metrics::Metrics,
    ports::{
        MomentumFinalizer, MomentumProducerService, MomentumStore, SignerKey,
        UncommittedBlockPool,
    },
};

/// Content and pricing chosen for one round
struct RoundContent {
    blocks: Vec<AccountBlock>,
    version: u64,
    next_fusion_price: u64,
    next_work_price: u64,
    plasma_used: BasePlasma,
}

/// Concrete implementation of MomentumProducerService
///
/// One instance serves one chain. Rounds never overlap: the build lock is
/// held from reading the frontier until the finalizer returns.
pub struct ConcreteMomentumProducer {
    config: MomentumProductionConfig,
    store: Arc<dyn MomentumStore>,
    pool: Arc<dyn UncommittedBlockPool>,
    finalizer: Arc<dyn MomentumFinalizer>,
    signer: SignerKey,
    build_lock: Mutex<()>,
    metrics: Arc<Metrics>,
}

impl ConcreteMomentumProducer {
    /// Create a producer signing with `signer`
    pub fn new(
        config: MomentumProductionConfig,
        store: Arc<dyn MomentumStore>,
        pool: Arc<dyn UncommittedBlockPool>,
        finalizer: Arc<dyn MomentumFinalizer>,
        signer: SignerKey,
    ) -> Result<Self> {
        config.validate(&signer.address)?;
        info!(
            "[nc-04] Momentum producer ready for {} on chain {} ({} priority addresses)",
            signer.address,
            config.chain_identifier,
            config.priority_addresses.len()
        );
        Ok(Self {
            config,
            store,
            pool,
            finalizer,
            signer,
            build_lock: Mutex::new(()),
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Production metrics
    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    async fn build_round(&self, event: &ProducerEvent) -> Result<SignedMomentum> {
        let previous = self.store.get_frontier_momentum().await?;
        let height = previous
            .height
            .checked_add(1)
            .ok_or(MomentumProductionError::HeightOverflow {
                height: previous.height,
            })?;
        let content = if self.store.is_spork_active(Spork::DynamicPlasma).await? {
            self.select_dynamic_content(&previous).await?
        } else {
            self.select_legacy_content().await?
        };

        let mut momentum = Momentum {
            chain_identifier: self.config.chain_identifier,
            version: content.version,
            hash: Default::default(),
            previous_hash: previous.hash,
            height,
            timestamp: event.start_time,
            content: MomentumContent::new(&content.blocks),
            next_fusion_price: content.next_fusion_price,
            next_work_price: content.next_work_price,
        };
        momentum.ensure_cache();

        let block_count = content.blocks.len();
        let contract_count = content
            .blocks
            .iter()
            .filter(|b| b.address.is_embedded())
            .count();
        let detailed = DetailedMomentum {
            momentum,
            account_blocks: content.blocks,
        };

        let signed = self.finalizer.finalize(detailed, &self.signer).await?;

        self.metrics
            .record_momentum_produced(block_count, contract_count, content.plasma_used);
        if content.version == LEGACY_MOMENTUM_VERSION {
            self.metrics.record_legacy_momentum();
        }
        Ok(signed)
    }

    async fn select_dynamic_content(&self, previous: &Momentum) -> Result<RoundContent> {
        let variables = self.store.get_plasma_variables().await?;
        let plasma = DynamicPlasma::new(previous, variables);
        let candidates = self.pool.get_all_uncommitted_account_blocks().await?;

        let started = Instant::now();
        let blocks = ContentSelector::new(&plasma, &self.config.priority_addresses)
            .content(candidates);
        self.metrics
            .record_selection_time(started.elapsed().as_micros() as u64);

        if cfg!(debug_assertions) {
            check_plasma_budget(&blocks, plasma.max_base_plasma_in_momentum())?;
            check_contract_block_cap(&blocks, plasma.max_contract_blocks_in_momentum())?;
            check_account_height_ordering(&blocks)?;
        }

        let used = plasma.compute_total_base_plasma(&blocks);
        let next_fusion_price = plasma.next_fusion_price(used.fusion);
        let next_work_price = plasma.next_work_price(used.pow);
        debug!(
            "[nc-04] Plasma used fusion={} pow={}, next prices fusion={} work={}",
            used.fusion, used.pow, next_fusion_price, next_work_price
        );

        Ok(RoundContent {
            blocks,
            version: DYNAMIC_PLASMA_MOMENTUM_VERSION,
            next_fusion_price,
            next_work_price,
            plasma_used: used,
        })
    }

    async fn select_legacy_content(&self) -> Result<RoundContent> {
        let blocks = self.pool.get_legacy_momentum_content().await?;
        Ok(RoundContent {
            blocks,
            version: LEGACY_MOMENTUM_VERSION,
            next_fusion_price: 0,
            next_work_price: 0,
            plasma_used: BasePlasma::default(),
        })
    }
}

#[async_trait]
impl MomentumProducerService for ConcreteMomentumProducer {
    #[instrument(skip(self, event), fields(producer = %event.producer, start_time = event.start_time))]
    async fn generate_momentum(&self, event: &ProducerEvent) -> Result<SignedMomentum> {
        if event.producer != self.signer.address {
            warn!(
                "[nc-04] Event for {} handled by producer {}",
                event.producer, self.signer.address
            );
        }

        let _guard = self.build_lock.lock().await;

        match self.build_round(event).await {
            Ok(signed) => {
                let momentum = &signed.detailed.momentum;
                info!(
                    "[nc-04] Produced momentum {} (v{}) with {} account blocks, hash {:?}",
                    momentum.height,
                    momentum.version,
                    momentum.content.len(),
                    momentum.hash
                );
                Ok(signed)
            }
            Err(err) => {
                self.metrics.record_failed_round();
                warn!(
                    "[nc-04] Momentum round for slot {} failed: {}",
                    event.start_time, err
                );
                Err(err)
            }
        }
    }
}
