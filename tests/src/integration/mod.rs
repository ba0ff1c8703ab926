//! Cross-subsystem integration flows and their shared fixtures.

pub mod election_flow;
pub mod governance_flow;
pub mod production_flow;

use std::sync::Arc;

use nc_04_momentum_production::adapters::{
    InMemoryBlockPool, InMemoryFinalizer, InMemoryMomentumStore,
};
use nc_04_momentum_production::{ConcreteMomentumProducer, MomentumProductionConfig, SignerKey};
use shared_types::constants::LEGACY_MOMENTUM_VERSION;
use shared_types::{AccountBlock, Address, BlockType, Momentum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chain identifier used by every flow.
pub const TEST_CHAIN_ID: u64 = 321;

/// Install a test-friendly subscriber once; `RUST_LOG` overrides the level.
pub fn init_test_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

/// In-memory chain shared by every producer in a flow.
pub struct TestChain {
    /// Committed state.
    pub store: Arc<InMemoryMomentumStore>,
    /// Uncommitted account blocks.
    pub pool: Arc<InMemoryBlockPool>,
    /// Signs and commits.
    pub finalizer: Arc<InMemoryFinalizer>,
}

impl TestChain {
    /// Fresh chain at a legacy genesis momentum of height 1.
    pub fn new() -> Self {
        let mut genesis = Momentum {
            chain_identifier: TEST_CHAIN_ID,
            version: LEGACY_MOMENTUM_VERSION,
            height: 1,
            timestamp: 1_000_000,
            ..Default::default()
        };
        genesis.ensure_cache();

        let store = Arc::new(InMemoryMomentumStore::new(genesis));
        let pool = Arc::new(InMemoryBlockPool::new());
        let finalizer = Arc::new(InMemoryFinalizer::committing_to(
            store.clone(),
            pool.clone(),
        ));
        Self {
            store,
            pool,
            finalizer,
        }
    }

    /// Producer for `signer` on this chain.
    pub fn producer(&self, signer: &SignerKey) -> ConcreteMomentumProducer {
        let config = MomentumProductionConfig {
            chain_identifier: TEST_CHAIN_ID,
            coinbase: signer.address,
            ..Default::default()
        };
        match ConcreteMomentumProducer::new(
            config,
            self.store.clone(),
            self.pool.clone(),
            self.finalizer.clone(),
            signer.clone(),
        ) {
            Ok(producer) => producer,
            Err(err) => panic!("producer config rejected: {}", err),
        }
    }
}

impl Default for TestChain {
    fn default() -> Self {
        Self::new()
    }
}

/// User send paying for its base plasma entirely by fusion.
pub fn fused_user_block(account: &str, height: u64, base_plasma: u64) -> AccountBlock {
    let mut block = AccountBlock {
        block_type: BlockType::UserSend,
        address: Address::from_public_key(account.as_bytes()),
        height,
        base_plasma,
        fused_plasma: base_plasma,
        ..Default::default()
    };
    block.ensure_cache();
    block
}
