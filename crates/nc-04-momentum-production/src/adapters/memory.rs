//! In-memory adapters for the outbound ports.
//!
//! Used by tests and single-node devnets. Each adapter can be switched
//! into a failing state to exercise error paths.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use sha3::{Digest, Sha3_256};
use shared_types::{
    AccountBlock, DetailedMomentum, Hash, Momentum, PlasmaVariables, SignedMomentum, Spork,
    SporkSet,
};
use tracing::debug;

use crate::error::{MomentumProductionError, Result};
use crate::ports::{MomentumFinalizer, MomentumStore, SignerKey, UncommittedBlockPool};

// =============================================================================
// MOMENTUM STORE
// =============================================================================

#[derive(Debug)]
struct StoreState {
    frontier: Momentum,
    sporks: SporkSet,
    plasma_variables: PlasmaVariables,
}

/// Chain state held in memory.
#[derive(Debug)]
pub struct InMemoryMomentumStore {
    state: RwLock<StoreState>,
    unavailable: AtomicBool,
}

impl InMemoryMomentumStore {
    /// Store whose frontier is `genesis`, no spork enforced.
    pub fn new(genesis: Momentum) -> Self {
        Self {
            state: RwLock::new(StoreState {
                frontier: genesis,
                sporks: SporkSet::new(),
                plasma_variables: PlasmaVariables::default(),
            }),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Replace the frontier momentum.
    pub fn set_frontier(&self, momentum: Momentum) {
        self.state.write().frontier = momentum;
    }

    /// Current frontier, bypassing failure injection.
    pub fn frontier(&self) -> Momentum {
        self.state.read().frontier.clone()
    }

    /// Enforce a spork from now on.
    pub fn activate_spork(&self, spork: Spork) {
        self.state.write().sporks.activate(spork);
    }

    /// Replace the enforced spork set.
    pub fn set_sporks(&self, sporks: SporkSet) {
        self.state.write().sporks = sporks;
    }

    /// Replace the stored plasma variables.
    pub fn set_plasma_variables(&self, variables: PlasmaVariables) {
        self.state.write().plasma_variables = variables;
    }

    /// Make every read fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MomentumProductionError::Store(
                "store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MomentumStore for InMemoryMomentumStore {
    async fn get_frontier_momentum(&self) -> Result<Momentum> {
        self.check_available()?;
        Ok(self.state.read().frontier.clone())
    }

    async fn is_spork_active(&self, spork: Spork) -> Result<bool> {
        self.check_available()?;
        Ok(self.state.read().sporks.is_active(spork))
    }

    async fn get_plasma_variables(&self) -> Result<PlasmaVariables> {
        self.check_available()?;
        Ok(self.state.read().plasma_variables)
    }
}

// =============================================================================
// BLOCK POOL
// =============================================================================

/// Uncommitted account blocks held in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryBlockPool {
    blocks: RwLock<Vec<AccountBlock>>,
    unavailable: AtomicBool,
}

impl InMemoryBlockPool {
    /// Empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block.
    pub fn insert(&self, block: AccountBlock) {
        self.blocks.write().push(block);
    }

    /// Add several blocks.
    pub fn extend(&self, blocks: impl IntoIterator<Item = AccountBlock>) {
        self.blocks.write().extend(blocks);
    }

    /// Drop every block included in `momentum`.
    pub fn remove_committed(&self, momentum: &Momentum) {
        let committed: HashSet<Hash> = momentum.content.0.iter().map(|h| h.hash).collect();
        self.blocks.write().retain(|b| !committed.contains(&b.hash));
    }

    /// Number of pooled blocks.
    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    /// True when nothing is pooled.
    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }

    /// Make every read fail until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Result<Vec<AccountBlock>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(MomentumProductionError::Pool("pool unavailable".to_string()));
        }
        Ok(self.blocks.read().clone())
    }
}

#[async_trait]
impl UncommittedBlockPool for InMemoryBlockPool {
    async fn get_all_uncommitted_account_blocks(&self) -> Result<Vec<AccountBlock>> {
        self.snapshot()
    }

    async fn get_legacy_momentum_content(&self) -> Result<Vec<AccountBlock>> {
        self.snapshot()
    }
}

// =============================================================================
// FINALIZER
// =============================================================================

/// Signs with a digest of the secret and the momentum hash.
///
/// Not a real signature scheme. When built with
/// [`committing_to`](Self::committing_to) every finalized momentum becomes
/// the store's frontier and its blocks leave the pool.
#[derive(Debug, Default)]
pub struct InMemoryFinalizer {
    finalized: RwLock<Vec<SignedMomentum>>,
    chain: Option<(Arc<InMemoryMomentumStore>, Arc<InMemoryBlockPool>)>,
    failing: AtomicBool,
}

impl InMemoryFinalizer {
    /// Finalizer that only records what it signs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finalizer that also commits each momentum into `store` and `pool`.
    pub fn committing_to(store: Arc<InMemoryMomentumStore>, pool: Arc<InMemoryBlockPool>) -> Self {
        Self {
            chain: Some((store, pool)),
            ..Self::default()
        }
    }

    /// Every momentum signed so far.
    pub fn finalized(&self) -> Vec<SignedMomentum> {
        self.finalized.read().clone()
    }

    /// Make every call fail until reset.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Signature the finalizer produces for `hash`.
    pub fn signature_for(signer: &SignerKey, hash: &Hash) -> Vec<u8> {
        let mut hasher = Sha3_256::new();
        hasher.update(signer.secret());
        hasher.update(hash.as_bytes());
        hasher.finalize().to_vec()
    }
}

#[async_trait]
impl MomentumFinalizer for InMemoryFinalizer {
    async fn finalize(
        &self,
        momentum: DetailedMomentum,
        signer: &SignerKey,
    ) -> Result<SignedMomentum> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MomentumProductionError::Finalizer(
                "signer unavailable".to_string(),
            ));
        }

        let signed = SignedMomentum {
            signature: Self::signature_for(signer, &momentum.momentum.hash),
            producer: signer.address,
            public_key: signer.public_key.clone(),
            detailed: momentum,
        };

        if let Some((store, pool)) = &self.chain {
            store.set_frontier(signed.detailed.momentum.clone());
            pool.remove_committed(&signed.detailed.momentum);
            debug!(
                "[nc-04] Committed momentum {} to in-memory chain",
                signed.detailed.momentum.height
            );
        }

        self.finalized.write().push(signed.clone());
        Ok(signed)
    }
}
