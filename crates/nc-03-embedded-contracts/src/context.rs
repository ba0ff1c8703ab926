//! State visible to an embedded method while it receives a send block.
//!
//! The context is a write buffer over contract storage: a failed receive
//! is discarded by the caller, so methods may write before they return an
//! error.

use std::collections::BTreeMap;

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use shared_types::{
    Address, Hash, Momentum, PlasmaVariables, ProtocolConfig, Spork, SporkSet, TokenStandard,
};

/// A single fusion of QSR for plasma.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionEntry {
    /// Account that locked the QSR.
    pub owner: Address,
    /// Hash of the fuse send block.
    pub id: Hash,
    /// Locked amount.
    pub amount: U256,
    /// Account that receives the plasma.
    pub beneficiary: Address,
    /// Momentum height from which the fusion may be cancelled.
    pub expiration_height: u64,
}

/// A spork as recorded by the spork contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SporkInfo {
    /// Hash of the create send block.
    pub id: Hash,
    /// Canonical spork name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Set once by the activate method.
    pub activated: bool,
    /// First momentum height at which the spork is enforced.
    pub enforcement_height: u64,
}

/// Storage and chain view for embedded methods.
pub trait EmbeddedContext {
    /// Protocol parameters of this network.
    fn protocol(&self) -> &ProtocolConfig;

    /// Latest committed momentum.
    fn frontier_momentum(&self) -> &Momentum;

    /// Stored plasma variables.
    fn plasma_variables(&self) -> PlasmaVariables;

    /// Replace the stored plasma variables.
    fn set_plasma_variables(&mut self, variables: PlasmaVariables);

    /// Fusion entry by owner and id.
    fn fusion_entry(&self, owner: &Address, id: &Hash) -> Option<FusionEntry>;

    /// Insert or replace a fusion entry.
    fn save_fusion_entry(&mut self, entry: FusionEntry);

    /// Remove a fusion entry.
    fn delete_fusion_entry(&mut self, owner: &Address, id: &Hash);

    /// Total amount fused for a beneficiary.
    fn fused_amount(&self, beneficiary: &Address) -> U256;

    /// Set the fused total for a beneficiary. Zero removes it.
    fn set_fused_amount(&mut self, beneficiary: &Address, amount: U256);

    /// Spork by id.
    fn spork(&self, id: &Hash) -> Option<SporkInfo>;

    /// Insert or replace a spork.
    fn save_spork(&mut self, spork: SporkInfo);

    /// All recorded sporks.
    fn sporks(&self) -> Vec<SporkInfo>;

    /// Credit a contract balance.
    fn add_balance(&mut self, address: &Address, token: &TokenStandard, amount: U256);

    /// Balance of an account in one token.
    fn balance(&self, address: &Address, token: &TokenStandard) -> U256;

    /// Sporks enforced at the frontier momentum.
    fn active_sporks(&self) -> SporkSet {
        let height = self.frontier_momentum().height;
        self.sporks()
            .into_iter()
            .filter(|info| info.activated && info.enforcement_height <= height)
            .filter_map(|info| Spork::from_name(&info.name))
            .collect()
    }
}

/// In-memory [`EmbeddedContext`], used by tests and local devnets.
#[derive(Clone, Debug)]
pub struct MemoryContext {
    protocol: ProtocolConfig,
    frontier: Momentum,
    plasma_variables: PlasmaVariables,
    fusions: BTreeMap<(Address, Hash), FusionEntry>,
    fused: BTreeMap<Address, U256>,
    sporks: BTreeMap<Hash, SporkInfo>,
    balances: BTreeMap<(Address, TokenStandard), U256>,
}

impl MemoryContext {
    /// Empty storage at the given frontier.
    pub fn new(protocol: ProtocolConfig, frontier: Momentum) -> Self {
        Self {
            protocol,
            frontier,
            plasma_variables: PlasmaVariables::default(),
            fusions: BTreeMap::new(),
            fused: BTreeMap::new(),
            sporks: BTreeMap::new(),
            balances: BTreeMap::new(),
        }
    }

    /// Advance the frontier momentum.
    pub fn set_frontier(&mut self, frontier: Momentum) {
        self.frontier = frontier;
    }
}

impl EmbeddedContext for MemoryContext {
    fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    fn frontier_momentum(&self) -> &Momentum {
        &self.frontier
    }

    fn plasma_variables(&self) -> PlasmaVariables {
        self.plasma_variables
    }

    fn set_plasma_variables(&mut self, variables: PlasmaVariables) {
        self.plasma_variables = variables;
    }

    fn fusion_entry(&self, owner: &Address, id: &Hash) -> Option<FusionEntry> {
        self.fusions.get(&(*owner, *id)).cloned()
    }

    fn save_fusion_entry(&mut self, entry: FusionEntry) {
        self.fusions.insert((entry.owner, entry.id), entry);
    }

    fn delete_fusion_entry(&mut self, owner: &Address, id: &Hash) {
        self.fusions.remove(&(*owner, *id));
    }

    fn fused_amount(&self, beneficiary: &Address) -> U256 {
        self.fused.get(beneficiary).copied().unwrap_or_default()
    }

    fn set_fused_amount(&mut self, beneficiary: &Address, amount: U256) {
        if amount.is_zero() {
            self.fused.remove(beneficiary);
        } else {
            self.fused.insert(*beneficiary, amount);
        }
    }

    fn spork(&self, id: &Hash) -> Option<SporkInfo> {
        self.sporks.get(id).cloned()
    }

    fn save_spork(&mut self, spork: SporkInfo) {
        self.sporks.insert(spork.id, spork);
    }

    fn sporks(&self) -> Vec<SporkInfo> {
        self.sporks.values().cloned().collect()
    }

    fn add_balance(&mut self, address: &Address, token: &TokenStandard, amount: U256) {
        let entry = self.balances.entry((*address, *token)).or_default();
        *entry = entry.saturating_add(amount);
    }

    fn balance(&self, address: &Address, token: &TokenStandard) -> U256 {
        self.balances
            .get(&(*address, *token))
            .copied()
            .unwrap_or_default()
    }
}
