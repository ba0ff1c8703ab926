//! Spork-gated dispatch table.
//!
//! The table for a spork set is the immutable base registry with every
//! overlay whose spork is active applied on top, in a fixed order.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared_types::{
    Address, ProtocolConfig, Spork, SporkSet, ACCELERATOR_CONTRACT, LIQUIDITY_CONTRACT,
    PLASMA_CONTRACT, SPORK_CONTRACT,
};
use tracing::trace;

use crate::abi::{selector, split_call, Selector};
use crate::error::{EmbeddedError, Result};
use crate::methods::{
    ActivateSporkMethod, CancelFuseMethod, CreateSporkMethod, DonateMethod, EmbeddedMethod,
    FuseMethod, SetPlasmaVariablesMethod,
};

/// Methods of one contract, keyed by selector.
#[derive(Clone, Default)]
pub struct ContractDefinition {
    methods: BTreeMap<Selector, Arc<dyn EmbeddedMethod>>,
}

impl ContractDefinition {
    fn with(mut self, method: Arc<dyn EmbeddedMethod>) -> Self {
        self.insert(method);
        self
    }

    fn insert(&mut self, method: Arc<dyn EmbeddedMethod>) {
        self.methods.insert(selector(method.signature()), method);
    }

    /// Method by selector.
    pub fn method(&self, selector: &Selector) -> Option<Arc<dyn EmbeddedMethod>> {
        self.methods.get(selector).cloned()
    }

    /// Signatures of all enabled methods.
    pub fn signatures(&self) -> Vec<&'static str> {
        let mut signatures: Vec<_> = self.methods.values().map(|m| m.signature()).collect();
        signatures.sort_unstable();
        signatures
    }
}

/// A composed dispatch table.
#[derive(Clone, Default)]
pub struct ContractTable {
    contracts: BTreeMap<Address, ContractDefinition>,
}

impl ContractTable {
    /// Contract by address.
    pub fn contract(&self, address: &Address) -> Option<&ContractDefinition> {
        self.contracts.get(address)
    }

    /// Addresses of all contracts in the table.
    pub fn addresses(&self) -> Vec<Address> {
        self.contracts.keys().copied().collect()
    }

    /// Resolve a call. `data` starts with the method selector.
    pub fn lookup(&self, address: &Address, data: &[u8]) -> Result<Arc<dyn EmbeddedMethod>> {
        if !address.is_embedded() {
            return Err(EmbeddedError::NotContractAddress);
        }
        let contract = self
            .contracts
            .get(address)
            .ok_or(EmbeddedError::ContractDoesntExist)?;
        let (sel, _) = split_call(data).ok_or(EmbeddedError::ContractMethodNotFound)?;
        contract
            .method(&sel)
            .ok_or(EmbeddedError::ContractMethodNotFound)
    }
}

type OverlayFn = fn(&mut ContractTable, &Arc<ProtocolConfig>);

/// Base registry plus spork-gated overlays.
pub struct ContractRegistry {
    protocol: Arc<ProtocolConfig>,
    overlays: Vec<(Spork, OverlayFn)>,
}

impl ContractRegistry {
    /// Registry for a network.
    pub fn new(protocol: Arc<ProtocolConfig>) -> Self {
        Self {
            protocol,
            overlays: vec![
                (Spork::Accelerator, apply_accelerator_overlay as OverlayFn),
                (Spork::DynamicPlasma, apply_dynamic_plasma_overlay as OverlayFn),
            ],
        }
    }

    /// Contracts available before any spork.
    pub fn base(&self) -> ContractTable {
        let p = &self.protocol;
        let mut contracts = BTreeMap::new();
        contracts.insert(
            PLASMA_CONTRACT,
            ContractDefinition::default()
                .with(Arc::new(FuseMethod::new(p.clone())))
                .with(Arc::new(CancelFuseMethod::new(p.clone()))),
        );
        contracts.insert(
            SPORK_CONTRACT,
            ContractDefinition::default()
                .with(Arc::new(CreateSporkMethod::new(p.clone())))
                .with(Arc::new(ActivateSporkMethod::new(p.clone()))),
        );
        contracts.insert(
            LIQUIDITY_CONTRACT,
            ContractDefinition::default().with(Arc::new(DonateMethod::new(p.clone()))),
        );
        ContractTable { contracts }
    }

    /// Compose the table for the given active sporks.
    pub fn resolve(&self, sporks: &SporkSet) -> ContractTable {
        let mut table = self.base();
        for (spork, apply) in &self.overlays {
            if sporks.is_active(*spork) {
                apply(&mut table, &self.protocol);
            }
        }
        table
    }

    /// Resolve a call under the given active sporks.
    pub fn get_embedded_method(
        &self,
        address: &Address,
        data: &[u8],
        sporks: &SporkSet,
    ) -> Result<Arc<dyn EmbeddedMethod>> {
        if !address.is_embedded() {
            return Err(EmbeddedError::NotContractAddress);
        }
        let result = self.resolve(sporks).lookup(address, data);
        if let Err(err) = &result {
            trace!("[nc-03] No method for call to {}: {}", address, err);
        }
        result
    }
}

fn apply_accelerator_overlay(table: &mut ContractTable, protocol: &Arc<ProtocolConfig>) {
    table.contracts.insert(
        ACCELERATOR_CONTRACT,
        ContractDefinition::default().with(Arc::new(DonateMethod::new(protocol.clone()))),
    );
}

fn apply_dynamic_plasma_overlay(table: &mut ContractTable, protocol: &Arc<ProtocolConfig>) {
    table
        .contracts
        .entry(PLASMA_CONTRACT)
        .or_default()
        .insert(Arc::new(SetPlasmaVariablesMethod::new(protocol.clone())));
}
