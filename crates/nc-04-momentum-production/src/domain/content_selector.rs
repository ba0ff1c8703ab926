//! Momentum content selection.
//!
//! Candidates are ordered by priority and then admitted in a single pass:
//! contract blocks up to the contract cap, user blocks until the plasma
//! budget is reached or a block no longer pays the current price.

use std::collections::{BTreeMap, BTreeSet};

use nc_01_dynamic_plasma::{DynamicPlasma, PriceComparison};
use shared_types::{AccountBlock, Address, BlockType};
use tracing::{debug, instrument};

use super::stable_sort::stable_sort_by;

/// Chooses the account blocks of one momentum.
pub struct ContentSelector<'a> {
    plasma: &'a DynamicPlasma,
    priority_addresses: &'a BTreeSet<Address>,
}

impl<'a> ContentSelector<'a> {
    /// Selector for the round priced by `plasma`.
    pub fn new(plasma: &'a DynamicPlasma, priority_addresses: &'a BTreeSet<Address>) -> Self {
        Self {
            plasma,
            priority_addresses,
        }
    }

    /// Order the candidates and admit as many as the round allows.
    #[instrument(skip(self, candidates), fields(candidate_count = candidates.len()))]
    pub fn content(&self, candidates: Vec<AccountBlock>) -> Vec<AccountBlock> {
        let selected = self.filter_blocks_to_commit(self.sort_by_priority(candidates));
        debug!("[nc-04] Selected {} account blocks", selected.len());
        selected
    }

    /// Stable sort, highest priority first.
    ///
    /// The priority relation is not transitive across accounts, so the
    /// sort alone can leave a block ahead of a lower block of the same
    /// account. Each account's blocks are then put back into height order
    /// within the positions that account holds.
    pub fn sort_by_priority(&self, mut blocks: Vec<AccountBlock>) -> Vec<AccountBlock> {
        stable_sort_by(&mut blocks, |a, b| self.higher_priority(a, b));
        restore_account_height_order(&mut blocks);
        blocks
    }

    /// Admit blocks from a priority-ordered list.
    ///
    /// Contract blocks are buffered until the receive block that produced
    /// them, then admitted or dropped as one batch. A contract send is
    /// never admitted without its receive, which always has a greater
    /// height. The first user block that exceeds the budget or underpays
    /// ends the scan.
    pub fn filter_blocks_to_commit(&self, blocks: Vec<AccountBlock>) -> Vec<AccountBlock> {
        let contract_cap = self.plasma.max_contract_blocks_in_momentum();
        let budget = self.plasma.max_base_plasma_in_momentum();

        let mut to_commit = Vec::with_capacity(blocks.len());
        let mut contract_batch = Vec::new();
        let mut contract_count = 0usize;
        let mut used = 0u64;

        for block in blocks {
            if block.address.is_embedded() {
                let is_send = block.block_type == BlockType::ContractSend;
                contract_batch.push(block);
                if is_send {
                    continue;
                }
                if contract_batch.len() + contract_count > contract_cap {
                    debug!(
                        "[nc-04] Dropping batch of {} contract blocks, cap {} reached",
                        contract_batch.len(),
                        contract_cap
                    );
                    contract_batch.clear();
                    continue;
                }
                contract_count += contract_batch.len();
                to_commit.append(&mut contract_batch);
            } else {
                used = used.saturating_add(block.base_plasma);
                if used > budget || !self.plasma.valid_price(&block) {
                    break;
                }
                to_commit.push(block);
            }
        }

        to_commit
    }

    /// Does `a` have a higher priority than `b`?
    ///
    /// Contract blocks first, then blocks of priority addresses. Blocks of
    /// one account go by height, others by price paid per unit of base
    /// plasma with the larger hash winning a tie.
    pub fn higher_priority(&self, a: &AccountBlock, b: &AccountBlock) -> bool {
        if b.address.is_embedded() {
            return false;
        }
        if a.address.is_embedded() {
            return true;
        }
        if self.priority_addresses.contains(&b.address) {
            return false;
        }
        if self.priority_addresses.contains(&a.address) {
            return true;
        }
        if a.address == b.address {
            return a.height < b.height;
        }
        match self.plasma.higher_price(a, b) {
            PriceComparison::Higher => true,
            PriceComparison::Same => a.hash.as_bytes() > b.hash.as_bytes(),
            PriceComparison::Worse => false,
        }
    }
}

fn restore_account_height_order(blocks: &mut [AccountBlock]) {
    let mut positions: BTreeMap<Address, Vec<usize>> = BTreeMap::new();
    for (index, block) in blocks.iter().enumerate() {
        positions.entry(block.address).or_default().push(index);
    }

    for slots in positions.values().filter(|slots| slots.len() > 1) {
        let mut account_blocks: Vec<AccountBlock> = slots
            .iter()
            .map(|&index| std::mem::take(&mut blocks[index]))
            .collect();
        account_blocks.sort_by_key(|b| b.height);
        for (&index, block) in slots.iter().zip(account_blocks) {
            blocks[index] = block;
        }
    }
}
