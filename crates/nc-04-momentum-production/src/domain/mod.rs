//! Domain layer for momentum production
//!
//! Pure selection logic with no I/O.

pub mod content_selector;
pub mod invariants;
pub mod stable_sort;

pub use content_selector::ContentSelector;
pub use invariants::{
    check_account_height_ordering, check_contract_block_cap, check_plasma_budget,
};
pub use stable_sort::stable_sort_by;
