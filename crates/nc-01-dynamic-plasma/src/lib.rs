//! # Nom-Chain - Dynamic Plasma (Subsystem 01)
//!
//! **Bounded Context:** Resource Pricing
//!
//! ## Purpose
//!
//! Two independent markets price plasma: one for fusion (staked QSR) and
//! one for proof-of-work. Each price moves toward a governance-set target
//! utilization, like a damped feedback controller, and the two prices
//! together decide how a block's declared usage is split between the
//! markets and whether the block pays enough to enter a momentum.
//!
//! ## Critical Invariants
//!
//! 1. **Price Floor**: prices never fall below `MIN_RESOURCE_PRICE`
//! 2. **Bounded Step**: one round moves a price by at most
//!    `max_price_change_percent`
//! 3. **Exact Split**: `fusion + pow == base_plasma` for every block
//! 4. **Saturation**: no numeric edge case fails; conversions clamp
//!
//! The only signalled error is [`DynamicPlasmaError::ForbiddenParam`], for
//! governance updates and plasma requests outside protocol bounds.
//!
//! ## Module Structure
//!
//! - [`domain::price`]: the `next_price` controller
//! - [`domain::conversion`]: difficulty, fusion and plasma conversions
//! - [`domain::dynamic_plasma`]: the per-round pricing context
//! - [`domain::governance`]: validation of `PlasmaVariables` updates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod domain;
pub mod error;

pub use domain::conversion::{
    difficulty_to_plasma, fused_amount_to_plasma, required_difficulty_for_plasma,
};
pub use domain::dynamic_plasma::{DynamicPlasma, PriceComparison};
pub use domain::governance::{validate_plasma_variables, GovernanceLimits};
pub use domain::price::next_price;
pub use error::{DynamicPlasmaError, Result};
