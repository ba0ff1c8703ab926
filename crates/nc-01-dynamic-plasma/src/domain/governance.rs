//! Validation of governance updates to [`PlasmaVariables`].
//!
//! An update outside these limits is rejected before it is applied; the
//! stored variables stay in effect.

use shared_types::constants::ACCOUNT_BLOCK_BASE_PLASMA;
use shared_types::PlasmaVariables;
use tracing::warn;

use crate::error::{DynamicPlasmaError, Result};

/// Protocol bounds for [`PlasmaVariables`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GovernanceLimits {
    /// Smallest allowed momentum budget.
    pub min_base_plasma_in_momentum: u64,
    /// Largest allowed momentum budget.
    pub max_base_plasma_in_momentum: u64,
    /// Smallest allowed target for each resource.
    pub min_plasma_target: u64,
    /// Allowed range for `max_price_change_percent`.
    pub price_change_percent: (u8, u8),
    /// Allowed range for `price_change_denominator`.
    pub price_change_denominator: (u8, u8),
}

impl GovernanceLimits {
    /// Protocol-wide limits.
    pub const PROTOCOL: GovernanceLimits = GovernanceLimits {
        min_base_plasma_in_momentum: 10 * ACCOUNT_BLOCK_BASE_PLASMA,
        max_base_plasma_in_momentum: 2_000 * ACCOUNT_BLOCK_BASE_PLASMA,
        min_plasma_target: ACCOUNT_BLOCK_BASE_PLASMA,
        price_change_percent: (1, 50),
        price_change_denominator: (1, 100),
    };
}

/// Validate a proposed update against [`GovernanceLimits::PROTOCOL`].
pub fn validate_plasma_variables(variables: &PlasmaVariables) -> Result<()> {
    let limits = GovernanceLimits::PROTOCOL;
    let check = |ok: bool, reason: String| {
        if ok {
            Ok(())
        } else {
            warn!("[nc-01] Rejected plasma variables update: {}", reason);
            Err(DynamicPlasmaError::ForbiddenParam(reason))
        }
    };

    let budget = variables.max_base_plasma_in_momentum;
    check(
        (limits.min_base_plasma_in_momentum..=limits.max_base_plasma_in_momentum).contains(&budget),
        format!("max base plasma {budget} out of bounds"),
    )?;
    check(
        variables.fused_plasma_target >= limits.min_plasma_target,
        format!("fused plasma target {} too low", variables.fused_plasma_target),
    )?;
    check(
        variables.pow_plasma_target >= limits.min_plasma_target,
        format!("pow plasma target {} too low", variables.pow_plasma_target),
    )?;
    check(
        variables
            .fused_plasma_target
            .saturating_add(variables.pow_plasma_target)
            <= budget,
        "plasma targets exceed momentum budget".to_string(),
    )?;

    let (min_pct, max_pct) = limits.price_change_percent;
    check(
        (min_pct..=max_pct).contains(&variables.max_price_change_percent),
        format!(
            "max price change percent {} out of bounds",
            variables.max_price_change_percent
        ),
    )?;
    let (min_denom, max_denom) = limits.price_change_denominator;
    check(
        (min_denom..=max_denom).contains(&variables.price_change_denominator),
        format!(
            "price change denominator {} out of bounds",
            variables.price_change_denominator
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(variables: PlasmaVariables) -> bool {
        matches!(
            validate_plasma_variables(&variables),
            Err(DynamicPlasmaError::ForbiddenParam(_))
        )
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_plasma_variables(&PlasmaVariables::default()).is_ok());
    }

    #[test]
    fn test_budget_bounds() {
        let base = PlasmaVariables {
            fused_plasma_target: 21_000,
            pow_plasma_target: 21_000,
            ..Default::default()
        };
        assert!(!rejected(PlasmaVariables {
            max_base_plasma_in_momentum: 210_000,
            ..base
        }));
        assert!(rejected(PlasmaVariables {
            max_base_plasma_in_momentum: 209_999,
            ..base
        }));
        assert!(!rejected(PlasmaVariables {
            max_base_plasma_in_momentum: 42_000_000,
            ..base
        }));
        assert!(rejected(PlasmaVariables {
            max_base_plasma_in_momentum: 42_000_001,
            ..base
        }));
    }

    #[test]
    fn test_target_bounds() {
        assert!(rejected(PlasmaVariables {
            fused_plasma_target: 20_999,
            ..Default::default()
        }));
        assert!(rejected(PlasmaVariables {
            pow_plasma_target: 0,
            ..Default::default()
        }));
        assert!(rejected(PlasmaVariables {
            fused_plasma_target: 2_100_000,
            pow_plasma_target: 2_100_001,
            ..Default::default()
        }));
        assert!(!rejected(PlasmaVariables {
            fused_plasma_target: 2_100_000,
            pow_plasma_target: 2_100_000,
            ..Default::default()
        }));
    }

    #[test]
    fn test_controller_bounds() {
        assert!(rejected(PlasmaVariables {
            max_price_change_percent: 0,
            ..Default::default()
        }));
        assert!(rejected(PlasmaVariables {
            max_price_change_percent: 51,
            ..Default::default()
        }));
        assert!(rejected(PlasmaVariables {
            price_change_denominator: 0,
            ..Default::default()
        }));
        assert!(rejected(PlasmaVariables {
            price_change_denominator: 101,
            ..Default::default()
        }));
        assert!(!rejected(PlasmaVariables {
            max_price_change_percent: 50,
            price_change_denominator: 100,
            ..Default::default()
        }));
    }
}
