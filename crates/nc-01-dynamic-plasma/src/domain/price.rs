//! Next-round price controller.
//!
//! ```text
//! delta = current * (used - target) / target / denominator
//! next  = clamp(max(current + delta, MIN), current*(100-pct)/100, current*(100+pct)/100)
//! ```
//!
//! Division rounds toward negative infinity, so a price falling by a
//! fractional amount falls by the next whole unit.

use shared_types::constants::MIN_RESOURCE_PRICE;

/// Compute the price for the next round.
///
/// Zero `target` or `denominator` are treated as one. A `current` price
/// below the protocol minimum is raised to it first.
pub fn next_price(
    current: u64,
    used: u64,
    target: u64,
    max_change_percent: u8,
    denominator: u8,
) -> u64 {
    let current = current.max(MIN_RESOURCE_PRICE);
    if used == target {
        return current;
    }

    let current_wide = current as u128;
    let divisor = target.max(1) as u128 * denominator.max(1) as u128;

    // floor(floor(x / t) / d) == floor(x / (t * d)) for positive t and d
    let next = if used > target {
        let delta = current_wide * (used - target) as u128 / divisor;
        current_wide.saturating_add(delta)
    } else {
        let numerator = current_wide * (target - used) as u128;
        let mut delta = numerator / divisor;
        if numerator % divisor != 0 {
            delta += 1;
        }
        current_wide.saturating_sub(delta)
    };

    let floored = next.max(MIN_RESOURCE_PRICE as u128);

    let pct = max_change_percent as u128;
    let lower = current_wide * 100u128.saturating_sub(pct) / 100;
    let upper = current_wide * (100 + pct) / 100;

    floored.clamp(lower, upper).min(u64::MAX as u128) as u64
}
