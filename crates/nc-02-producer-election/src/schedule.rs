//! Producer slot schedule for one tick.

use shared_types::{PillarDelegation, ProducerEvent};

/// One slot of `block_time` seconds per elected producer, in election order.
pub fn producer_events(
    elected: &[PillarDelegation],
    tick_start: u64,
    block_time: u64,
) -> Vec<ProducerEvent> {
    elected
        .iter()
        .enumerate()
        .map(|(slot, pillar)| {
            let start_time = tick_start.saturating_add((slot as u64).saturating_mul(block_time));
            ProducerEvent {
                name: pillar.name.clone(),
                producer: pillar.producer,
                start_time,
                end_time: start_time.saturating_add(block_time),
            }
        })
        .collect()
}
