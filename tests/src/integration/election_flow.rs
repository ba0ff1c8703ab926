//! # Election Driving Momentum Production
//!
//! Producer election (nc-02) turns pillar delegations into a slot schedule;
//! each slot's producer builds the next momentum (nc-04) on a shared chain.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use nc_02_producer_election::{producer_events, ElectionAlgorithm, ProducerElection};
    use nc_04_momentum_production::{
        ConcreteMomentumProducer, MomentumProducerService, SignerKey,
    };
    use primitive_types::U256;
    use shared_types::{Address, PillarDelegation, ProtocolConfig};

    use crate::integration::{fused_user_block, init_test_tracing, TestChain};

    fn pillars() -> Vec<(PillarDelegation, SignerKey)> {
        [("alpha", 300u64), ("beta", 200), ("gamma", 100)]
            .into_iter()
            .map(|(name, weight)| {
                let signer = SignerKey::from_secret(name.as_bytes().to_vec());
                let delegation = PillarDelegation {
                    name: name.to_string(),
                    producer: signer.address,
                    weight: U256::from(weight),
                };
                (delegation, signer)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_elected_producers_drive_rounds() {
        init_test_tracing();
        let protocol = ProtocolConfig::mainnet();
        let chain = TestChain::new();
        let pillars = pillars();

        let producers: BTreeMap<Address, ConcreteMomentumProducer> = pillars
            .iter()
            .map(|(delegation, signer)| (delegation.producer, chain.producer(signer)))
            .collect();
        let candidates: Vec<PillarDelegation> = pillars.into_iter().map(|(d, _)| d).collect();

        let election = ProducerElection::new(ElectionAlgorithm::Uniform, 6);
        let anchor = chain.store.frontier();
        let elected = election
            .select_producers(&candidates, anchor.height)
            .unwrap();
        assert_eq!(elected.len(), 6);

        let block_time = protocol.consensus.block_time;
        let events = producer_events(&elected, anchor.timestamp + block_time, block_time);
        assert_eq!(events.len(), 6);

        for (slot, event) in events.iter().enumerate() {
            chain
                .pool
                .insert(fused_user_block(&format!("user-{}", slot), 1, 21_000));

            let producer = &producers[&event.producer];
            let signed = producer.generate_momentum(event).await.unwrap();
            let momentum = &signed.detailed.momentum;

            assert_eq!(signed.producer, event.producer);
            assert_eq!(momentum.height, anchor.height + 1 + slot as u64);
            assert_eq!(momentum.timestamp, event.start_time);
            assert_eq!(momentum.content.len(), 1);
        }

        // every round of a tick is accounted to the pillar that produced it
        let produced: u64 = producers
            .values()
            .map(|p| p.metrics().get_momentums_produced())
            .sum();
        assert_eq!(produced, 6);
        assert_eq!(chain.store.frontier().height, anchor.height + 6);
    }

    #[test]
    fn test_schedule_is_deterministic() {
        let candidates: Vec<_> = pillars().into_iter().map(|(d, _)| d).collect();
        let election = ProducerElection::new(ElectionAlgorithm::Uniform, 30);

        let first = producer_events(&election.select_producers(&candidates, 4_321).unwrap(), 0, 10);
        let second = producer_events(&election.select_producers(&candidates, 4_321).unwrap(), 0, 10);
        assert_eq!(first, second);

        // every pillar appears once per pass over the candidates
        for pass in first.chunks(candidates.len()) {
            let mut names: Vec<_> = pass.iter().map(|e| e.name.as_str()).collect();
            names.sort_unstable();
            assert_eq!(names, vec!["alpha", "beta", "gamma"]);
        }
    }
}
