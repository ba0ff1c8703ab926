//! # Spork-Gated Momentum Production
//!
//! The spork contract (nc-03) records and activates the dynamic plasma
//! spork; once enforced, the momentum producer (nc-04) switches from
//! legacy content to priced content and version 2 momentums.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nc_03_embedded_contracts::abi::pack_method;
    use nc_03_embedded_contracts::methods::spork::{
        ACTIVATE_SPORK_SIGNATURE, CREATE_SPORK_SIGNATURE, SPORK_MIN_HEIGHT_DELAY,
    };
    use nc_03_embedded_contracts::{ContractRegistry, EmbeddedContext, MemoryContext};
    use nc_04_momentum_production::{MomentumProducerService, SignerKey};
    use shared_types::constants::{DYNAMIC_PLASMA_MOMENTUM_VERSION, LEGACY_MOMENTUM_VERSION};
    use shared_types::{
        AccountBlock, BlockType, ProducerEvent, ProtocolConfig, Spork, SPORK_CONTRACT,
    };

    use crate::integration::{fused_user_block, init_test_tracing, TestChain};

    fn spork_call(protocol: &ProtocolConfig, data: Vec<u8>, height: u64) -> AccountBlock {
        let mut block = AccountBlock {
            block_type: BlockType::UserSend,
            address: protocol.spork_address,
            to_address: SPORK_CONTRACT,
            height,
            data,
            ..Default::default()
        };
        block.ensure_cache();
        block
    }

    fn apply(registry: &ContractRegistry, context: &mut MemoryContext, block: &AccountBlock) {
        let method = registry
            .get_embedded_method(&block.to_address, &block.data, &context.active_sporks())
            .unwrap();
        method.validate_send_block(block).unwrap();
        method.receive_block(context, block).unwrap();
    }

    #[tokio::test]
    async fn test_spork_activation_switches_momentum_format() {
        init_test_tracing();
        let protocol = ProtocolConfig::mainnet();
        let registry = ContractRegistry::new(Arc::new(protocol.clone()));
        let chain = TestChain::new();
        let signer = SignerKey::from_secret(b"pillar-alpha".to_vec());
        let producer = chain.producer(&signer);
        let mut context = MemoryContext::new(protocol.clone(), chain.store.frontier());

        // create and activate at the genesis frontier
        let params = (
            Spork::DynamicPlasma.name().to_string(),
            "dual resource plasma market".to_string(),
        );
        let create = spork_call(
            &protocol,
            pack_method(CREATE_SPORK_SIGNATURE, &params).unwrap(),
            1,
        );
        apply(&registry, &mut context, &create);
        let activate = spork_call(
            &protocol,
            pack_method(ACTIVATE_SPORK_SIGNATURE, &create.hash).unwrap(),
            2,
        );
        apply(&registry, &mut context, &activate);
        let enforcement_height = 1 + SPORK_MIN_HEIGHT_DELAY;

        let mut versions = Vec::new();
        for round in 0..8u64 {
            chain.pool.insert(fused_user_block("user", round + 1, 21_000));

            context.set_frontier(chain.store.frontier());
            chain.store.set_sporks(context.active_sporks());

            let event = ProducerEvent {
                name: "alpha".to_string(),
                producer: signer.address,
                start_time: 1_000_010 + round * 10,
                end_time: 1_000_020 + round * 10,
            };
            let signed = producer.generate_momentum(&event).await.unwrap();
            let momentum = &signed.detailed.momentum;
            versions.push((momentum.height, momentum.version));

            if momentum.version == DYNAMIC_PLASMA_MOMENTUM_VERSION {
                assert!(momentum.next_fusion_price > 0);
                assert!(momentum.next_work_price > 0);
            } else {
                assert_eq!(momentum.next_fusion_price, 0);
            }
        }

        for (height, version) in versions {
            let expected = if height > enforcement_height {
                DYNAMIC_PLASMA_MOMENTUM_VERSION
            } else {
                LEGACY_MOMENTUM_VERSION
            };
            assert_eq!(version, expected, "momentum at height {}", height);
        }
        assert_eq!(chain.store.frontier().height, 9);
        assert!(chain.pool.is_empty());
    }

    #[tokio::test]
    async fn test_momentums_form_a_hash_chain() {
        init_test_tracing();
        let chain = TestChain::new();
        chain.store.activate_spork(Spork::DynamicPlasma);
        let signer = SignerKey::from_secret(b"pillar-alpha".to_vec());
        let producer = chain.producer(&signer);

        let mut previous = chain.store.frontier();
        for round in 0..5u64 {
            let event = ProducerEvent {
                name: "alpha".to_string(),
                producer: signer.address,
                start_time: 1_000_010 + round * 10,
                end_time: 1_000_020 + round * 10,
            };
            let signed = producer.generate_momentum(&event).await.unwrap();
            let momentum = signed.detailed.momentum;

            assert_eq!(momentum.previous_hash, previous.hash);
            assert_eq!(momentum.height, previous.height + 1);
            assert_eq!(momentum.hash, momentum.compute_hash());
            previous = momentum;
        }
        assert_eq!(chain.finalizer.finalized().len(), 5);
        assert_eq!(producer.metrics().get_momentums_produced(), 5);
    }
}
