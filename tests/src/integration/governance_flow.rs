//! # Governance Update of Plasma Variables
//!
//! A governance send block to the plasma contract (nc-03) replaces the
//! stored plasma variables. The momentum producer (nc-04) reads them fresh
//! every round, so the new budget and targets apply from the next round.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use nc_03_embedded_contracts::abi::pack_method;
    use nc_03_embedded_contracts::methods::plasma::SET_VARIABLES_SIGNATURE;
    use nc_03_embedded_contracts::{
        ContractRegistry, EmbeddedContext, EmbeddedError, MemoryContext,
    };
    use nc_04_momentum_production::{MomentumProducerService, SignerKey};
    use shared_types::constants::MIN_RESOURCE_PRICE;
    use shared_types::{
        AccountBlock, Address, BlockType, PlasmaVariables, ProducerEvent, ProtocolConfig, Spork,
        SporkSet, PLASMA_CONTRACT,
    };

    use crate::integration::{fused_user_block, init_test_tracing, TestChain};

    fn set_variables_block(from: Address, variables: &PlasmaVariables) -> AccountBlock {
        let mut block = AccountBlock {
            block_type: BlockType::UserSend,
            address: from,
            to_address: PLASMA_CONTRACT,
            height: 1,
            data: pack_method(SET_VARIABLES_SIGNATURE, variables).unwrap(),
            ..Default::default()
        };
        block.ensure_cache();
        block
    }

    fn slot(signer: &SignerKey, start_time: u64) -> ProducerEvent {
        ProducerEvent {
            name: "alpha".to_string(),
            producer: signer.address,
            start_time,
            end_time: start_time + 10,
        }
    }

    #[tokio::test]
    async fn test_set_variables_takes_effect_next_round() {
        init_test_tracing();
        let protocol = ProtocolConfig::mainnet();
        let registry = ContractRegistry::new(Arc::new(protocol.clone()));
        let sporks = SporkSet::new().with(Spork::DynamicPlasma);

        let chain = TestChain::new();
        chain.store.set_sporks(sporks.clone());
        let signer = SignerKey::from_secret(b"pillar-alpha".to_vec());
        let producer = chain.producer(&signer);
        let mut context = MemoryContext::new(protocol.clone(), chain.store.frontier());

        // round 1: default variables leave room for everything
        chain
            .pool
            .extend((0..6).map(|i| fused_user_block(&format!("early-{}", i), 1, 21_000)));
        let first = producer.generate_momentum(&slot(&signer, 1_000_010)).await.unwrap();
        assert_eq!(first.detailed.account_blocks.len(), 6);
        assert_eq!(first.detailed.momentum.next_fusion_price, MIN_RESOURCE_PRICE);

        // governance shrinks the budget and the targets
        let update = PlasmaVariables {
            max_base_plasma_in_momentum: 210_000,
            fused_plasma_target: 21_000,
            pow_plasma_target: 21_000,
            max_price_change_percent: 10,
            price_change_denominator: 20,
        };
        let block = set_variables_block(protocol.governance_address, &update);
        let method = registry
            .get_embedded_method(&PLASMA_CONTRACT, &block.data, &sporks)
            .unwrap();
        method.receive_block(&mut context, &block).unwrap();
        chain.store.set_plasma_variables(context.plasma_variables());

        // round 2: ten blocks fill the new budget, the price rises one full step
        chain
            .pool
            .extend((0..12).map(|i| fused_user_block(&format!("late-{}", i), 1, 21_000)));
        let second = producer.generate_momentum(&slot(&signer, 1_000_020)).await.unwrap();
        assert_eq!(second.detailed.account_blocks.len(), 10);
        assert_eq!(chain.pool.len(), 2);
        assert_eq!(
            second.detailed.momentum.next_fusion_price,
            MIN_RESOURCE_PRICE * 110 / 100
        );
        assert_eq!(second.detailed.momentum.next_work_price, MIN_RESOURCE_PRICE);
    }

    #[tokio::test]
    async fn test_rejected_update_keeps_variables() {
        init_test_tracing();
        let protocol = ProtocolConfig::mainnet();
        let registry = ContractRegistry::new(Arc::new(protocol.clone()));
        let sporks = SporkSet::new().with(Spork::DynamicPlasma);
        let chain = TestChain::new();
        let mut context = MemoryContext::new(protocol.clone(), chain.store.frontier());

        let update = PlasmaVariables {
            max_base_plasma_in_momentum: 210_000,
            ..Default::default()
        };
        let intruder = set_variables_block(Address::from_public_key(b"intruder"), &update);
        let method = registry
            .get_embedded_method(&PLASMA_CONTRACT, &intruder.data, &sporks)
            .unwrap();
        assert_eq!(
            method.receive_block(&mut context, &intruder),
            Err(EmbeddedError::PermissionDenied)
        );
        assert_eq!(context.plasma_variables(), PlasmaVariables::default());
    }

    #[test]
    fn test_set_variables_requires_spork() {
        let protocol = ProtocolConfig::mainnet();
        let registry = ContractRegistry::new(Arc::new(protocol.clone()));
        let block = set_variables_block(protocol.governance_address, &PlasmaVariables::default());

        let result = registry.get_embedded_method(&PLASMA_CONTRACT, &block.data, &SporkSet::new());
        assert!(matches!(result, Err(EmbeddedError::ContractMethodNotFound)));
    }
}
