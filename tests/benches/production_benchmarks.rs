//! # Nom-Chain Momentum Production Benchmarks
//!
//! | Subsystem | Operation | Target |
//! |-----------|-----------|--------|
//! | nc-01 Dynamic Plasma | next price, base plasma split | < 1µs |
//! | nc-02 Producer Election | 30 slots from 100 pillars | < 100µs |
//! | nc-04 Momentum Production | content selection, 10k candidates | < 50ms |

use std::collections::BTreeSet;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nc_01_dynamic_plasma::{next_price, DynamicPlasma};
use nc_02_producer_election::{ElectionAlgorithm, ProducerElection};
use nc_04_momentum_production::ContentSelector;
use primitive_types::U256;
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared_types::{AccountBlock, Address, BlockType, Momentum, PillarDelegation, PlasmaVariables};

fn random_blocks(count: usize, accounts: usize, seed: u64) -> Vec<AccountBlock> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heights = vec![0u64; accounts];
    (0..count)
        .map(|_| {
            let account = rng.gen_range(0..accounts);
            heights[account] += 1;
            let mut block = AccountBlock {
                block_type: BlockType::UserSend,
                address: Address::from_public_key(&(account as u64).to_be_bytes()),
                height: heights[account],
                base_plasma: 21_000,
                fused_plasma: rng.gen_range(21_000..84_000),
                ..Default::default()
            };
            block.ensure_cache();
            block
        })
        .collect()
}

// ============================================================================
// NC-01: Dynamic Plasma
// ============================================================================

fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-01-dynamic-plasma");

    group.bench_function("next_price", |b| {
        b.iter(|| {
            next_price(
                black_box(1_000_000),
                black_box(3_150_000),
                black_box(1_050_000),
                10,
                20,
            )
        })
    });

    let previous = Momentum {
        version: 2,
        next_fusion_price: 1_250,
        next_work_price: 2_000,
        ..Default::default()
    };
    let plasma = DynamicPlasma::new(&previous, PlasmaVariables::default());
    let block = AccountBlock {
        address: Address::from_public_key(b"bench"),
        base_plasma: 42_000,
        fused_plasma: 21_000,
        difficulty: 31_500_000,
        ..Default::default()
    };
    group.bench_function("compute_base_plasma", |b| {
        b.iter(|| plasma.compute_base_plasma(black_box(&block)))
    });

    group.finish();
}

// ============================================================================
// NC-02: Producer Election
// ============================================================================

fn bench_election(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-02-producer-election");

    let candidates: Vec<_> = (0..100u64)
        .map(|i| PillarDelegation {
            name: format!("pillar-{:03}", i),
            producer: Address::from_public_key(&i.to_be_bytes()),
            weight: U256::from(1_000 + i * 7),
        })
        .collect();
    let election = ProducerElection::new(ElectionAlgorithm::Uniform, 30);

    group.bench_function("select_30_of_100", |b| {
        b.iter(|| election.select_producers(black_box(&candidates), black_box(123_456)))
    });

    group.finish();
}

// ============================================================================
// NC-04: Content Selection
// ============================================================================

fn bench_content_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("nc-04-content-selection");
    group.measurement_time(Duration::from_secs(10));

    let plasma = DynamicPlasma::new(&Momentum::default(), PlasmaVariables::default());
    let priority = BTreeSet::new();
    let selector = ContentSelector::new(&plasma, &priority);

    for size in [100usize, 1_000, 10_000] {
        let blocks = random_blocks(size, size / 4 + 1, size as u64);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("content", size), &blocks, |b, blocks| {
            b.iter(|| selector.content(black_box(blocks.clone())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pricing, bench_election, bench_content_selection);
criterion_main!(benches);
