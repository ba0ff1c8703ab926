//! Producer selection.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shared_types::{sort_by_weight, ElectionAlgorithm, PillarDelegation};
use tracing::{debug, instrument};

use crate::error::{ElectionError, Result};

/// Elects `node_count` producers per tick with the configured policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProducerElection {
    algorithm: ElectionAlgorithm,
    node_count: usize,
}

impl ProducerElection {
    /// Create an election for `node_count` slots.
    pub fn new(algorithm: ElectionAlgorithm, node_count: usize) -> Self {
        Self {
            algorithm,
            node_count,
        }
    }

    /// Slots filled per tick.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Select the ordered producers for one tick.
    ///
    /// `seed` is the anchor momentum height.
    #[instrument(skip(self, candidates), fields(candidates = candidates.len()))]
    pub fn select_producers(
        &self,
        candidates: &[PillarDelegation],
        seed: u64,
    ) -> Result<Vec<PillarDelegation>> {
        if candidates.is_empty() {
            return Err(ElectionError::EmptyCandidateSet);
        }

        let mut sorted = candidates.to_vec();
        sort_by_weight(&mut sorted);

        let elected = match self.algorithm {
            ElectionAlgorithm::Uniform => uniform_random(&sorted, seed, self.node_count),
        };
        debug!(
            "[nc-02] Elected {} producers from {} candidates (seed {})",
            elected.len(),
            sorted.len(),
            seed
        );
        Ok(elected)
    }
}

// Same permutation each pass since the generator is re-seeded.
fn uniform_random(sorted: &[PillarDelegation], seed: u64, total: usize) -> Vec<PillarDelegation> {
    let mut result = Vec::with_capacity(total + sorted.len());
    while result.len() < total {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..sorted.len()).collect();
        indices.shuffle(&mut rng);
        result.extend(indices.into_iter().map(|i| sorted[i].clone()));
    }
    result.truncate(total);
    result
}
