//! # Network-Variant Protocol Configuration
//!
//! Parameters that a network variant may override at genesis. A
//! [`ProtocolConfig`] is built exactly once, before any core component
//! exists, and is then passed by reference.
//!
//! ## Genesis overrides
//!
//! A genesis whose extra data starts with `HYPERQUBE` is a private network
//! variant and must carry exactly:
//!
//! ```text
//! HYPERQUBE <tag> UNIFORM <block_time_seconds>
//! ```
//!
//! The first two genesis tokens become the ZNN and QSR tokens. Anything
//! malformed is a [`GenesisError`].

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::entities::{Address, TokenStandard};
use crate::errors::GenesisError;

/// Marker that enables network-variant overrides.
pub const HYPERQUBE_MARKER: &str = "HYPERQUBE";

/// Longest block time a network variant may configure.
pub const MAX_BLOCK_TIME_SECONDS: u64 = 3_600;

/// Producer election policy.
///
/// Fixed per network at genesis; there is no runtime extension point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionAlgorithm {
    /// Uniform random permutation over the full candidate set.
    #[default]
    Uniform,
}

impl ElectionAlgorithm {
    /// Parse the identifier used in genesis extra data.
    pub fn from_identifier(id: &str) -> Option<Self> {
        match id {
            "UNIFORM" => Some(ElectionAlgorithm::Uniform),
            _ => None,
        }
    }
}

/// Consensus timing and election parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Seconds between momentums.
    pub block_time: u64,
    /// Producers elected per tick.
    pub node_count: usize,
    /// Producers drawn from outside the top set.
    pub rand_count: usize,
    /// Token whose delegations weigh candidates.
    pub counting_token: TokenStandard,
    /// Election policy.
    pub algorithm: ElectionAlgorithm,
}

/// Immutable protocol parameters for one network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    pub consensus: ConsensusConfig,
    pub momentums_per_hour: u64,
    pub momentums_per_epoch: u64,
    /// Minimum momentums between two plasma variable updates.
    pub update_min_num_momentums: u64,
    /// Momentums a fusion stays locked.
    pub fuse_expiration: u64,
    pub znn_token: TokenStandard,
    pub qsr_token: TokenStandard,
    /// Only address allowed to update plasma variables.
    pub governance_address: Address,
    /// Only address allowed to create and activate sporks.
    pub spork_address: Address,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ProtocolConfig {
    /// Mainnet parameters.
    pub fn mainnet() -> Self {
        let znn_token = TokenStandard([0x5a, 0x4e, 0x4e, 0, 0, 0, 0, 0, 0, 1]);
        let qsr_token = TokenStandard([0x51, 0x53, 0x52, 0, 0, 0, 0, 0, 0, 2]);
        let block_time = 10;
        let mut config = Self {
            consensus: ConsensusConfig {
                block_time,
                node_count: 30,
                rand_count: 15,
                counting_token: znn_token,
                algorithm: ElectionAlgorithm::Uniform,
            },
            momentums_per_hour: 0,
            momentums_per_epoch: 0,
            update_min_num_momentums: 0,
            fuse_expiration: 0,
            znn_token,
            qsr_token,
            governance_address: Address::from_public_key(b"nom-chain/governance"),
            spork_address: Address::from_public_key(b"nom-chain/spork"),
        };
        config.apply_block_time(block_time);
        config
    }

    /// Build the configuration for a genesis, applying network overrides.
    pub fn from_genesis(genesis: &GenesisConfig) -> Result<Self, GenesisError> {
        let mut config = Self::mainnet();

        let args: Vec<&str> = genesis.extra_data.split(' ').collect();
        if args.first() != Some(&HYPERQUBE_MARKER) {
            return Ok(config);
        }
        if args.len() != 4 {
            return Err(GenesisError::WrongArgumentCount(args.len()));
        }
        if genesis.tokens.len() < 2 {
            return Err(GenesisError::MissingTokens(genesis.tokens.len()));
        }

        let algorithm = ElectionAlgorithm::from_identifier(args[2])
            .ok_or_else(|| GenesisError::UnknownAlgorithm(args[2].to_string()))?;
        let block_time: u64 = args[3]
            .parse()
            .map_err(|_| GenesisError::InvalidBlockTime(args[3].to_string()))?;
        if block_time == 0 || block_time > MAX_BLOCK_TIME_SECONDS {
            return Err(GenesisError::BlockTimeOutOfRange(block_time));
        }

        config.znn_token = genesis.tokens[0];
        config.qsr_token = genesis.tokens[1];
        config.consensus.counting_token = config.znn_token;
        config.consensus.algorithm = algorithm;
        config.apply_block_time(block_time);

        info!(
            "[shared-types] Network variant '{}' configured: block_time={}s, momentums_per_hour={}",
            args[1], block_time, config.momentums_per_hour
        );
        Ok(config)
    }

    fn apply_block_time(&mut self, block_time: u64) {
        self.consensus.block_time = block_time;
        self.momentums_per_hour = 3_600 / block_time;
        self.momentums_per_epoch = self.momentums_per_hour * 24;
        self.update_min_num_momentums = self.momentums_per_hour * 5 / 6;
        self.fuse_expiration = self.momentums_per_hour * 10;
    }
}

/// The parts of a genesis file that shape the protocol configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Chain identifier.
    pub chain_identifier: u64,
    /// Free-form extra data; may carry network overrides.
    pub extra_data: String,
    /// Tokens minted at genesis, ZNN first then QSR.
    pub tokens: Vec<TokenStandard>,
}
