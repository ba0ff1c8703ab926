//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `TokenStandard`, `Hash`
//! - **Account chains**: `AccountBlock`, `BlockType`, `BasePlasma`
//! - **Momentums**: `Momentum`, `MomentumContent`, `DetailedMomentum`,
//!   `SignedMomentum`
//! - **Governance**: `PlasmaVariables`, `Spork`, `SporkSet`
//! - **Consensus**: `PillarDelegation`, `ProducerEvent`

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use sha3::{Digest, Sha3_256};

use crate::constants::DYNAMIC_PLASMA_MOMENTUM_VERSION;
use crate::errors::ParseError;

// Re-export primitives so subsystems agree on one set of numeric types.
pub use primitive_types::{H256, U256};

/// A 32-byte SHA3-256 hash.
pub type Hash = H256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// Size of an address in bytes (kind byte + 19 byte core).
pub const ADDRESS_SIZE: usize = 20;

/// Kind byte for addresses owned by a key pair.
pub const USER_ADDRESS_BYTE: u8 = 0;

/// Kind byte for protocol-native contracts.
pub const CONTRACT_ADDRESS_BYTE: u8 = 1;

/// Account address. Byte 0 is the address kind.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub struct Address(pub [u8; ADDRESS_SIZE]);

impl Address {
    /// Address of the embedded contract with the given id.
    pub const fn embedded(id: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = CONTRACT_ADDRESS_BYTE;
        bytes[ADDRESS_SIZE - 1] = id;
        Self(bytes)
    }

    /// User address derived from a public key.
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let digest = Sha3_256::digest(public_key);
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[0] = USER_ADDRESS_BYTE;
        bytes[1..].copy_from_slice(&digest[..ADDRESS_SIZE - 1]);
        Self(bytes)
    }

    /// True for protocol-native contract addresses.
    pub fn is_embedded(&self) -> bool {
        self.0[0] == CONTRACT_ADDRESS_BYTE
    }

    /// Raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; ADDRESS_SIZE] =
            bytes
                .try_into()
                .map_err(|v: Vec<u8>| ParseError::InvalidLength {
                    expected: ADDRESS_SIZE,
                    actual: v.len(),
                })?;
        Ok(Self(bytes))
    }
}

/// Embedded plasma (fusion) contract.
pub const PLASMA_CONTRACT: Address = Address::embedded(1);
/// Embedded pillar contract.
pub const PILLAR_CONTRACT: Address = Address::embedded(2);
/// Embedded token issuance contract.
pub const TOKEN_CONTRACT: Address = Address::embedded(3);
/// Embedded sentinel contract.
pub const SENTINEL_CONTRACT: Address = Address::embedded(4);
/// Embedded swap contract.
pub const SWAP_CONTRACT: Address = Address::embedded(5);
/// Embedded stake contract.
pub const STAKE_CONTRACT: Address = Address::embedded(6);
/// Embedded spork contract.
pub const SPORK_CONTRACT: Address = Address::embedded(7);
/// Embedded accelerator contract.
pub const ACCELERATOR_CONTRACT: Address = Address::embedded(8);
/// Embedded liquidity contract.
pub const LIQUIDITY_CONTRACT: Address = Address::embedded(9);
/// Embedded HTLC contract.
pub const HTLC_CONTRACT: Address = Address::embedded(10);
/// Embedded bridge contract.
pub const BRIDGE_CONTRACT: Address = Address::embedded(11);

/// Size of a token standard in bytes.
pub const TOKEN_STANDARD_SIZE: usize = 10;

/// Token identifier.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, SerializeDisplay, DeserializeFromStr,
)]
pub struct TokenStandard(pub [u8; TOKEN_STANDARD_SIZE]);

impl TokenStandard {
    /// Token standard used by blocks that transfer nothing.
    pub const ZERO: TokenStandard = TokenStandard([0u8; TOKEN_STANDARD_SIZE]);
}

impl fmt::Display for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zts{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TokenStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for TokenStandard {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix("zts").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let bytes: [u8; TOKEN_STANDARD_SIZE] =
            bytes
                .try_into()
                .map_err(|v: Vec<u8>| ParseError::InvalidLength {
                    expected: TOKEN_STANDARD_SIZE,
                    actual: v.len(),
                })?;
        Ok(Self(bytes))
    }
}

// =============================================================================
// CLUSTER B: ACCOUNT CHAINS
// =============================================================================

/// Kind of an account block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum BlockType {
    /// Send issued by a user account.
    #[default]
    UserSend = 2,
    /// Receive on a user account.
    UserReceive = 3,
    /// Send generated by an embedded contract.
    ContractSend = 4,
    /// Receive executed by an embedded contract.
    ContractReceive = 5,
}

impl BlockType {
    /// True for send-type blocks.
    pub fn is_send_block(self) -> bool {
        matches!(self, BlockType::UserSend | BlockType::ContractSend)
    }

    /// True for receive-type blocks.
    pub fn is_receive_block(self) -> bool {
        matches!(self, BlockType::UserReceive | BlockType::ContractReceive)
    }
}

/// One transaction in a per-account hash chain.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountBlock {
    /// Block kind.
    pub block_type: BlockType,
    /// Hash of this block (see [`AccountBlock::ensure_cache`]).
    pub hash: Hash,
    /// Hash of the previous block on the same account chain.
    pub previous_hash: Hash,
    /// Height on the account chain, starting at 1.
    pub height: u64,
    /// Account that owns this block.
    pub address: Address,
    /// Destination of a send block.
    pub to_address: Address,
    /// Transferred amount.
    pub amount: U256,
    /// Transferred token.
    pub token_standard: TokenStandard,
    /// For receive blocks, the hash of the send being received.
    pub from_block_hash: Hash,
    /// Call data for embedded contracts.
    pub data: Vec<u8>,
    /// Plasma paid by fusion.
    pub fused_plasma: u64,
    /// Proof-of-work difficulty attached to the block.
    pub difficulty: u64,
    /// Proof-of-work nonce.
    pub nonce: [u8; 8],
    /// Plasma the block declares it consumes.
    pub base_plasma: u64,
}

impl AccountBlock {
    /// Canonical SHA3-256 digest of the block fields.
    pub fn compute_hash(&self) -> Hash {
        let mut amount = [0u8; 32];
        self.amount.to_big_endian(&mut amount);

        let mut hasher = Sha3_256::new();
        hasher.update([self.block_type as u8]);
        hasher.update(self.previous_hash.as_bytes());
        hasher.update(self.height.to_be_bytes());
        hasher.update(self.address.as_bytes());
        hasher.update(self.to_address.as_bytes());
        hasher.update(amount);
        hasher.update(self.token_standard.0);
        hasher.update(self.from_block_hash.as_bytes());
        hasher.update(Sha3_256::digest(&self.data));
        hasher.update(self.fused_plasma.to_be_bytes());
        hasher.update(self.difficulty.to_be_bytes());
        hasher.update(self.nonce);
        hasher.update(self.base_plasma.to_be_bytes());
        H256::from_slice(&hasher.finalize())
    }

    /// Fill the cached hash.
    pub fn ensure_cache(&mut self) {
        self.hash = self.compute_hash();
    }

    /// Lightweight header used in momentum content.
    pub fn header(&self) -> AccountHeader {
        AccountHeader {
            address: self.address,
            height: self.height,
            hash: self.hash,
        }
    }
}

/// Base plasma of a block split by payment method.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BasePlasma {
    /// Units paid by fusion.
    pub fusion: u64,
    /// Units paid by proof-of-work.
    pub pow: u64,
}

impl BasePlasma {
    /// Create a new split.
    pub fn new(fusion: u64, pow: u64) -> Self {
        Self { fusion, pow }
    }

    /// Accumulate another split (saturating).
    pub fn add(&mut self, other: BasePlasma) {
        self.fusion = self.fusion.saturating_add(other.fusion);
        self.pow = self.pow.saturating_add(other.pow);
    }

    /// Fusion plus PoW units.
    pub fn total(&self) -> u64 {
        self.fusion.saturating_add(self.pow)
    }
}

// =============================================================================
// CLUSTER C: MOMENTUMS
// =============================================================================

/// Reference to an account block included in a momentum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHeader {
    /// Account owning the block.
    pub address: Address,
    /// Block height on that account.
    pub height: u64,
    /// Block hash.
    pub hash: Hash,
}

/// Ordered account headers committed by a momentum.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MomentumContent(pub Vec<AccountHeader>);

impl MomentumContent {
    /// Build content from admitted blocks, preserving order.
    pub fn new(blocks: &[AccountBlock]) -> Self {
        Self(blocks.iter().map(AccountBlock::header).collect())
    }

    /// Number of committed blocks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the momentum commits nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digest over the ordered headers.
    pub fn hash(&self) -> Hash {
        let mut hasher = Sha3_256::new();
        for header in &self.0 {
            hasher.update(header.address.as_bytes());
            hasher.update(header.height.to_be_bytes());
            hasher.update(header.hash.as_bytes());
        }
        H256::from_slice(&hasher.finalize())
    }
}

/// The finality unit of the chain.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Momentum {
    /// Chain identifier.
    pub chain_identifier: u64,
    /// Format version.
    pub version: u64,
    /// Hash of this momentum (see [`Momentum::ensure_cache`]).
    pub hash: Hash,
    /// Hash of the previous momentum.
    pub previous_hash: Hash,
    /// Momentum height.
    pub height: u64,
    /// Unix timestamp (seconds).
    pub timestamp: u64,
    /// Committed account blocks.
    pub content: MomentumContent,
    /// Fusion price for the next round (version 2+).
    pub next_fusion_price: u64,
    /// Work price for the next round (version 2+).
    pub next_work_price: u64,
}

impl Momentum {
    /// Canonical digest of the header fields.
    ///
    /// Prices are only committed by formats that carry them.
    pub fn compute_hash(&self) -> Hash {
        let mut hasher = Sha3_256::new();
        hasher.update(self.version.to_be_bytes());
        hasher.update(self.chain_identifier.to_be_bytes());
        hasher.update(self.previous_hash.as_bytes());
        hasher.update(self.height.to_be_bytes());
        hasher.update(self.timestamp.to_be_bytes());
        hasher.update(self.content.hash().as_bytes());
        if self.version >= DYNAMIC_PLASMA_MOMENTUM_VERSION {
            hasher.update(self.next_fusion_price.to_be_bytes());
            hasher.update(self.next_work_price.to_be_bytes());
        }
        H256::from_slice(&hasher.finalize())
    }

    /// Fill the cached hash.
    pub fn ensure_cache(&mut self) {
        self.hash = self.compute_hash();
    }
}

/// A momentum with the full account blocks it commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedMomentum {
    /// The momentum.
    pub momentum: Momentum,
    /// Account blocks in content order.
    pub account_blocks: Vec<AccountBlock>,
}

/// A momentum signed by its producer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMomentum {
    /// The finalized momentum with its blocks.
    pub detailed: DetailedMomentum,
    /// Producer address.
    pub producer: Address,
    /// Producer public key.
    pub public_key: Vec<u8>,
    /// Signature over the momentum hash.
    pub signature: Vec<u8>,
}

// =============================================================================
// CLUSTER D: GOVERNANCE
// =============================================================================

/// Governance-set parameters of the dynamic plasma market.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlasmaVariables {
    /// Budget of non-contract base plasma per momentum.
    pub max_base_plasma_in_momentum: u64,
    /// Target fusion base plasma per momentum.
    pub fused_plasma_target: u64,
    /// Target PoW base plasma per momentum.
    pub pow_plasma_target: u64,
    /// Max price change per momentum, in percent.
    pub max_price_change_percent: u8,
    /// Damping denominator of the price controller.
    pub price_change_denominator: u8,
}

impl Default for PlasmaVariables {
    fn default() -> Self {
        Self {
            max_base_plasma_in_momentum: 4_200_000,
            fused_plasma_target: 1_050_000,
            pow_plasma_target: 1_050_000,
            max_price_change_percent: 10,
            price_change_denominator: 20,
        }
    }
}

/// Governance-activated protocol upgrade switch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Spork {
    /// Accelerator contract.
    Accelerator,
    /// HTLC contract.
    Htlc,
    /// Bridge and liquidity contracts.
    BridgeAndLiquidity,
    /// Stops new pillar registrations.
    NoPillarReg,
    /// Dynamic plasma market.
    DynamicPlasma,
}

impl Spork {
    /// Canonical spork name as used by the spork contract.
    pub fn name(&self) -> &'static str {
        match self {
            Spork::Accelerator => "spork-accelerator",
            Spork::Htlc => "spork-htlc",
            Spork::BridgeAndLiquidity => "spork-bridge-and-liquidity",
            Spork::NoPillarReg => "spork-no-pillar-reg",
            Spork::DynamicPlasma => "spork-dynamic-plasma",
        }
    }

    /// Look a spork up by its canonical name.
    pub fn from_name(name: &str) -> Option<Spork> {
        [
            Spork::Accelerator,
            Spork::Htlc,
            Spork::BridgeAndLiquidity,
            Spork::NoPillarReg,
            Spork::DynamicPlasma,
        ]
        .into_iter()
        .find(|spork| spork.name() == name)
    }
}

/// Set of active sporks.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SporkSet(BTreeSet<Spork>);

impl SporkSet {
    /// No spork active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style activation.
    pub fn with(mut self, spork: Spork) -> Self {
        self.0.insert(spork);
        self
    }

    /// Activate a spork.
    pub fn activate(&mut self, spork: Spork) {
        self.0.insert(spork);
    }

    /// True when the spork is active.
    pub fn is_active(&self, spork: Spork) -> bool {
        self.0.contains(&spork)
    }
}

impl FromIterator<Spork> for SporkSet {
    fn from_iter<I: IntoIterator<Item = Spork>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// =============================================================================
// CLUSTER E: CONSENSUS
// =============================================================================

/// Election candidate: a pillar and its delegated weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarDelegation {
    /// Pillar name.
    pub name: String,
    /// Address allowed to produce momentums for this pillar.
    pub producer: Address,
    /// Delegated weight in the counting token.
    pub weight: U256,
}

/// Sort by weight descending, ties broken by name ascending.
pub fn sort_by_weight(delegations: &mut [PillarDelegation]) {
    delegations.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.name.cmp(&b.name)));
}

/// A producer's slot in an election tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerEvent {
    /// Pillar name.
    pub name: String,
    /// Producer address.
    pub producer: Address,
    /// Slot start, unix seconds.
    pub start_time: u64,
    /// Slot end, unix seconds.
    pub end_time: u64,
}
