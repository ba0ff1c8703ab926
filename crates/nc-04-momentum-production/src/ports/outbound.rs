//! Outbound ports (driven side - SPI)

use std::fmt;

use crate::error::Result;
use async_trait::async_trait;
use sha3::{Digest, Sha3_256};
use shared_types::{
    AccountBlock, Address, DetailedMomentum, Momentum, PlasmaVariables, SignedMomentum, Spork,
};

/// Port: read the committed chain state
#[async_trait]
pub trait MomentumStore: Send + Sync {
    /// Latest committed momentum
    async fn get_frontier_momentum(&self) -> Result<Momentum>;

    /// Whether `spork` is enforced at the frontier
    async fn is_spork_active(&self, spork: Spork) -> Result<bool>;

    /// Plasma variables currently stored by the plasma contract
    async fn get_plasma_variables(&self) -> Result<PlasmaVariables>;
}

/// Port: account blocks waiting for a momentum
#[async_trait]
pub trait UncommittedBlockPool: Send + Sync {
    /// Every uncommitted account block, in pool order
    async fn get_all_uncommitted_account_blocks(&self) -> Result<Vec<AccountBlock>>;

    /// Content chosen by the selection used before dynamic plasma
    async fn get_legacy_momentum_content(&self) -> Result<Vec<AccountBlock>>;
}

/// Port: sign an assembled momentum
#[async_trait]
pub trait MomentumFinalizer: Send + Sync {
    /// Sign `momentum` with `signer`
    async fn finalize(
        &self,
        momentum: DetailedMomentum,
        signer: &SignerKey,
    ) -> Result<SignedMomentum>;
}

/// Key material of the local producer
#[derive(Clone)]
pub struct SignerKey {
    /// Producer address
    pub address: Address,

    /// Public key
    pub public_key: Vec<u8>,

    secret: Vec<u8>,
}

impl SignerKey {
    /// Derive the key pair from a secret seed
    pub fn from_secret(secret: Vec<u8>) -> Self {
        let public_key = Sha3_256::digest(&secret).to_vec();
        Self {
            address: Address::from_public_key(&public_key),
            public_key,
            secret,
        }
    }

    /// Secret seed
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl fmt::Debug for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerKey")
            .field("address", &self.address)
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}
