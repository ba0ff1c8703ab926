//! Inbound ports (driving side - API)

use crate::error::Result;
use async_trait::async_trait;
use shared_types::{ProducerEvent, SignedMomentum};

/// Primary port: momentum production service
#[async_trait]
pub trait MomentumProducerService: Send + Sync {
    /// Build and sign the momentum for the producer slot `event`
    ///
    /// Rounds are serialized; a failed round leaves no partial momentum.
    async fn generate_momentum(&self, event: &ProducerEvent) -> Result<SignedMomentum>;
}
