use crate::media::LocalAudioTrack;
use crate::transport::{PeerEvent, TransportConfig};
use anyhow::Result;
use arcana_core::IceCandidate;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Offer-side view of one WebRTC peer connection.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn add_local_track(&self, track: &LocalAudioTrack) -> Result<()>;

    /// Creates an SDP offer and sets it as the local description.
    async fn create_offer(&self) -> Result<String>;

    async fn apply_answer(&self, sdp: String) -> Result<()>;

    async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<()>;

    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait PeerFactory: Send + Sync {
    async fn create(
        &self,
        config: &TransportConfig,
        events: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Arc<dyn PeerTransport>>;
}
