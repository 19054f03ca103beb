use anyhow::{Result, bail};
use arcana_core::IceCandidate;
use arcana_live::{
    LocalAudioTrack, MediaKind, PeerEvent, PeerFactory, PeerTransport, RemoteMediaStream,
    TransportConfig,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const MOCK_OFFER: &str = "v=0\r\no=- 1 1 IN IP4 127.0.0.1\r\ns=-\r\nm=audio 9 UDP/TLS/RTP/SAVPF 111\r\n";

/// Answer the mock peer refuses to apply.
pub const REJECTED_ANSWER: &str = "not-an-sdp";

/// Everything the session did to the mock peer.
#[derive(Debug, Default)]
pub struct PeerLog {
    /// ICE server urls the peer was configured with.
    pub ice_urls: Vec<String>,
    pub tracks: Vec<String>,
    pub offers: Vec<String>,
    pub answers: Vec<String>,
    pub remote_candidates: Vec<IceCandidate>,
    pub closed: bool,
}

pub struct MockPeer {
    log: Arc<Mutex<PeerLog>>,
    events: mpsc::UnboundedSender<PeerEvent>,
    candidates_on_offer: Vec<IceCandidate>,
    fail_close: bool,
}

#[async_trait]
impl PeerTransport for MockPeer {
    async fn add_local_track(&self, track: &LocalAudioTrack) -> Result<()> {
        self.log.lock().tracks.push(track.id().to_string());
        Ok(())
    }

    async fn create_offer(&self) -> Result<String> {
        self.log.lock().offers.push(MOCK_OFFER.to_string());
        // Gathering starts with the local description.
        for candidate in &self.candidates_on_offer {
            let _ = self.events.send(PeerEvent::LocalCandidate(candidate.clone()));
        }
        Ok(MOCK_OFFER.to_string())
    }

    async fn apply_answer(&self, sdp: String) -> Result<()> {
        if sdp == REJECTED_ANSWER {
            bail!("failed to parse remote description");
        }
        self.log.lock().answers.push(sdp);
        let _ = self.events.send(PeerEvent::RemoteTrack(RemoteMediaStream {
            stream_id: "avatar".to_string(),
            track_id: "avatar-video".to_string(),
            kind: MediaKind::Video,
            track: None,
        }));
        Ok(())
    }

    async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let mut log = self.log.lock();
        if log.answers.is_empty() {
            bail!("remote description not set");
        }
        log.remote_candidates.push(candidate);
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.log.lock().closed = true;
        if self.fail_close {
            bail!("transport already torn down");
        }
        Ok(())
    }
}

/// PeerFactory producing [`MockPeer`]s that share one log.
#[derive(Clone, Default)]
pub struct MockPeerFactory {
    log: Arc<Mutex<PeerLog>>,
    candidates_on_offer: Vec<IceCandidate>,
    events: Arc<Mutex<Option<mpsc::UnboundedSender<PeerEvent>>>>,
    created: Arc<Mutex<usize>>,
    fail_close: bool,
}

impl MockPeerFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local candidates the peer "gathers" as soon as the offer is created.
    pub fn with_candidates_on_offer(mut self, candidates: Vec<IceCandidate>) -> Self {
        self.candidates_on_offer = candidates;
        self
    }

    /// Peers whose `close` reports an error after marking themselves closed.
    pub fn with_failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub fn log(&self) -> parking_lot::MutexGuard<'_, PeerLog> {
        self.log.lock()
    }

    pub fn created(&self) -> usize {
        *self.created.lock()
    }

    /// Emits a peer event as if the transport raised it.
    pub fn emit(&self, event: PeerEvent) {
        if let Some(events) = self.events.lock().as_ref() {
            let _ = events.send(event);
        }
    }
}

#[async_trait]
impl PeerFactory for MockPeerFactory {
    async fn create(
        &self,
        config: &TransportConfig,
        events: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Arc<dyn PeerTransport>> {
        *self.created.lock() += 1;
        self.log.lock().ice_urls = config
            .ice_servers
            .iter()
            .flat_map(|server| server.urls.clone())
            .collect();
        *self.events.lock() = Some(events.clone());
        Ok(Arc::new(MockPeer {
            log: self.log.clone(),
            events,
            candidates_on_offer: self.candidates_on_offer.clone(),
            fail_close: self.fail_close,
        }))
    }
}
