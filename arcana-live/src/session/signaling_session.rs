use crate::config::LiveConfig;
use crate::error::{HandshakeStage, SessionError};
use crate::media::{LocalMediaStream, MediaSource, OpusTrackSource, RemoteMediaStream};
use crate::session::event_loop::{run_event_loop, shutdown_signalled};
use crate::session::{InvalidTransition, SessionEvent, SessionStateMachine};
use crate::signaling::{AvatarRestClient, SessionApi, SignalingConnector, WsConnector};
use crate::transport::{PeerFactory, PeerTransport, RtcPeerFactory, TransportConfig};
use arcana_core::{Oracle, SessionId, SessionStatus, SignalMessage};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{Instrument, Span, debug, error, info, info_span, warn};

const LOOP_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Collaborators a session drives. Swapped for fakes in tests.
pub struct SessionDeps {
    pub media: Arc<dyn MediaSource>,
    pub api: Arc<dyn SessionApi>,
    pub connector: Arc<dyn SignalingConnector>,
    pub peers: Arc<dyn PeerFactory>,
}

impl SessionDeps {
    pub fn production(config: &LiveConfig) -> Result<Self, SessionError> {
        Ok(Self {
            media: Arc::new(OpusTrackSource::default()),
            api: Arc::new(AvatarRestClient::new(config)?),
            connector: Arc::new(WsConnector::new(config.ws_url.clone())),
            peers: Arc::new(RtcPeerFactory),
        })
    }
}

#[derive(Default)]
struct SessionResources {
    local_stream: Option<LocalMediaStream>,
    peer: Option<Arc<dyn PeerTransport>>,
    event_loop: Option<JoinHandle<()>>,
    released: bool,
}

pub(super) struct SessionInner {
    id: SessionId,
    config: LiveConfig,
    deps: SessionDeps,
    started: AtomicBool,
    machine: Mutex<SessionStateMachine>,
    last_error: Mutex<Option<SessionError>>,
    resources: Mutex<SessionResources>,
    status_tx: watch::Sender<SessionStatus>,
    remote_tx: watch::Sender<Option<RemoteMediaStream>>,
    shutdown_tx: watch::Sender<bool>,
}

/// One live conversation with an avatar oracle.
///
/// A session is single use: `start` runs the handshake once, `stop` tears
/// everything down and leaves the session `CLOSED`. Clones share the same
/// session.
#[derive(Clone)]
pub struct SignalingSession {
    inner: Arc<SessionInner>,
}

impl SignalingSession {
    pub fn new(config: LiveConfig, deps: SessionDeps) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Connecting);
        let (remote_tx, _) = watch::channel(None);
        let (shutdown_tx, _) = watch::channel(false);

        Self {
            inner: Arc::new(SessionInner {
                id: SessionId::new(),
                config,
                deps,
                started: AtomicBool::new(false),
                machine: Mutex::new(SessionStateMachine::new()),
                last_error: Mutex::new(None),
                resources: Mutex::new(SessionResources::default()),
                status_tx,
                remote_tx,
                shutdown_tx,
            }),
        }
    }

    pub fn with_defaults(config: LiveConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let deps = SessionDeps::production(&config)?;
        Ok(Self::new(config, deps))
    }

    pub fn id(&self) -> SessionId {
        self.inner.id
    }

    pub fn status(&self) -> SessionStatus {
        *self.inner.status_tx.borrow()
    }

    pub fn on_status_change(&self) -> watch::Receiver<SessionStatus> {
        self.inner.status_tx.subscribe()
    }

    pub fn on_remote_stream(&self) -> watch::Receiver<Option<RemoteMediaStream>> {
        self.inner.remote_tx.subscribe()
    }

    pub fn last_error(&self) -> Option<SessionError> {
        self.inner.last_error.lock().clone()
    }

    pub fn local_stream(&self) -> Option<LocalMediaStream> {
        self.inner.resources.lock().local_stream.clone()
    }

    /// Runs the handshake up to the point where the offer is on the wire.
    /// The answer is awaited in the background; watch `on_status_change`
    /// for `CONNECTED` or `FAILED`.
    pub async fn start(&self, identity: &str) -> Result<(), SessionError> {
        if self.inner.started.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyStarted);
        }

        let span = info_span!("oracle_session", session = %self.inner.id, oracle = identity);
        match self.establish(identity).instrument(span.clone()).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let err = if self.inner.is_shut_down() {
                    SessionError::Cancelled
                } else {
                    err
                };
                self.inner.fail(err.clone(), true).instrument(span).await;
                Err(err)
            }
        }
    }

    async fn establish(&self, identity: &str) -> Result<(), SessionError> {
        let inner = &self.inner;

        let oracle = Oracle::resolve(identity)?;
        let face_id = oracle.face_id();
        info!("Invoking oracle {} ({})", oracle.name, face_id);

        let stream = inner
            .cancellable(inner.deps.media.acquire_audio())
            .await?;
        inner.adopt_stream(stream.clone())?;
        debug!("Local audio acquired: {} track(s)", stream.audio_tracks().len());

        let token = inner
            .cancellable(inner.with_deadline(
                HandshakeStage::SessionRequest,
                inner.deps.api.start_session(&face_id),
            ))
            .await?;
        debug!("Session token issued");

        let (peer_tx, peer_rx) = mpsc::unbounded_channel();
        let transport_config = TransportConfig::with_ice_servers(inner.config.peer_ice_servers());
        let peer = inner
            .cancellable(async {
                inner
                    .deps
                    .peers
                    .create(&transport_config, peer_tx)
                    .await
                    .map_err(SessionError::peer)
            })
            .await?;
        inner.adopt_peer(peer.clone()).await?;

        for track in stream.audio_tracks() {
            peer.add_local_track(track)
                .await
                .map_err(SessionError::peer)?;
        }
        let offer = inner
            .cancellable(async { peer.create_offer().await.map_err(SessionError::peer) })
            .await?;

        let channel = inner
            .cancellable(inner.with_deadline(
                HandshakeStage::SocketConnect,
                inner.deps.connector.connect(&token),
            ))
            .await?;

        // Candidates gathered so far sit in `peer_rx` and go out after this.
        channel.send(SignalMessage::SdpOffer { sdp: offer })?;
        info!("Offer sent, awaiting answer");

        let event_loop = tokio::spawn(
            run_event_loop(
                Arc::downgrade(inner),
                channel,
                peer,
                peer_rx,
                inner.shutdown_tx.subscribe(),
                inner.config.answer_timeout,
            )
            .instrument(Span::current()),
        );
        inner.adopt_event_loop(event_loop)
    }

    /// Flips every local audio track. Returns the new `enabled` state, or
    /// `None` when there is no local stream.
    pub fn toggle_mute(&self) -> Option<bool> {
        let resources = self.inner.resources.lock();
        let stream = resources.local_stream.as_ref()?;
        let enabled = !stream.first_audio_track()?.is_enabled();
        for track in stream.audio_tracks() {
            track.set_enabled(enabled);
        }
        info!("Microphone {}", if enabled { "unmuted" } else { "muted" });
        Some(enabled)
    }

    /// Idempotent. Safe to call while `start` is still running.
    pub async fn stop(&self) {
        match self.inner.transition(SessionEvent::Stopped) {
            Ok(_) => info!(session = %self.inner.id, "Session stopped"),
            Err(err) => debug!("Stop ignored: {}", err),
        }
        self.inner.release(true).await;
    }
}

impl SessionInner {
    pub(super) fn status(&self) -> SessionStatus {
        self.machine.lock().status()
    }

    pub(super) fn transition(&self, event: SessionEvent) -> Result<SessionStatus, InvalidTransition> {
        let mut machine = self.machine.lock();
        let next = machine.apply(event)?;
        self.status_tx.send_replace(next);
        debug!("Session status -> {}", next);
        Ok(next)
    }

    pub(super) fn publish_remote_stream(&self, stream: RemoteMediaStream) {
        info!("Remote {:?} track {} arrived", stream.kind, stream.track_id);
        self.remote_tx.send_replace(Some(stream));
    }

    /// Records an error that does not change the session status.
    pub(super) fn note_error(&self, err: SessionError) {
        *self.last_error.lock() = Some(err);
    }

    /// Moves the session to `FAILED` (unless cancelled or already settled)
    /// and releases everything it holds.
    pub(super) async fn fail(&self, err: SessionError, join_loop: bool) {
        if err != SessionError::Cancelled {
            match self.transition(SessionEvent::SetupFailed) {
                Ok(_) => {
                    error!("Session failed: {}", err);
                    self.note_error(err);
                }
                Err(rejected) => debug!("Late error ignored ({}): {}", rejected, err),
            }
        }
        self.release(join_loop).await;
    }

    /// Stops local tracks, closes the peer and ends the event loop. Runs at
    /// most once per session.
    async fn release(&self, join_loop: bool) {
        let (stream, peer, event_loop) = {
            let mut resources = self.resources.lock();
            if resources.released {
                return;
            }
            resources.released = true;
            (
                resources.local_stream.take(),
                resources.peer.take(),
                resources.event_loop.take(),
            )
        };
        self.shutdown_tx.send_replace(true);

        if let Some(stream) = stream {
            stream.stop_all();
            debug!("Local tracks stopped");
        }
        if let Some(peer) = peer {
            close_peer(peer.as_ref()).await;
        }
        if let Some(mut handle) = event_loop {
            if join_loop
                && tokio::time::timeout(LOOP_JOIN_TIMEOUT, &mut handle)
                    .await
                    .is_err()
            {
                warn!("Event loop did not exit in time, aborting");
                handle.abort();
            }
        }
    }

    fn is_shut_down(&self) -> bool {
        *self.shutdown_tx.borrow()
    }

    async fn cancellable<T, F>(&self, fut: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        let mut shutdown = self.shutdown_tx.subscribe();
        tokio::select! {
            result = fut => result,
            _ = shutdown_signalled(&mut shutdown) => Err(SessionError::Cancelled),
        }
    }

    async fn with_deadline<T, F>(&self, stage: HandshakeStage, fut: F) -> Result<T, SessionError>
    where
        F: Future<Output = Result<T, SessionError>>,
    {
        tokio::time::timeout(self.config.handshake_timeout, fut)
            .await
            .map_err(|_| SessionError::Timeout(stage))?
    }

    fn adopt_stream(&self, stream: LocalMediaStream) -> Result<(), SessionError> {
        let mut resources = self.resources.lock();
        if resources.released {
            stream.stop_all();
            return Err(SessionError::Cancelled);
        }
        resources.local_stream = Some(stream);
        Ok(())
    }

    async fn adopt_peer(&self, peer: Arc<dyn PeerTransport>) -> Result<(), SessionError> {
        let rejected = {
            let mut resources = self.resources.lock();
            if resources.released {
                Some(peer)
            } else {
                resources.peer = Some(peer);
                None
            }
        };
        match rejected {
            Some(peer) => {
                close_peer(peer.as_ref()).await;
                Err(SessionError::Cancelled)
            }
            None => Ok(()),
        }
    }

    fn adopt_event_loop(&self, handle: JoinHandle<()>) -> Result<(), SessionError> {
        let mut resources = self.resources.lock();
        if resources.released {
            handle.abort();
            return Err(SessionError::Cancelled);
        }
        resources.event_loop = Some(handle);
        Ok(())
    }
}

impl Drop for SessionInner {
    fn drop(&mut self) {
        let resources = self.resources.get_mut();
        if resources.released {
            return;
        }
        resources.released = true;
        self.shutdown_tx.send_replace(true);

        if let Some(stream) = resources.local_stream.take() {
            stream.stop_all();
        }
        if let Some(handle) = resources.event_loop.take() {
            handle.abort();
        }
        if let Some(peer) = resources.peer.take() {
            if let Ok(runtime) = tokio::runtime::Handle::try_current() {
                runtime.spawn(async move { close_peer(peer.as_ref()).await });
            }
        }
        debug!(session = %self.id, "Session dropped");
    }
}

/// Closes a peer, logging rather than propagating a failed close.
async fn close_peer(peer: &dyn PeerTransport) {
    if let Err(e) = peer.close().await {
        warn!("Failed to close peer connection: {:#}", e);
    }
}
