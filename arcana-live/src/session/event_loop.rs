use crate::error::{HandshakeStage, SessionError};
use crate::session::SessionEvent;
use crate::session::signaling_session::SessionInner;
use crate::signaling::{SignalEvent, SignalingChannel};
use crate::transport::{PeerEvent, PeerState, PeerTransport};
use arcana_core::{IceCandidate, SessionStatus, SignalMessage};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Pumps relay messages and peer events for one session until it is shut
/// down, fails, or is dropped.
pub(super) async fn run_event_loop(
    session: Weak<SessionInner>,
    mut channel: SignalingChannel,
    peer: Arc<dyn PeerTransport>,
    mut peer_events: mpsc::UnboundedReceiver<PeerEvent>,
    mut shutdown: watch::Receiver<bool>,
    answer_timeout: Duration,
) {
    let answer_deadline = tokio::time::sleep(answer_timeout);
    tokio::pin!(answer_deadline);

    let mut answered = false;
    let mut socket_open = true;
    let mut pending_remote: Vec<IceCandidate> = Vec::new();

    let failure = loop {
        tokio::select! {
            _ = shutdown_signalled(&mut shutdown) => break None,

            _ = &mut answer_deadline, if !answered => {
                break Some(SessionError::Timeout(HandshakeStage::Answer));
            }

            event = channel.recv(), if socket_open => {
                let Some(session) = session.upgrade() else { break None };
                match event {
                    Some(SignalEvent::Message(SignalMessage::SdpAnswer { sdp })) => {
                        if session.status() != SessionStatus::Connecting {
                            warn!("Ignoring sdp-answer while {}", session.status());
                            continue;
                        }
                        if let Err(e) = peer.apply_answer(sdp).await {
                            break Some(SessionError::peer(e));
                        }
                        if let Err(e) = session.transition(SessionEvent::AnswerApplied) {
                            debug!("Answer applied after teardown: {}", e);
                            break None;
                        }
                        answered = true;
                        info!("Answer applied, oracle connected");

                        if !pending_remote.is_empty() {
                            debug!("Applying {} queued remote candidate(s)", pending_remote.len());
                        }
                        for candidate in pending_remote.drain(..) {
                            apply_remote_candidate(peer.as_ref(), candidate).await;
                        }
                    }
                    Some(SignalEvent::Message(SignalMessage::IceCandidate { candidate })) => {
                        if answered {
                            apply_remote_candidate(peer.as_ref(), candidate).await;
                        } else {
                            debug!("Queueing remote candidate until the answer lands");
                            pending_remote.push(candidate);
                        }
                    }
                    Some(SignalEvent::Message(other)) => {
                        warn!("Unexpected {} from relay", other.kind());
                    }
                    Some(SignalEvent::Error(e)) => {
                        if !answered {
                            break Some(SessionError::Signaling(e));
                        }
                        warn!("Signaling socket error after connect: {}", e);
                        session.note_error(SessionError::Signaling(e));
                        socket_open = false;
                    }
                    Some(SignalEvent::Closed) | None => {
                        if !answered {
                            break Some(SessionError::Signaling(
                                "socket closed before the answer arrived".to_string(),
                            ));
                        }
                        info!("Relay closed the signaling socket");
                        socket_open = false;
                    }
                }
            }

            Some(event) = peer_events.recv() => {
                let Some(session) = session.upgrade() else { break None };
                match event {
                    PeerEvent::LocalCandidate(candidate) => {
                        if !socket_open || !channel.is_open() {
                            debug!("Socket closed, dropping local candidate");
                        } else if let Err(e) = channel.send(SignalMessage::IceCandidate { candidate }) {
                            debug!("Dropping local candidate: {}", e);
                        }
                    }
                    PeerEvent::RemoteTrack(stream) => session.publish_remote_stream(stream),
                    PeerEvent::StateChanged(state) => match state {
                        PeerState::Failed | PeerState::Disconnected => {
                            warn!("Peer connection {:?}", state);
                        }
                        _ => debug!("Peer connection {:?}", state),
                    },
                }
            }
        }
    };

    channel.close();

    if let Some(err) = failure {
        if let Some(session) = session.upgrade() {
            session.fail(err, false).await;
        }
    }
    debug!("Session event loop finished");
}

/// Resolves once shutdown is requested or the session is gone.
pub(super) async fn shutdown_signalled(shutdown: &mut watch::Receiver<bool>) {
    let _ = shutdown.wait_for(|stopped| *stopped).await;
}

async fn apply_remote_candidate(peer: &dyn PeerTransport, candidate: IceCandidate) {
    if let Err(e) = peer.add_remote_candidate(candidate).await {
        warn!("Failed to add remote candidate: {:#}", e);
    }
}
