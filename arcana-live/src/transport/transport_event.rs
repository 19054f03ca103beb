use crate::media::RemoteMediaStream;
use arcana_core::IceCandidate;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl From<RTCPeerConnectionState> for PeerState {
    fn from(state: RTCPeerConnectionState) -> Self {
        match state {
            RTCPeerConnectionState::Connecting => PeerState::Connecting,
            RTCPeerConnectionState::Connected => PeerState::Connected,
            RTCPeerConnectionState::Disconnected => PeerState::Disconnected,
            RTCPeerConnectionState::Failed => PeerState::Failed,
            RTCPeerConnectionState::Closed => PeerState::Closed,
            _ => PeerState::New,
        }
    }
}

/// Events a peer transport reports back to the session loop.
#[derive(Debug, Clone)]
pub enum PeerEvent {
    /// Local ICE candidate to forward to the relay.
    LocalCandidate(IceCandidate),

    /// Remote avatar track negotiated.
    RemoteTrack(RemoteMediaStream),

    StateChanged(PeerState),
}
