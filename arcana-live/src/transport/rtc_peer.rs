use crate::media::{LocalAudioTrack, RemoteMediaStream};
use crate::transport::{PeerEvent, PeerFactory, PeerState, PeerTransport, TransportConfig};
use anyhow::{Context, Result};
use arcana_core::IceCandidate;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::rtp_transceiver::rtp_receiver::RTCRtpReceiver;
use webrtc::rtp_transceiver::rtp_transceiver_direction::RTCRtpTransceiverDirection;
use webrtc::rtp_transceiver::{RTCRtpTransceiver, RTCRtpTransceiverInit};
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

pub struct RtcPeer {
    peer_connection: Arc<RTCPeerConnection>,
}

impl RtcPeer {
    /// Builds a peer connection and wires its callbacks into `event_tx`.
    pub async fn new(
        config: &TransportConfig,
        event_tx: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Self> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut m)?;

        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let rtc_config = RTCConfiguration {
            ice_servers: config
                .ice_servers
                .iter()
                .map(|server| RTCIceServer {
                    urls: server.urls.clone(),
                    username: server.username.clone().unwrap_or_default(),
                    credential: server.credential.clone().unwrap_or_default(),
                })
                .collect(),
            ..Default::default()
        };

        let peer_connection = Arc::new(api.new_peer_connection(rtc_config).await?);

        let state_tx = event_tx.clone();
        peer_connection.on_peer_connection_state_change(Box::new(
            move |s: RTCPeerConnectionState| {
                let tx = state_tx.clone();
                Box::pin(async move {
                    info!("Peer connection state changed: {:?}", s);
                    let _ = tx.send(PeerEvent::StateChanged(PeerState::from(s)));
                })
            },
        ));

        // Trickle ICE: local candidates go to the relay.
        let ice_tx = event_tx.clone();
        peer_connection.on_ice_candidate(Box::new(move |c: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = c else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                match from_rtc_candidate(init) {
                    Ok(candidate) => {
                        let _ = tx.send(PeerEvent::LocalCandidate(candidate));
                    }
                    Err(e) => warn!("Dropping unconvertible local candidate: {:#}", e),
                }
            })
        }));

        let track_tx = event_tx;
        peer_connection.on_track(Box::new(
            move |track: Arc<TrackRemote>,
                  _receiver: Arc<RTCRtpReceiver>,
                  _transceiver: Arc<RTCRtpTransceiver>| {
                let tx = track_tx.clone();
                Box::pin(async move {
                    let stream = RemoteMediaStream::from_track(track);
                    info!(
                        "Remote {:?} track attached: {}/{}",
                        stream.kind, stream.stream_id, stream.track_id
                    );
                    let _ = tx.send(PeerEvent::RemoteTrack(stream));
                })
            },
        ));

        if config.receive_video {
            peer_connection
                .add_transceiver_from_kind(
                    RTPCodecType::Video,
                    Some(RTCRtpTransceiverInit {
                        direction: RTCRtpTransceiverDirection::Recvonly,
                        send_encodings: vec![],
                    }),
                )
                .await
                .context("Failed to add video transceiver")?;
        }

        Ok(Self { peer_connection })
    }
}

#[async_trait]
impl PeerTransport for RtcPeer {
    async fn add_local_track(&self, track: &LocalAudioTrack) -> Result<()> {
        let local: Arc<dyn TrackLocal + Send + Sync> = track.rtc_track();
        let rtp_sender = self
            .peer_connection
            .add_track(local)
            .await
            .context("Failed to add local audio track")?;

        // RTCP has to be drained for interceptors to work.
        tokio::spawn(async move {
            let mut rtcp_buf = vec![0u8; 1500];
            while rtp_sender.read(&mut rtcp_buf).await.is_ok() {}
        });

        debug!("Local track '{}' attached", track.id());
        Ok(())
    }

    async fn create_offer(&self) -> Result<String> {
        let offer = self
            .peer_connection
            .create_offer(None)
            .await
            .context("Failed to create offer")?;
        self.peer_connection
            .set_local_description(offer.clone())
            .await
            .context("Failed to set local description")?;
        Ok(offer.sdp)
    }

    async fn apply_answer(&self, sdp: String) -> Result<()> {
        let desc = RTCSessionDescription::answer(sdp)?;
        self.peer_connection
            .set_remote_description(desc)
            .await
            .context("Failed to set remote description")?;
        Ok(())
    }

    async fn add_remote_candidate(&self, candidate: IceCandidate) -> Result<()> {
        let init = to_rtc_candidate(candidate)?;
        self.peer_connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.peer_connection.close().await?;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RtcPeerFactory;

#[async_trait]
impl PeerFactory for RtcPeerFactory {
    async fn create(
        &self,
        config: &TransportConfig,
        events: mpsc::UnboundedSender<PeerEvent>,
    ) -> Result<Arc<dyn PeerTransport>> {
        let peer = RtcPeer::new(config, events).await?;
        Ok(Arc::new(peer))
    }
}

// Both sides speak the browser RTCIceCandidateInit JSON shape.
fn from_rtc_candidate(init: RTCIceCandidateInit) -> Result<IceCandidate> {
    let value = serde_json::to_value(init)?;
    serde_json::from_value(value).context("Failed to convert local ICE candidate")
}

fn to_rtc_candidate(candidate: IceCandidate) -> Result<RTCIceCandidateInit> {
    let value = serde_json::to_value(candidate)?;
    serde_json::from_value(value).context("Failed to parse ICE candidate JSON")
}
