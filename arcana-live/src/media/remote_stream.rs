use std::fmt;
use std::sync::Arc;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::track::track_remote::TrackRemote;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Unknown,
}

impl From<RTPCodecType> for MediaKind {
    fn from(kind: RTPCodecType) -> Self {
        match kind {
            RTPCodecType::Audio => MediaKind::Audio,
            RTPCodecType::Video => MediaKind::Video,
            _ => MediaKind::Unknown,
        }
    }
}

/// Remote avatar media. The session only references it; reading RTP from
/// `track` is the sink's job.
#[derive(Clone)]
pub struct RemoteMediaStream {
    pub stream_id: String,
    pub track_id: String,
    pub kind: MediaKind,
    pub track: Option<Arc<TrackRemote>>,
}

impl RemoteMediaStream {
    pub fn from_track(track: Arc<TrackRemote>) -> Self {
        Self {
            stream_id: track.stream_id(),
            track_id: track.id(),
            kind: track.kind().into(),
            track: Some(track),
        }
    }
}

impl fmt::Debug for RemoteMediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteMediaStream")
            .field("stream_id", &self.stream_id)
            .field("track_id", &self.track_id)
            .field("kind", &self.kind)
            .finish()
    }
}
