use crate::error::SessionError;
use crate::media::{LocalAudioTrack, LocalMediaStream};
use async_trait::async_trait;
use tracing::debug;

/// Grants (or denies) audio-only local capture.
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn acquire_audio(&self) -> Result<LocalMediaStream, SessionError>;
}

/// Hands out a fresh Opus track per session. The embedding application
/// feeds encoded frames through [`LocalAudioTrack::write_sample`].
#[derive(Debug, Clone)]
pub struct OpusTrackSource {
    stream_id: String,
}

impl OpusTrackSource {
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
        }
    }
}

impl Default for OpusTrackSource {
    fn default() -> Self {
        Self::new("arcana-local")
    }
}

#[async_trait]
impl MediaSource for OpusTrackSource {
    async fn acquire_audio(&self) -> Result<LocalMediaStream, SessionError> {
        debug!("Creating local Opus track for stream {}", self.stream_id);
        let track = LocalAudioTrack::opus("audio", self.stream_id.clone());
        Ok(LocalMediaStream::new(self.stream_id.clone(), vec![track]))
    }
}
