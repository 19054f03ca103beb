use anyhow::{Context, Result};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use webrtc::api::media_engine::MIME_TYPE_OPUS;
use webrtc::media::Sample;
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

struct TrackInner {
    id: String,
    rtc: Arc<TrackLocalStaticSample>,
    enabled: AtomicBool,
    live: AtomicBool,
}

/// Local microphone track. Clones share the same enabled/live flags.
#[derive(Clone)]
pub struct LocalAudioTrack {
    inner: Arc<TrackInner>,
}

impl LocalAudioTrack {
    /// Opus track, 48kHz stereo, as negotiated by browsers.
    pub fn opus(id: impl Into<String>, stream_id: impl Into<String>) -> Self {
        let id = id.into();
        let rtc = Arc::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                clock_rate: 48_000,
                channels: 2,
                ..Default::default()
            },
            id.clone(),
            stream_id.into(),
        ));

        Self {
            inner: Arc::new(TrackInner {
                id,
                rtc,
                enabled: AtomicBool::new(true),
                live: AtomicBool::new(true),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn rtc_track(&self) -> Arc<TrackLocalStaticSample> {
        self.inner.rtc.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn is_live(&self) -> bool {
        self.inner.live.load(Ordering::SeqCst)
    }

    /// Ends the track. Stopping is permanent.
    pub fn stop(&self) {
        self.inner.live.store(false, Ordering::SeqCst);
    }

    /// Writes one encoded Opus frame. Returns `false` when the frame was
    /// dropped because the track is muted or stopped.
    pub async fn write_sample(&self, data: Bytes, duration: Duration) -> Result<bool> {
        if !self.is_live() || !self.is_enabled() {
            return Ok(false);
        }

        self.inner
            .rtc
            .write_sample(&Sample {
                data,
                duration,
                ..Default::default()
            })
            .await
            .context("Failed to write audio sample")?;
        Ok(true)
    }
}

#[derive(Clone)]
pub struct LocalMediaStream {
    id: String,
    tracks: Vec<LocalAudioTrack>,
}

impl LocalMediaStream {
    pub fn new(id: impl Into<String>, tracks: Vec<LocalAudioTrack>) -> Self {
        Self {
            id: id.into(),
            tracks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn audio_tracks(&self) -> &[LocalAudioTrack] {
        &self.tracks
    }

    pub fn first_audio_track(&self) -> Option<&LocalAudioTrack> {
        self.tracks.first()
    }

    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }

    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(LocalAudioTrack::is_live)
    }
}
