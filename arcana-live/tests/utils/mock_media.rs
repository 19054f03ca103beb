use arcana_live::{LocalAudioTrack, LocalMediaStream, MediaSource, SessionError};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// MediaSource that either hands out a fresh Opus stream or refuses,
/// remembering what it handed out.
#[derive(Clone)]
pub struct MockMediaSource {
    deny: bool,
    calls: Arc<AtomicUsize>,
    issued: Arc<Mutex<Vec<LocalMediaStream>>>,
}

impl MockMediaSource {
    pub fn granted() -> Self {
        Self {
            deny: false,
            calls: Arc::new(AtomicUsize::new(0)),
            issued: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn denied() -> Self {
        Self {
            deny: true,
            ..Self::granted()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Streams handed out so far.
    pub fn issued(&self) -> Vec<LocalMediaStream> {
        self.issued.lock().clone()
    }

    pub fn any_track_live(&self) -> bool {
        self.issued.lock().iter().any(|stream| stream.is_live())
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    async fn acquire_audio(&self) -> Result<LocalMediaStream, SessionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(SessionError::MediaAcquisition(
                "permission denied".to_string(),
            ));
        }

        let stream = LocalMediaStream::new(
            "mock-stream",
            vec![LocalAudioTrack::opus("mock-audio", "mock-stream")],
        );
        self.issued.lock().push(stream.clone());
        Ok(stream)
    }
}
