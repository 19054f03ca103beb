use crate::error::SessionError;
use crate::media::RemoteMediaStream;
use crate::session::SignalingSession;
use arcana_core::SessionStatus;
use async_trait::async_trait;
use tokio::sync::watch;

/// What a front end needs from a live avatar call, independent of the
/// avatar vendor behind it.
#[async_trait]
pub trait AvatarCall: Send + Sync {
    async fn start(&self, identity: &str) -> Result<(), SessionError>;

    async fn stop(&self);

    /// Returns the new `enabled` state, or `None` without a local stream.
    fn toggle_mute(&self) -> Option<bool>;

    fn on_status_change(&self) -> watch::Receiver<SessionStatus>;

    fn on_remote_stream(&self) -> watch::Receiver<Option<RemoteMediaStream>>;
}

#[async_trait]
impl AvatarCall for SignalingSession {
    async fn start(&self, identity: &str) -> Result<(), SessionError> {
        SignalingSession::start(self, identity).await
    }

    async fn stop(&self) {
        SignalingSession::stop(self).await
    }

    fn toggle_mute(&self) -> Option<bool> {
        SignalingSession::toggle_mute(self)
    }

    fn on_status_change(&self) -> watch::Receiver<SessionStatus> {
        SignalingSession::on_status_change(self)
    }

    fn on_remote_stream(&self) -> watch::Receiver<Option<RemoteMediaStream>> {
        SignalingSession::on_remote_stream(self)
    }
}
