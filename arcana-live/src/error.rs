use arcana_core::UnknownOracle;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStage {
    SessionRequest,
    SocketConnect,
    Answer,
}

impl fmt::Display for HandshakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            HandshakeStage::SessionRequest => "session request",
            HandshakeStage::SocketConnect => "signaling connect",
            HandshakeStage::Answer => "waiting for sdp answer",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown avatar identity '{0}'")]
    UnknownAvatar(String),

    #[error("could not acquire local audio: {0}")]
    MediaAcquisition(String),

    #[error("avatar session init failed with HTTP {0}")]
    SessionInit(u16),

    #[error("signaling error: {0}")]
    Signaling(String),

    #[error("timed out during {0}")]
    Timeout(HandshakeStage),

    #[error("peer connection error: {0}")]
    Peer(String),

    #[error("invalid response from avatar service: {0}")]
    InvalidResponse(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("session already started")]
    AlreadyStarted,

    #[error("session was stopped before it connected")]
    Cancelled,
}

impl SessionError {
    pub fn peer(err: anyhow::Error) -> Self {
        SessionError::Peer(format!("{:#}", err))
    }

    /// Message suitable for showing to the person on the call.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::UnknownAvatar(name) => {
                format!("The Oracle {} is currently beyond the veil.", name)
            }
            SessionError::Signaling(_) => "The spiritual connection was interrupted.".to_string(),
            SessionError::SessionInit(status) => {
                format!("Failed to initialize ritual with the oracle ({})", status)
            }
            other => format!("The spirits are silent: {}", other),
        }
    }
}

impl From<UnknownOracle> for SessionError {
    fn from(err: UnknownOracle) -> Self {
        SessionError::UnknownAvatar(err.0)
    }
}

impl From<reqwest::Error> for SessionError {
    fn from(err: reqwest::Error) -> Self {
        SessionError::Http(err.to_string())
    }
}
