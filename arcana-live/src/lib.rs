//! Live, voice-driven sessions with avatar oracles.
//!
//! A [`SignalingSession`] asks the avatar service for a session token, opens
//! the vendor signaling socket and negotiates a WebRTC peer connection that
//! carries the caller's microphone out and the oracle's audio and video back.

pub mod config;
pub mod error;
pub mod media;
pub mod session;
pub mod signaling;
pub mod transport;

pub use config::*;
pub use error::*;
pub use media::*;
pub use session::*;
pub use signaling::*;
pub use transport::*;
