mod oracle;
mod session;
mod signaling;

pub use oracle::{FaceId, ORACLES, Oracle, UnknownOracle};
pub use session::{SessionId, SessionStatus, SessionToken};
pub use signaling::{IceCandidate, IceServerConfig, SignalMessage};
