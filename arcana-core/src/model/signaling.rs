use serde::{Deserialize, Serialize};

use crate::utils::default_stun_urls;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }

    /// True when at least one url points at a STUN server.
    pub fn has_stun(&self) -> bool {
        self.urls
            .iter()
            .any(|url| url.starts_with("stun:") || url.starts_with("stuns:"))
    }
}

impl Default for IceServerConfig {
    fn default() -> Self {
        Self {
            urls: default_stun_urls(),
            username: None,
            credential: None,
        }
    }
}

/// ICE candidate in the browser `RTCIceCandidateInit` JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(
        rename = "sdpMLineIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sdp_m_line_index: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            sdp_mid: None,
            sdp_m_line_index: None,
            username_fragment: None,
        }
    }
}

/// Messages exchanged with the avatar signaling relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SignalMessage {
    SdpOffer { sdp: String },
    SdpAnswer { sdp: String },
    IceCandidate { candidate: IceCandidate },
}

impl SignalMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            SignalMessage::SdpOffer { .. } => "sdp-offer",
            SignalMessage::SdpAnswer { .. } => "sdp-answer",
            SignalMessage::IceCandidate { .. } => "ice-candidate",
        }
    }
}
