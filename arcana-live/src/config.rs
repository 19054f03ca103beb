use crate::error::SessionError;
use arcana_core::IceServerConfig;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_REST_URL: &str = "https://api.simli.ai/startAudioToVideoSession";
pub const DEFAULT_WS_URL: &str = "wss://api.simli.ai/startWebRTCSession";

pub const API_KEY_ENV: &str = "AVATAR_API_KEY";
pub const REST_URL_ENV: &str = "AVATAR_REST_URL";
pub const WS_URL_ENV: &str = "AVATAR_WS_URL";

/// Settings for one live oracle session.
#[derive(Clone)]
pub struct LiveConfig {
    pub api_key: String,
    pub rest_url: String,
    pub ws_url: String,
    pub ice_servers: Vec<IceServerConfig>,
    /// Bounds the session REST call and the WebSocket connect.
    pub handshake_timeout: Duration,
    /// Bounds the wait for `sdp-answer` once the offer is sent.
    pub answer_timeout: Duration,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            rest_url: DEFAULT_REST_URL.to_owned(),
            ws_url: DEFAULT_WS_URL.to_owned(),
            ice_servers: vec![IceServerConfig::default()],
            handshake_timeout: Duration::from_secs(15),
            answer_timeout: Duration::from_secs(30),
        }
    }
}

impl LiveConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Reads the API key and optional endpoint overrides from the environment.
    pub fn from_env() -> Result<Self, SessionError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| SessionError::Config(format!("{} is not set", API_KEY_ENV)))?;

        let mut config = Self::with_api_key(api_key);
        if let Ok(url) = std::env::var(REST_URL_ENV) {
            config.rest_url = url;
        }
        if let Ok(url) = std::env::var(WS_URL_ENV) {
            config.ws_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.api_key.trim().is_empty() {
            return Err(SessionError::Config("avatar API key is empty".to_string()));
        }
        url::Url::parse(&self.rest_url)
            .map_err(|e| SessionError::Config(format!("invalid REST url: {}", e)))?;
        let ws = url::Url::parse(&self.ws_url)
            .map_err(|e| SessionError::Config(format!("invalid WebSocket url: {}", e)))?;
        if ws.scheme() != "ws" && ws.scheme() != "wss" {
            return Err(SessionError::Config(format!(
                "WebSocket url must use ws:// or wss://, got {}",
                ws.scheme()
            )));
        }
        if !self.ice_servers.iter().any(IceServerConfig::has_stun) {
            return Err(SessionError::Config(
                "at least one stun: ICE server is required".to_string(),
            ));
        }
        Ok(())
    }

    /// ICE servers handed to the peer connection. Falls back to the public
    /// STUN set when the configured list has no STUN entry.
    pub fn peer_ice_servers(&self) -> Vec<IceServerConfig> {
        let mut servers = self.ice_servers.clone();
        if !servers.iter().any(IceServerConfig::has_stun) {
            servers.push(IceServerConfig::default());
        }
        servers
    }
}

impl fmt::Debug for LiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveConfig")
            .field("api_key", &"***")
            .field("rest_url", &self.rest_url)
            .field("ws_url", &self.ws_url)
            .field("ice_servers", &self.ice_servers)
            .field("handshake_timeout", &self.handshake_timeout)
            .field("answer_timeout", &self.answer_timeout)
            .finish()
    }
}
