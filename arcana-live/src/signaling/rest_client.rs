use crate::config::LiveConfig;
use crate::error::SessionError;
use arcana_core::{FaceId, SessionToken};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Mints avatar session tokens.
#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn start_session(&self, face_id: &FaceId) -> Result<SessionToken, SessionError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StartSessionRequest<'a> {
    api_key: &'a str,
    face_id: &'a str,
    is_interactive: bool,
    sync_audio: bool,
}

#[derive(Debug, Deserialize)]
struct StartSessionResponse {
    session_token: Option<String>,
}

pub struct AvatarRestClient {
    client: Client,
    url: String,
    api_key: String,
}

impl AvatarRestClient {
    pub fn new(config: &LiveConfig) -> Result<Self, SessionError> {
        let client = Client::builder()
            .build()
            .map_err(|e| SessionError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.rest_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl SessionApi for AvatarRestClient {
    async fn start_session(&self, face_id: &FaceId) -> Result<SessionToken, SessionError> {
        debug!("Requesting avatar session for face {}", face_id);

        let response = self
            .client
            .post(&self.url)
            .json(&StartSessionRequest {
                api_key: &self.api_key,
                face_id: face_id.as_str(),
                is_interactive: true,
                sync_audio: true,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Avatar session request rejected: HTTP {}", status);
            return Err(SessionError::SessionInit(status.as_u16()));
        }

        let body: StartSessionResponse = response
            .json()
            .await
            .map_err(|e| SessionError::InvalidResponse(e.to_string()))?;

        match body.session_token {
            Some(token) if !token.is_empty() => Ok(SessionToken::new(token)),
            _ => Err(SessionError::InvalidResponse(
                "missing session_token".to_string(),
            )),
        }
    }
}
