use crate::error::SessionError;
use crate::signaling::{SignalEvent, SignalingChannel};
use arcana_core::{SessionToken, SignalMessage};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info, warn};
use url::Url;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Opens the signaling socket for a session token.
#[async_trait]
pub trait SignalingConnector: Send + Sync {
    async fn connect(&self, token: &SessionToken) -> Result<SignalingChannel, SessionError>;
}

pub struct WsConnector {
    url: String,
}

impl WsConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    fn endpoint(&self, token: &SessionToken) -> Result<Url, SessionError> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| SessionError::Config(format!("invalid WebSocket url: {}", e)))?;
        url.query_pairs_mut().append_pair("token", token.expose());
        Ok(url)
    }
}

#[async_trait]
impl SignalingConnector for WsConnector {
    async fn connect(&self, token: &SessionToken) -> Result<SignalingChannel, SessionError> {
        let url = self.endpoint(token)?;

        let (socket, _) = connect_async(url.as_str())
            .await
            .map_err(|e| SessionError::Signaling(format!("Failed to connect WebSocket: {}", e)))?;
        info!("Signaling socket open: {}", self.url);

        let (mut sender, mut receiver) = socket.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<SignalMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<SignalEvent>();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        error!("Failed to serialize signal message: {}", e);
                        continue;
                    }
                };
                if let Err(e) = sender.send(Message::Text(json)).await {
                    warn!("Failed to send WS message: {}", e);
                    break;
                }
            }
            if tokio::time::timeout(CLOSE_TIMEOUT, sender.close()).await.is_err() {
                debug!("Relay did not acknowledge close in time");
            }
        });

        let recv_task = tokio::spawn(async move {
            loop {
                let event = match receiver.next().await {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<SignalMessage>(&text) {
                            Ok(signal) => SignalEvent::Message(signal),
                            Err(e) => {
                                warn!("Invalid SignalMessage from relay: {}", e);
                                continue;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => SignalEvent::Closed,
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => SignalEvent::Error(e.to_string()),
                };

                let finished = !matches!(event, SignalEvent::Message(_));
                if in_tx.send(event).is_err() || finished {
                    break;
                }
            }
            debug!("Signaling reader finished");
        });

        Ok(SignalingChannel::new(out_tx, in_rx).with_tasks(send_task, recv_task))
    }
}
