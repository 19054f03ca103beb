use crate::error::SessionError;
use arcana_core::SignalMessage;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Inbound traffic from the signaling relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalEvent {
    Message(SignalMessage),
    Error(String),
    Closed,
}

/// An open signaling socket, seen as a pair of queues. Dropping it closes
/// the socket.
pub struct SignalingChannel {
    outgoing: Option<mpsc::UnboundedSender<SignalMessage>>,
    incoming: mpsc::UnboundedReceiver<SignalEvent>,
    writer: Option<JoinHandle<()>>,
    reader: Option<JoinHandle<()>>,
}

impl SignalingChannel {
    pub fn new(
        outgoing: mpsc::UnboundedSender<SignalMessage>,
        incoming: mpsc::UnboundedReceiver<SignalEvent>,
    ) -> Self {
        Self {
            outgoing: Some(outgoing),
            incoming,
            writer: None,
            reader: None,
        }
    }

    /// Ties the socket pump tasks to the channel lifetime. The writer is
    /// left to drain and close the socket; the reader is aborted on drop.
    pub fn with_tasks(mut self, writer: JoinHandle<()>, reader: JoinHandle<()>) -> Self {
        self.writer = Some(writer);
        self.reader = Some(reader);
        self
    }

    pub fn is_open(&self) -> bool {
        self.outgoing.as_ref().is_some_and(|tx| !tx.is_closed())
    }

    pub fn send(&self, msg: SignalMessage) -> Result<(), SessionError> {
        let Some(tx) = &self.outgoing else {
            return Err(SignalingChannel::closed_error());
        };
        debug!("Signal OUT: {}", msg.kind());
        tx.send(msg).map_err(|_| SignalingChannel::closed_error())
    }

    pub async fn recv(&mut self) -> Option<SignalEvent> {
        self.incoming.recv().await
    }

    /// Stops accepting outbound messages; the writer flushes what is queued
    /// and sends a close frame.
    pub fn close(&mut self) {
        if self.outgoing.take().is_some() {
            debug!("Closing signaling channel");
        }
        self.incoming.close();
    }

    fn closed_error() -> SessionError {
        SessionError::Signaling("signaling socket is closed".to_string())
    }
}

impl Drop for SignalingChannel {
    fn drop(&mut self) {
        self.outgoing.take();
        self.writer.take();
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
