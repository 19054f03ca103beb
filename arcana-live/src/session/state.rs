use arcana_core::SessionStatus;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    AnswerApplied,
    SetupFailed,
    Stopped,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot apply {event:?} while {from}")]
pub struct InvalidTransition {
    pub from: SessionStatus,
    pub event: SessionEvent,
}

/// Status of one session plus the transitions it accepts.
///
/// ```text
/// CONNECTING --AnswerApplied--> CONNECTED
/// CONNECTING --SetupFailed----> FAILED
/// CONNECTING | CONNECTED | FAILED --Stopped--> CLOSED
/// ```
#[derive(Debug)]
pub struct SessionStateMachine {
    status: SessionStatus,
}

impl SessionStateMachine {
    pub fn new() -> Self {
        Self {
            status: SessionStatus::Connecting,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn apply(&mut self, event: SessionEvent) -> Result<SessionStatus, InvalidTransition> {
        let next = match (self.status, event) {
            (SessionStatus::Connecting, SessionEvent::AnswerApplied) => SessionStatus::Connected,
            (SessionStatus::Connecting, SessionEvent::SetupFailed) => SessionStatus::Failed,
            (
                SessionStatus::Connecting | SessionStatus::Connected | SessionStatus::Failed,
                SessionEvent::Stopped,
            ) => SessionStatus::Closed,
            (from, event) => return Err(InvalidTransition { from, event }),
        };
        self.status = next;
        Ok(next)
    }
}

impl Default for SessionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
