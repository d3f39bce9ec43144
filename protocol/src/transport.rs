//! The external transport collaborator.

use crate::envelope::{Envelope, Reply};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How the caller waits on a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaitMode {
    /// Send and return immediately; no reply is read.
    FireAndForget,
    /// Block for the reply within the timeout.
    WaitForReply,
    /// Send and let a caller-owned event loop match the reply later by
    /// correlation id.
    QueueReply,
}

/// A transport-level failure carrying the peer's numeric code.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("transport failure {code}: {message}")]
pub struct TransportError {
    pub code: i32,
    pub message: String,
}

impl TransportError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Delivers one envelope and, depending on the wait mode, one reply.
///
/// Takes `&self` so a session can be shared across threads; the
/// transport owns whatever interior synchronization it needs.
/// `timeout_ticks` is always an explicit value — the session never
/// passes a transport-defined "default" sentinel.
pub trait Transport {
    fn send(
        &self,
        envelope: &Envelope,
        mode: WaitMode,
        timeout_ticks: i64,
    ) -> Result<Option<Reply>, TransportError>;
}
