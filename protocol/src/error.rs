//! Call-level errors.
//!
//! Every failure inside one send — resolution, encoding, transport,
//! application error, reply decoding — is rewrapped at the call
//! boundary into a single [`SendError`] describing the attempted call,
//! with the original cause preserved in the chain.

use crate::envelope::Opcode;
use crate::reply::ErrorInfo;
use crate::target::ConnectError;
use crate::transport::TransportError;
use codec::{DecodeError, EncodeError};
use thiserror::Error;
use wire_types::WireError;

/// One coherent diagnostic per failed call.
#[derive(Debug, Error)]
#[error("request {opcode} failed ({call}): {kind}")]
pub struct SendError {
    pub opcode: Opcode,
    /// One-line description of the attempted call.
    pub call: String,
    #[source]
    pub kind: SendErrorKind,
}

impl SendError {
    /// The application-level diagnostics, when the target replied with
    /// a non-zero error number.
    pub fn application(&self) -> Option<&ErrorInfo> {
        match &self.kind {
            SendErrorKind::Application(info) => Some(info),
            _ => None,
        }
    }

    /// The numeric code, application or transport level.
    pub fn error_number(&self) -> Option<i32> {
        match &self.kind {
            SendErrorKind::Application(info) => Some(info.number),
            SendErrorKind::Transport(err) => Some(err.code),
            _ => None,
        }
    }
}

/// The underlying cause of a [`SendError`].
#[derive(Debug, Error)]
pub enum SendErrorKind {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Wire(#[from] WireError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The target replied with a non-zero error number.
    #[error("{0}")]
    Application(Box<ErrorInfo>),
}
