//! # Request/Reply Protocol
//!
//! The messaging layer over the tagged value model: opcodes, request
//! envelopes, reply classification, and the per-connection session
//! state machine.
//!
//! ## Philosophy
//!
//! - **Synchronous, thread-agnostic core**: one blocking transport
//!   round-trip per call, no internal concurrency; shared state is two
//!   mutex-guarded fields (cached address, transaction id)
//! - **External collaborators at the seams**: the transport and the
//!   target resolver are traits, so the whole protocol runs against
//!   in-memory doubles
//! - **One diagnostic per call**: every failure inside a send is
//!   rewrapped as a [`SendError`] naming the attempted call, with the
//!   cause preserved
//! - **Exactly one retry**: the single relaunch-and-resend path is the
//!   only retry in the protocol; everything else surfaces immediately
//!
//! ## Architecture
//!
//! A [`Session`] owns a [`Transport`], a [`TargetResolver`], a target
//! descriptor, and a [`ProtocolConfig`]. [`Session::send`] resolves
//! the address (cached), builds an [`Envelope`] from the [`Request`]
//! per the subject precedence rule, dispatches, and classifies the
//! reply into an [`Outcome`]. [`Session::with_transaction`] brackets
//! an action with begin/end/abort requests under an exclusive gate.

pub mod config;
pub mod envelope;
pub mod error;
pub mod reply;
pub mod request;
pub mod session;
pub mod target;
pub mod transaction;
pub mod transport;

pub use config::{Consideration, Considerations, ProtocolConfig, RelaunchMode};
pub use envelope::{Envelope, Opcode, Reply};
pub use error::{SendError, SendErrorKind};
pub use reply::{describe_code, ErrorInfo, CODE_NOT_HANDLED};
pub use request::{ParamValue, Request};
pub use session::{Outcome, Session, ANY_TRANSACTION};
pub use target::{Address, ConnectError, LaunchPolicy, TargetDescriptor, TargetResolver};
pub use transport::{Transport, TransportError, WaitMode};
