//! The target-resolution collaborator.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use wire_types::WireValue;

/// An opaque target address produced by the resolver and consumed by
/// the transport. The session caches one per connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address(pub WireValue);

/// How a caller names the process it wants to talk to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TargetDescriptor {
    /// The calling process itself.
    Current,
    Name(String),
    BundleId(String),
    Url(String),
    ProcessId(i32),
    /// A pre-resolved address, bypassing resolution.
    Address(Address),
}

/// Whether resolution may launch the target as a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchPolicy {
    IfNeeded,
    Never,
}

/// The target could not be resolved or launched. Fatal to the call;
/// never retried beyond the single relaunch path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("target not found: {0}")]
    NotFound(String),

    #[error("target launch failed: {0}")]
    LaunchFailed(String),
}

/// Resolves target descriptors to addresses, possibly launching the
/// process on the way.
pub trait TargetResolver {
    fn resolve(
        &self,
        target: &TargetDescriptor,
        launch: LaunchPolicy,
    ) -> Result<Address, ConnectError>;

    /// Whether the relaunch-retry path may restart this target.
    fn is_relaunchable(&self, target: &TargetDescriptor) -> bool;

    fn is_running(&self, target: &TargetDescriptor) -> bool;
}
