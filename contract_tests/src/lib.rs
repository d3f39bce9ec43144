//! # Wire Contract Tests
//!
//! This crate provides "golden" tests for the wire schema and protocol
//! behavior to ensure they don't drift accidentally over time.
//!
//! ## Philosophy
//!
//! - **Explicit over implicit**: record forms are pinned field by field
//! - **Testability first**: contract tests fail when the wire changes
//! - **In-memory doubles**: every protocol scenario runs against a
//!   scripted transport and a fixed resolver, no live peer
//!
//! ## Structure
//!
//! - `specifier_forms` pins the query and test-clause record forms
//! - `codec_properties` pins cross-crate codec behavior
//! - `protocol_flow` pins the end-to-end send scenarios

pub mod codec_properties;
pub mod protocol_flow;
pub mod specifier_forms;

/// Common test doubles for protocol scenarios.
pub mod test_helpers {
    use protocol::{
        Address, ConnectError, Envelope, LaunchPolicy, Reply, TargetDescriptor, TargetResolver,
        Transport, TransportError, WaitMode,
    };
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use wire_types::{FourCc, WireValue};

    /// Replays scripted transport results in order and records every
    /// envelope it is asked to send. Once the script runs out, it
    /// answers with empty replies.
    pub struct ScriptedTransport {
        results: Mutex<VecDeque<Result<Option<Reply>, TransportError>>>,
        sent: Mutex<Vec<(Envelope, WaitMode, i64)>>,
    }

    impl ScriptedTransport {
        pub fn new(results: Vec<Result<Option<Reply>, TransportError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                sent: Mutex::new(Vec::new()),
            }
        }

        /// A transport that answers every send with an empty reply.
        pub fn empty_replies() -> Self {
            Self::new(Vec::new())
        }

        /// The envelopes sent so far, in order.
        pub fn sent(&self) -> Vec<Envelope> {
            self.sends().into_iter().map(|(envelope, _, _)| envelope).collect()
        }

        /// The full send log: envelope, wait mode, and timeout.
        pub fn sends(&self) -> Vec<(Envelope, WaitMode, i64)> {
            self.sent
                .lock()
                .expect("send log poisoned")
                .clone()
        }
    }

    impl Transport for &ScriptedTransport {
        fn send(
            &self,
            envelope: &Envelope,
            mode: WaitMode,
            timeout_ticks: i64,
        ) -> Result<Option<Reply>, TransportError> {
            self.sent
                .lock()
                .expect("send log poisoned")
                .push((envelope.clone(), mode, timeout_ticks));
            self.results
                .lock()
                .expect("script poisoned")
                .pop_front()
                .unwrap_or(Ok(Some(Reply::default())))
        }
    }

    /// Resolves every descriptor to a distinct address per resolution,
    /// so relaunch scenarios can assert the address actually changed.
    pub struct FixedResolver {
        relaunchable: bool,
        resolutions: AtomicUsize,
    }

    impl FixedResolver {
        pub fn new(relaunchable: bool) -> Self {
            Self {
                relaunchable,
                resolutions: AtomicUsize::new(0),
            }
        }

        /// How many times `resolve` was called.
        pub fn resolutions(&self) -> usize {
            self.resolutions.load(Ordering::SeqCst)
        }
    }

    impl TargetResolver for &FixedResolver {
        fn resolve(
            &self,
            _target: &TargetDescriptor,
            _launch: LaunchPolicy,
        ) -> Result<Address, ConnectError> {
            let n = self.resolutions.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Address(WireValue::scalar(
                FourCc::new(b"addr"),
                vec![n as u8],
            )))
        }

        fn is_relaunchable(&self, _target: &TargetDescriptor) -> bool {
            self.relaunchable
        }

        fn is_running(&self, _target: &TargetDescriptor) -> bool {
            true
        }
    }
}
