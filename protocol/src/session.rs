//! The per-connection session and its send state machine.

use crate::config::{ProtocolConfig, RelaunchMode};
use crate::envelope::{Envelope, Opcode, Reply};
use crate::error::{SendError, SendErrorKind};
use crate::reply::{self, CODE_NOT_HANDLED};
use crate::request::Request;
use crate::target::{Address, TargetDescriptor, TargetResolver};
use crate::transport::{Transport, TransportError, WaitMode};
use codec::Decode;
use std::any::Any;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;
use wire_types::{codes, Query, Record, Symbol, Value, WireValue};

/// The transaction id carried while no transaction is active.
pub const ANY_TRANSACTION: i32 = 0;

/// Terminal state of a successful send.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The reply carried a result value.
    Value(Value),
    /// No result parameter, fire-and-forget, or an empty reply.
    Missing,
    /// Queue-reply mode: the correlation id for out-of-band matching.
    Queued(i32),
}

/// One logical connection to a target process.
///
/// The session is synchronous and thread-agnostic: it performs one
/// blocking transport round-trip per call and spawns nothing. Shared
/// state is limited to the cached target address and the active
/// transaction id, each behind its own mutex.
pub struct Session<T, R> {
    transport: T,
    resolver: R,
    target: TargetDescriptor,
    config: ProtocolConfig,
    address: Mutex<Option<Address>>,
    pub(crate) transaction_gate: Mutex<()>,
    transaction_id: Mutex<i32>,
}

impl<T: Transport, R: TargetResolver> Session<T, R> {
    pub fn new(transport: T, resolver: R, target: TargetDescriptor) -> Self {
        Self::with_config(transport, resolver, target, ProtocolConfig::default())
    }

    pub fn with_config(
        transport: T,
        resolver: R,
        target: TargetDescriptor,
        config: ProtocolConfig,
    ) -> Self {
        Self {
            transport,
            resolver,
            target,
            config,
            address: Mutex::new(None),
            transaction_gate: Mutex::new(()),
            transaction_id: Mutex::new(ANY_TRANSACTION),
        }
    }

    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    /// Sends one request and classifies the outcome.
    pub fn send(&self, request: &Request) -> Result<Outcome, SendError> {
        self.send_inner(request)
            .map_err(|kind| self.wrap(request, kind))
    }

    /// Sends one request and decodes the result into a host type. A
    /// reply without a result decodes the missing-value sentinel, so
    /// `Option<D>` absorbs it as `None`.
    pub fn call<D: Decode + Any>(&self, request: &Request) -> Result<D, SendError> {
        let value = match self.send(request)? {
            Outcome::Value(value) => value,
            Outcome::Missing | Outcome::Queued(_) => Value::Missing,
        };
        codec::decode_value(&value).map_err(|err| self.wrap(request, err.into()))
    }

    fn wrap(&self, request: &Request, kind: SendErrorKind) -> SendError {
        SendError {
            opcode: request.opcode,
            call: describe_call(request),
            kind,
        }
    }

    fn send_inner(&self, request: &Request) -> Result<Outcome, SendErrorKind> {
        let address = self.address()?;
        let (envelope, return_id) = self.build_envelope(request, &address);
        let timeout = request
            .timeout_ticks
            .unwrap_or(self.config.default_timeout_ticks);
        match self.dispatch(&envelope, request, timeout, return_id) {
            Err(SendErrorKind::Transport(err)) if self.should_relaunch(request.opcode, &err) => {
                // Relaunch path: re-resolve once and resend a rebuilt
                // envelope carrying the original parameters and
                // attributes under a fresh return id.
                self.invalidate_address();
                let address = self.address()?;
                let mut retry = Envelope::new(request.opcode, address.0.clone());
                retry.params = envelope.params.clone();
                for (key, value) in &envelope.attributes {
                    if *key != codes::ATTR_RETURN_ID {
                        retry.attributes.push((*key, value.clone()));
                    }
                }
                let retry_id = next_return_id();
                retry.set_attribute(codes::ATTR_RETURN_ID, Value::Int32(retry_id).to_wire());
                self.dispatch(&retry, request, timeout, retry_id)
            }
            other => other,
        }
    }

    fn dispatch(
        &self,
        envelope: &Envelope,
        request: &Request,
        timeout: i64,
        return_id: i32,
    ) -> Result<Outcome, SendErrorKind> {
        match self.transport.send(envelope, request.wait_mode, timeout) {
            Ok(reply) => self.conclude(request, reply, return_id),
            // Many targets never implement the no-op launch event;
            // "not handled" counts as a successful empty reply there.
            Err(err) if err.code == CODE_NOT_HANDLED && request.opcode == Opcode::LAUNCH_NOOP => {
                Ok(Outcome::Missing)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn conclude(
        &self,
        request: &Request,
        reply: Option<Reply>,
        return_id: i32,
    ) -> Result<Outcome, SendErrorKind> {
        match request.wait_mode {
            WaitMode::FireAndForget => Ok(Outcome::Missing),
            WaitMode::QueueReply => Ok(Outcome::Queued(return_id)),
            WaitMode::WaitForReply => {
                let Some(reply) = reply else {
                    return Ok(Outcome::Missing);
                };
                match reply::classify(&reply) {
                    Ok(Some(value)) => Ok(Outcome::Value(value)),
                    Ok(None) => Ok(Outcome::Missing),
                    Err(info) => Err(SendErrorKind::Application(info)),
                }
            }
        }
    }

    /// Builds the envelope for one request, returning it with the
    /// generated return id.
    fn build_envelope(&self, request: &Request, address: &Address) -> (Envelope, i32) {
        let mut envelope = Envelope::new(request.opcode, address.0.clone());
        for (key, value) in &request.params {
            if let Some(value) = value.supplied() {
                envelope.set_param(*key, value.to_wire());
            }
        }
        let direct_supplied = request.direct.supplied().is_some();
        if let Some(direct) = request.direct.supplied() {
            let wire = lower_hoisting_attributes(direct, &mut envelope);
            envelope.set_param(codes::KEY_DIRECT_OBJECT, wire);
        }

        // Subject precedence: create-element routes the target to the
        // insert-at parameter unless one was supplied; other opcodes
        // put the target in the subject when a direct parameter exists,
        // else the target becomes the direct parameter and the subject
        // stays at the application root. An explicit subject hoisted
        // from the direct parameter always wins.
        let target_wire = request.target.to_wire();
        if request.opcode == Opcode::CREATE_ELEMENT {
            if envelope.param(codes::KEY_INSERT_HERE).is_none() {
                envelope.set_param(codes::KEY_INSERT_HERE, target_wire);
            } else if envelope.attribute(codes::ATTR_SUBJECT).is_none() {
                envelope.set_attribute(codes::ATTR_SUBJECT, target_wire);
            }
        } else if envelope.attribute(codes::ATTR_SUBJECT).is_none() {
            if direct_supplied {
                envelope.set_attribute(codes::ATTR_SUBJECT, target_wire);
            } else {
                envelope.set_param(codes::KEY_DIRECT_OBJECT, target_wire);
                envelope.set_attribute(codes::ATTR_SUBJECT, Query::app_root().to_wire());
            }
        }

        if let Some(type_tag) = request.requested_type {
            envelope.set_param(
                codes::KEY_REQUESTED_TYPE,
                Value::Symbol(Symbol::typed(type_tag)).to_wire(),
            );
        }
        let considerations = request
            .considerations
            .as_ref()
            .unwrap_or(&self.config.considerations);
        envelope.set_attribute(
            codes::ATTR_CONSIDERATIONS,
            WireValue::scalar(
                codes::TYPE_UINT32,
                considerations.mask().to_be_bytes().to_vec(),
            ),
        );
        envelope.set_attribute(
            codes::ATTR_TRANSACTION,
            Value::Int32(self.transaction_id()).to_wire(),
        );
        let return_id = next_return_id();
        envelope.set_attribute(codes::ATTR_RETURN_ID, Value::Int32(return_id).to_wire());
        (envelope, return_id)
    }

    fn address(&self) -> Result<Address, SendErrorKind> {
        let mut cached = lock(&self.address);
        if let Some(address) = cached.as_ref() {
            return Ok(address.clone());
        }
        let resolved = self.resolver.resolve(&self.target, self.config.launch)?;
        *cached = Some(resolved.clone());
        Ok(resolved)
    }

    fn invalidate_address(&self) {
        *lock(&self.address) = None;
    }

    fn should_relaunch(&self, opcode: Opcode, err: &TransportError) -> bool {
        if !self.config.unavailable_codes.contains(&err.code) {
            return false;
        }
        if !self.resolver.is_relaunchable(&self.target) {
            return false;
        }
        match self.config.relaunch {
            RelaunchMode::Never => false,
            RelaunchMode::Always => true,
            RelaunchMode::LaunchOpcodesOnly => {
                opcode == Opcode::LAUNCH_NOOP || opcode == Opcode::OPEN_APPLICATION
            }
        }
    }

    pub(crate) fn transaction_id(&self) -> i32 {
        *lock(&self.transaction_id)
    }

    pub(crate) fn set_transaction_id(&self, id: i32) {
        *lock(&self.transaction_id) = id;
    }
}

/// Lowers a direct parameter, hoisting reserved attribute-namespace
/// record keys to envelope attributes.
fn lower_hoisting_attributes(value: &Value, envelope: &mut Envelope) -> WireValue {
    match value {
        Value::Record(record) => {
            let mut rest = Record::with_tag(record.type_tag);
            for (key, field) in &record.fields {
                if codes::is_reserved_attribute(*key) {
                    envelope.set_attribute(*key, field.to_wire());
                } else {
                    rest.insert(*key, field.clone());
                }
            }
            Value::Record(rest).to_wire()
        }
        other => other.to_wire(),
    }
}

/// A nonzero correlation id seeded from a fresh UUID.
fn next_return_id() -> i32 {
    loop {
        let bytes = Uuid::new_v4().into_bytes();
        let id = i32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if id != 0 {
            return id;
        }
    }
}

fn describe_call(request: &Request) -> String {
    let direct = if request.direct.supplied().is_some() {
        "with direct parameter"
    } else {
        "no direct parameter"
    };
    format!(
        "{} keyword parameter(s), {}",
        request.params.len(),
        direct
    )
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
