//! Request and reply envelopes.

use serde::{Deserialize, Serialize};
use std::fmt;
use wire_types::{codes, FourCc, WireValue};

/// An event opcode: verb class plus verb id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Opcode {
    pub class: FourCc,
    pub id: FourCc,
}

impl Opcode {
    pub const fn new(class: FourCc, id: FourCc) -> Self {
        Self { class, id }
    }

    /// Fetch a value from the target.
    pub const GET_DATA: Opcode = Opcode::new(codes::CLASS_CORE, codes::ID_GET_DATA);
    /// Create a new element; carries the insertion location.
    pub const CREATE_ELEMENT: Opcode = Opcode::new(codes::CLASS_CORE, codes::ID_CREATE_ELEMENT);
    /// Reserved no-op sent after launching a target.
    pub const LAUNCH_NOOP: Opcode = Opcode::new(codes::CLASS_SCRIPT, codes::ID_LAUNCH_NOOP);
    /// Asks the target to open as an application.
    pub const OPEN_APPLICATION: Opcode =
        Opcode::new(codes::CLASS_APPLICATION, codes::ID_OPEN_APPLICATION);
    pub const BEGIN_TRANSACTION: Opcode =
        Opcode::new(codes::CLASS_MISC, codes::ID_BEGIN_TRANSACTION);
    pub const END_TRANSACTION: Opcode = Opcode::new(codes::CLASS_MISC, codes::ID_END_TRANSACTION);
    pub const ABORT_TRANSACTION: Opcode =
        Opcode::new(codes::CLASS_MISC, codes::ID_ABORT_TRANSACTION);
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.class, self.id)
    }
}

/// One outbound request: opcode, target address, keyed parameters, and
/// the attribute side-channel. Built fresh per send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub opcode: Opcode,
    pub address: WireValue,
    pub params: Vec<(FourCc, WireValue)>,
    pub attributes: Vec<(FourCc, WireValue)>,
}

impl Envelope {
    pub fn new(opcode: Opcode, address: WireValue) -> Self {
        Self {
            opcode,
            address,
            params: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Sets a parameter, replacing any previous value for the key.
    pub fn set_param(&mut self, key: FourCc, value: WireValue) {
        match self.params.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((key, value)),
        }
    }

    pub fn param(&self, key: FourCc) -> Option<&WireValue> {
        self.params
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// Sets an attribute, replacing any previous value for the key.
    pub fn set_attribute(&mut self, key: FourCc, value: WireValue) {
        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| *existing == key)
        {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attribute(&self, key: FourCc) -> Option<&WireValue> {
        self.attributes
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }
}

/// One inbound reply: keyed parameters plus echoed attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub params: Vec<(FourCc, WireValue)>,
    pub attributes: Vec<(FourCc, WireValue)>,
}

impl Reply {
    pub fn param(&self, key: FourCc) -> Option<&WireValue> {
        self.params
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, value)| value)
    }

    /// Appends a parameter; test fixtures build replies this way.
    pub fn with_param(mut self, key: FourCc, value: WireValue) -> Self {
        self.params.push((key, value));
        self
    }

    /// The application error number; zero when absent or unreadable.
    pub fn error_number(&self) -> i32 {
        self.param(codes::KEY_ERROR_NUMBER)
            .and_then(|value| value.read_i32().ok())
            .unwrap_or(0)
    }
}
