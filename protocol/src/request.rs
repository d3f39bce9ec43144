//! Request description, built with consuming `with_*` methods.

use crate::config::Considerations;
use crate::envelope::Opcode;
use crate::transport::WaitMode;
use serde::{Deserialize, Serialize};
use wire_types::{FourCc, Query, Value};

/// A keyword parameter slot. `NotSupplied` slots are skipped when the
/// envelope is built, so optional parameters can be threaded through
/// call sites without conditionals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Supplied(Value),
    NotSupplied,
}

impl ParamValue {
    pub fn supplied(&self) -> Option<&Value> {
        match self {
            ParamValue::Supplied(value) => Some(value),
            ParamValue::NotSupplied => None,
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Supplied(value)
    }
}

/// One call to the target: opcode, target query, parameters, and the
/// send knobs. The session turns this into an envelope per the subject
/// precedence rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub opcode: Opcode,
    /// The object the call operates on. Defaults to the application
    /// root.
    pub target: Query,
    pub direct: ParamValue,
    pub params: Vec<(FourCc, ParamValue)>,
    /// Result-type hint sent as the requested-type parameter.
    pub requested_type: Option<FourCc>,
    pub wait_mode: WaitMode,
    /// Overrides the configured default when set.
    pub timeout_ticks: Option<i64>,
    /// Overrides the configured considerations when set.
    pub considerations: Option<Considerations>,
}

impl Request {
    pub fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            target: Query::app_root(),
            direct: ParamValue::NotSupplied,
            params: Vec::new(),
            requested_type: None,
            wait_mode: WaitMode::WaitForReply,
            timeout_ticks: None,
            considerations: None,
        }
    }

    pub fn with_target(mut self, target: Query) -> Self {
        self.target = target;
        self
    }

    pub fn with_direct(mut self, value: Value) -> Self {
        self.direct = ParamValue::Supplied(value);
        self
    }

    pub fn with_param(mut self, key: FourCc, value: impl Into<ParamValue>) -> Self {
        self.params.push((key, value.into()));
        self
    }

    pub fn with_requested_type(mut self, type_tag: FourCc) -> Self {
        self.requested_type = Some(type_tag);
        self
    }

    pub fn with_wait_mode(mut self, mode: WaitMode) -> Self {
        self.wait_mode = mode;
        self
    }

    pub fn with_timeout_ticks(mut self, ticks: i64) -> Self {
        self.timeout_ticks = Some(ticks);
        self
    }

    pub fn with_considerations(mut self, considerations: Considerations) -> Self {
        self.considerations = Some(considerations);
        self
    }

    /// Looks up a keyword parameter that was actually supplied.
    pub fn supplied_param(&self, key: FourCc) -> Option<&Value> {
        self.params
            .iter()
            .find(|(existing, _)| *existing == key)
            .and_then(|(_, value)| value.supplied())
    }
}
