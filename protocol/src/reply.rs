//! Reply classification and error diagnostics.

use crate::envelope::Reply;
use std::fmt;
use wire_types::{codes, Value};

/// An application-level failure extracted from a reply's well-known
/// diagnostic parameters. Everything but the number is best-effort.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub number: i32,
    pub message: Option<String>,
    pub expected_type: Option<wire_types::FourCc>,
    pub offending_object: Option<Value>,
    pub partial_result: Option<Value>,
}

impl ErrorInfo {
    /// Extracts diagnostics from a failed reply. Message priority:
    /// caller-supplied override, the reply's error string, the reply's
    /// brief message, then the static description table.
    pub fn from_reply(number: i32, reply: &Reply, override_message: Option<String>) -> Self {
        let message = override_message
            .or_else(|| read_text(reply, codes::KEY_ERROR_STRING))
            .or_else(|| read_text(reply, codes::KEY_BRIEF_MESSAGE))
            .or_else(|| describe_code(number).map(str::to_string));
        Self {
            number,
            message,
            expected_type: reply
                .param(codes::KEY_EXPECTED_TYPE)
                .and_then(|wire| wire.read_code().ok()),
            offending_object: lift_param(reply, codes::KEY_OFFENDING_OBJECT),
            partial_result: lift_param(reply, codes::KEY_PARTIAL_RESULT),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "error {}: {}", self.number, message),
            None => write!(f, "error {}", self.number),
        }
    }
}

fn read_text(reply: &Reply, key: wire_types::FourCc) -> Option<String> {
    let wire = reply.param(key)?;
    match Value::from_wire(wire).ok()? {
        Value::Text(text) => Some(text),
        _ => None,
    }
}

fn lift_param(reply: &Reply, key: wire_types::FourCc) -> Option<Value> {
    reply.param(key).and_then(|wire| Value::from_wire(wire).ok())
}

/// Classifies a reply: an application error, a decoded result value,
/// or nothing (the caller maps nothing to the missing-value sentinel).
pub(crate) fn classify(reply: &Reply) -> Result<Option<Value>, Box<ErrorInfo>> {
    let number = reply.error_number();
    if number != 0 {
        return Err(Box::new(ErrorInfo::from_reply(number, reply, None)));
    }
    match reply.param(codes::KEY_DIRECT_OBJECT) {
        Some(wire) => match Value::from_wire(wire) {
            Ok(value) => Ok(Some(value)),
            // A result that does not lift cleanly is still a result;
            // hand it to the caller verbatim.
            Err(_) => Ok(Some(Value::Opaque(wire.clone()))),
        },
        None => Ok(None),
    }
}

/// Transport code for "the event was not handled by the target".
pub const CODE_NOT_HANDLED: i32 = -1708;

/// Well-known error numbers, used as the last-resort message source.
pub fn describe_code(number: i32) -> Option<&'static str> {
    let description = match number {
        -50 => "a parameter is invalid",
        -600 => "the target application is not running",
        -609 => "the connection is invalid",
        -1700 => "a value could not be coerced to the requested type",
        -1701 => "a required parameter is missing",
        -1703 => "some value is the wrong type",
        CODE_NOT_HANDLED => "the message was not handled",
        -1712 => "the request timed out",
        -1728 => "the object is not found",
        -10000 => "the handler reported an internal error",
        _ => return None,
    };
    Some(description)
}
