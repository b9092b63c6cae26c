//! Invocation outcomes
//!
//! Every tool invocation terminates in an [`Outcome`], the wire-visible
//! result the transport serializes back to the caller. Leaf handlers return
//! outcomes; validation, routing and handler failures are converted into
//! error outcomes at the tool boundary, so the caller always sees the same
//! two shapes: `{"success": true, "message": …, "data": …}` or
//! `{"success": false, "message": …}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminated result of one tool invocation
///
/// The `success` flag is the discriminant; `data` carries the payload of a
/// successful operation and is omitted from the wire form when null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Whether the invocation succeeded
    pub success: bool,

    /// Human-readable summary, preserved verbatim through every layer
    pub message: String,

    /// Operation payload; `Null` for errors and message-only successes
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Outcome {
    /// A successful outcome carrying a payload
    pub fn success(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: data.into(),
        }
    }

    /// A successful outcome with no payload
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self::success(message, Value::Null)
    }

    /// A failed outcome; the message is all the caller learns
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Value::Null,
        }
    }

    /// Whether this outcome reports success
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Whether this outcome reports failure
    pub fn is_error(&self) -> bool {
        !self.success
    }
}
