//! # Message Protocol
//!
//! Defines the JSON records exchanged between gateway clients and the gateway:
//! - [`Request`]: a successfully decoded inbound message
//! - [`Reply`]: the single response produced for every inbound message
//! - [`DispatchError`]: the two protocol-level failures a client can observe
//!
//! Each WebSocket frame carries exactly one JSON record.
//!
//! ```text
//! client -> gateway   {"type":"chat","text":"hello"}
//! gateway -> client   {"ok":true,"echo":"hello"}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Value of the `type` field that selects the chat echo behavior.
pub const CHAT_KIND: &str = "chat";

/// Deepest array/object nesting a frame may use, counting the top-level object.
/// This is serde_json's recursion limit; deeper documents are rejected as
/// "bad json" before they can exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 127;

/// Protocol-level failures. Both are reported to the peer as a [`Reply`]
/// and never propagate as faults.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// The frame is not a JSON object.
    #[error("bad json")]
    Decode,

    /// The frame is a JSON object but its `type` is missing or not recognized.
    #[error("unknown type")]
    UnrecognizedKind,
}

/// A decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// **Chat**
    ///
    /// `text` is carried opaquely. `None` means the field was absent,
    /// `Some(Value::Null)` means it was an explicit `null`.
    Chat { text: Option<Value> },
}

impl Request {
    /// Decode a raw frame into a request.
    ///
    /// Invalid UTF-8 sequences are replaced before parsing, so binary frames
    /// holding JSON text decode the same way text frames do. Numbers keep
    /// their exact source text. Nesting is capped at [`MAX_NESTING_DEPTH`].
    ///
    /// # Returns
    /// - `Ok(Request)`: the frame is an object with a recognized `type`
    /// - `Err(DispatchError::Decode)`: syntax error or non-object top-level value
    /// - `Err(DispatchError::UnrecognizedKind)`: missing, non-string, or unknown `type`
    pub fn decode(raw: &[u8]) -> Result<Self, DispatchError> {
        let text = String::from_utf8_lossy(raw);
        let value: Value = serde_json::from_str(&text).map_err(|_| DispatchError::Decode)?;

        let Value::Object(mut fields) = value else {
            return Err(DispatchError::Decode);
        };

        match fields.get("type").and_then(Value::as_str) {
            Some(CHAT_KIND) => Ok(Request::Chat {
                text: fields.remove("text"),
            }),
            _ => Err(DispatchError::UnrecognizedKind),
        }
    }
}

/// Response record sent back on the originating connection.
///
/// Serializes as `{"ok":true,"echo":..}` or `{"ok":false,"error":".."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Reply {
    /// Successful chat reply. An absent `text` leaves out the `echo` key.
    pub fn echo(text: Option<Value>) -> Self {
        Self {
            ok: true,
            echo: text,
            error: None,
        }
    }

    pub fn failure(error: DispatchError) -> Self {
        Self {
            ok: false,
            echo: None,
            error: Some(error.to_string()),
        }
    }

    /// Serialize the reply to JSON text for transmission.
    pub fn to_text(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a reply received from the gateway.
    pub fn from_text(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<Result<Request, DispatchError>> for Reply {
    fn from(decoded: Result<Request, DispatchError>) -> Self {
        match decoded {
            Ok(Request::Chat { text }) => Reply::echo(text),
            Err(e) => Reply::failure(e),
        }
    }
}
