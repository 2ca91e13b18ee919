//! The normalized error raised for every non-success API response.

use serde_json::Value;

/// Error returned for any PayU response outside the success range, whatever
/// shape the gateway's error body took.
///
/// Transport-level failures (connect timeout after retry exhaustion and the
/// like) are a distinct kind and never wrapped in this type.
#[derive(Debug)]
pub struct PayuError {
    message: String,
    raw_error: Option<Value>,
}

impl PayuError {
    pub(crate) fn new(message: impl Into<String>, raw_error: Option<Value>) -> Self {
        Self {
            message: message.into(),
            raw_error,
        }
    }

    /// The raw parsed error body, when the gateway returned parseable JSON.
    pub fn raw_error(&self) -> Option<&Value> {
        self.raw_error.as_ref()
    }
}

impl std::fmt::Display for PayuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PayuError {}
