//! # Tool Envelopes
//!
//! Every tool call answers with one JSON object, success or failure:
//!
//! ```json
//! { "ok": true, "operation": "get_event", "request_id": "…", "latency_ms": 41, "data": { … } }
//! { "ok": false, "operation": "get_event", "request_id": "…", "latency_ms": 3,
//!   "error": { "code": "marketplace.not_found", "message": "…", "retryable": false } }
//! ```

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::ToolError;

/// Request identifier (UUID v4) carried by every envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new_v4()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}

impl From<&ToolError> for ErrorBody {
    fn from(error: &ToolError) -> Self {
        Self {
            code: error.code().to_owned(),
            message: error.to_string(),
            retryable: error.retryable(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolEnvelope {
    pub ok: bool,
    pub operation: String,
    pub request_id: RequestId,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ToolEnvelope {
    pub fn success(operation: impl Into<String>, data: Value) -> Self {
        Self {
            ok: true,
            operation: operation.into(),
            request_id: RequestId::new_v4(),
            latency_ms: 0,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(operation: impl Into<String>, error: &ToolError) -> Self {
        Self {
            ok: false,
            operation: operation.into(),
            request_id: RequestId::new_v4(),
            latency_ms: 0,
            data: None,
            error: Some(ErrorBody::from(error)),
        }
    }

    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|error| error.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use ticketscout_core::MarketplaceError;

    #[test]
    fn success_envelope_omits_error() {
        let envelope = ToolEnvelope::success("get_event", json!({ "id": 1 })).with_latency_ms(12);
        let value = serde_json::to_value(&envelope).expect("serializes");

        assert_eq!(value["ok"], json!(true));
        assert_eq!(value["latency_ms"], json!(12));
        assert!(value.get("error").is_none());
        assert_eq!(value["request_id"].as_str().map(str::len), Some(36));
    }

    #[test]
    fn failure_envelope_carries_code_and_retryable() {
        let error = ToolError::from(MarketplaceError::Auth { status: 401 });
        let envelope = ToolEnvelope::failure("list_events", &error);
        let value = serde_json::to_value(&envelope).expect("serializes");

        assert_eq!(value["ok"], json!(false));
        assert_eq!(value["error"]["code"], json!("marketplace.auth"));
        assert_eq!(value["error"]["retryable"], json!(false));
        assert!(value.get("data").is_none());
    }
}
