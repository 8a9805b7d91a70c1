//! JSON-RPC 2.0 envelope types.
//!
//! Every request the client sends is an [`RpcRequest`]; every reply the
//! server sends decodes into an [`RpcResponse`]. Params and results are
//! opaque `serde_json::Value`s: the shape of each call's payload belongs
//! to the module being called, not to the protocol.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::ApiError;

/// The JSON-RPC version string carried by every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// Error code the server uses when a session token has expired.
pub const SESSION_EXPIRED: i64 = 1006;

// ---------------------------------------------------------------------------
// CallId
// ---------------------------------------------------------------------------

/// Identifier of a single RPC call.
///
/// Built as `{module}-{method}-{seq}` from a per-session counter, so ids
/// are unique within a session and readable in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallId(pub String);

impl CallId {
    /// Creates the id for call number `seq` of `method` on `module`.
    pub fn new(module: &str, method: &str, seq: u64) -> Self {
        Self(format!("{}-{method}-{seq}", module.trim_start_matches('/')))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// RpcRequest
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
///
/// ```text
/// {"jsonrpc":"2.0","id":"empire-login-0","method":"login","params":[...]}
/// ```
///
/// `params` is the complete positional list as sent; any session token has
/// already been prepended by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: CallId,
    pub method: String,
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Creates a request with the standard `jsonrpc` version.
    pub fn new(id: CallId, method: &str, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }
}

// ---------------------------------------------------------------------------
// RpcResponse
// ---------------------------------------------------------------------------

/// The `error` member of a failed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Numeric error code. Some servers send it as a numeric string, so
    /// both `1006` and `"1006"` are accepted.
    #[serde(deserialize_with = "deserialize_code")]
    pub code: i64,

    #[serde(default)]
    pub message: String,

    /// Extra detail some errors carry (e.g. which resource was short).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// A JSON-RPC 2.0 response: exactly one of `result` or `error` is
/// expected, but every field is optional so that sloppy replies (`{}`,
/// `{"result": null}`) still decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub id: Option<Value>,

    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub error: Option<ErrorObject>,
}

impl RpcResponse {
    /// Returns the echoed call id as a string, if the server sent one.
    ///
    /// Numeric ids are rendered in decimal.
    pub fn call_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Converts the envelope into its payload or its API error.
    ///
    /// A response with neither member yields `Value::Null`.
    pub fn into_result(self) -> Result<Value, ApiError> {
        let call_id = self.call_id();
        match self.error {
            Some(err) => Err(ApiError {
                code: err.code,
                message: err.message,
                call_id,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

fn deserialize_code<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(i64),
        Text(String),
    }

    match Code::deserialize(deserializer)? {
        Code::Number(n) => Ok(n),
        Code::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
