//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding envelopes.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: a success status with an HTML or truncated body.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}

/// A structured failure reported by the game server.
///
/// Produced from a `{"error": {"code", "message"}, "id"}` envelope. The
/// code is opaque to the client, except for
/// [`SESSION_EXPIRED`](crate::SESSION_EXPIRED) which the session layer
/// recovers from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("api error {code}: {message}")]
pub struct ApiError {
    /// Numeric error code assigned by the server.
    pub code: i64,
    /// Human-readable message from the server (may be empty).
    pub message: String,
    /// The id of the call that failed, as echoed by the server.
    pub call_id: Option<String>,
}

impl ApiError {
    /// Returns `true` if the server says the session token is no longer
    /// valid.
    pub fn is_session_expired(&self) -> bool {
        self.code == crate::SESSION_EXPIRED
    }
}
