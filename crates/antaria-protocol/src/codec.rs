//! Codec trait and the JSON implementation.
//!
//! The session layer encodes requests and decodes replies through the
//! [`Codec`] trait rather than calling `serde_json` directly, so the byte
//! format lives in exactly one place.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes Rust types to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` so a codec can live inside a session that is
/// moved between Tokio tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`), the only format the game
/// server speaks.
///
/// ## Example
///
/// ```rust
/// use antaria_protocol::{CallId, Codec, JsonCodec, RpcRequest};
/// use serde_json::json;
///
/// let codec = JsonCodec;
/// let request = RpcRequest::new(
///     CallId::new("empire", "get_status", 0),
///     "get_status",
///     vec![json!("session-token")],
/// );
///
/// let bytes = codec.encode(&request).unwrap();
/// let decoded: RpcRequest = codec.decode(&bytes).unwrap();
/// assert_eq!(request, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RpcResponse;

    #[test]
    fn test_json_codec_decode_garbage_returns_decode_error() {
        let result: Result<RpcResponse, _> = JsonCodec.decode(b"<html>");
        assert!(matches!(result, Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn test_json_codec_encode_produces_compact_json() {
        let bytes = JsonCodec.encode(&serde_json::json!({"a": [1, 2]})).unwrap();
        assert_eq!(bytes, br#"{"a":[1,2]}"#);
    }
}
