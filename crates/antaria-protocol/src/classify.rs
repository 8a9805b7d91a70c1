//! Turning a raw HTTP reply into a payload or a typed failure.
//!
//! The rules:
//!
//! | status | body                              | outcome                  |
//! |--------|-----------------------------------|--------------------------|
//! | 2xx    | empty                             | `Ok(Value::Null)`        |
//! | 2xx    | `{"result": ...}`                 | `Ok(result)`             |
//! | 2xx    | `{"error": {...}}`                | `Err(Api)`               |
//! | 2xx    | not JSON                          | `Err(Protocol)`          |
//! | ≥ 400  | `{"error": {"code", "message"}}`  | `Err(Api)`               |
//! | ≥ 400  | anything else                     | `Err(Http)`              |
//! | other  | anything                          | `Err(Http)`              |

use serde_json::Value;

use crate::{ApiError, Codec, ProtocolError, RpcResponse};

/// Why an RPC call did not produce a result payload.
#[derive(Debug, thiserror::Error)]
pub enum RpcFailure {
    /// The server answered with a structured error.
    #[error(transparent)]
    Api(ApiError),

    /// The server answered with a status the client can't interpret and a
    /// body that isn't a structured error.
    #[error("http status {status}: {body}")]
    Http { status: u16, body: String },

    /// A success status carried a body that isn't a JSON-RPC envelope.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Decodes a complete reply: the payload on success, or a classified
/// failure.
pub fn decode_reply<C: Codec>(
    codec: &C,
    status: u16,
    body: &[u8],
) -> Result<Value, RpcFailure> {
    if (200..300).contains(&status) {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        let response: RpcResponse = codec.decode(body)?;
        return response.into_result().map_err(RpcFailure::Api);
    }
    Err(classify_failure(codec, status, body))
}

/// Classifies a non-success reply.
///
/// Tries to read the body as a structured API error first; anything that
/// doesn't parse as one becomes [`RpcFailure::Http`] with the raw body kept
/// for diagnostics.
pub fn classify_failure<C: Codec>(
    codec: &C,
    status: u16,
    body: &[u8],
) -> RpcFailure {
    let text = || String::from_utf8_lossy(body).into_owned();

    if status < 400 {
        return RpcFailure::Http {
            status,
            body: text(),
        };
    }

    match codec.decode::<RpcResponse>(body) {
        Ok(response) if response.error.is_some() => match response.into_result() {
            Err(api) => {
                tracing::debug!(status, code = api.code, "classified api error");
                RpcFailure::Api(api)
            }
            Ok(_) => RpcFailure::Http {
                status,
                body: text(),
            },
        },
        _ => {
            tracing::debug!(status, "unstructured http error");
            RpcFailure::Http {
                status,
                body: text(),
            }
        }
    }
}
