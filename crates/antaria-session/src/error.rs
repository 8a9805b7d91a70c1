//! Error types for the session layer.

use antaria_protocol::{ApiError, ProtocolError, RpcFailure};
use antaria_transport::TransportError;

/// Errors surfaced by [`Session`](crate::Session) operations.
///
/// A session-expired [`ApiError`] is recovered once per call and only
/// reaches the caller if it happens again on the retry.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No HTTP response was obtained (connect failure, timeout, ...).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request couldn't be encoded, or a success reply couldn't be
    /// decoded.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server replied with an error status and a body that isn't a
    /// structured API error.
    #[error("http status {status}: {body}")]
    Http { status: u16, body: String },

    /// The server replied with a structured API error.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Login succeeded at the HTTP level but the reply carried no session
    /// token.
    #[error("login for empire {0:?} returned no session token")]
    NoSessionToken(String),
}

impl SessionError {
    /// Returns the API error code, if this is an API error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api(api) => Some(api.code),
            _ => None,
        }
    }

    /// Returns `true` if the server reported an expired session.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Api(api) if api.is_session_expired())
    }
}

impl From<RpcFailure> for SessionError {
    fn from(failure: RpcFailure) -> Self {
        match failure {
            RpcFailure::Api(api) => Self::Api(api),
            RpcFailure::Http { status, body } => Self::Http { status, body },
            RpcFailure::Protocol(e) => Self::Protocol(e),
        }
    }
}
