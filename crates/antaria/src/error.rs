//! Unified error type for the Antaria client.

use antaria_protocol::ProtocolError;
use antaria_session::SessionError;
use antaria_transport::TransportError;
use serde_json::Value;

/// Top-level error that wraps all crate-specific errors.
///
/// `#[from]` on each wrapped variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum AntariaError {
    /// A transport-level error (connect, send, receive).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (login, API error, HTTP error).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The client was set up without something it needs.
    #[error("configuration error: {0}")]
    Config(String),

    /// An entity's status lacks a field the wrapper needs.
    #[error("{module} status has no field {field:?}")]
    MissingField { module: String, field: String },

    /// A status field has a shape the wrapper can't read.
    #[error("{module} field {field:?} has unexpected value {value}")]
    InvalidField {
        module: String,
        field: String,
        value: Value,
    },
}

impl AntariaError {
    /// The API error code, if the server reported one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Session(e) => e.api_code(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::InvalidUrl {
            url: "x".into(),
            reason: "gone".into(),
        };
        let antaria_err: AntariaError = err.into();
        assert!(matches!(antaria_err, AntariaError::Transport(_)));
        assert!(antaria_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_session_error_keeps_api_code() {
        let err = SessionError::Api(antaria_protocol::ApiError {
            code: 1002,
            message: "nope".into(),
            call_id: None,
        });
        let antaria_err: AntariaError = err.into();
        assert!(matches!(antaria_err, AntariaError::Session(_)));
        assert_eq!(antaria_err.api_code(), Some(1002));
    }

    #[test]
    fn test_missing_field_message() {
        let err = AntariaError::MissingField {
            module: "body".into(),
            field: "orbit".into(),
        };
        assert_eq!(err.to_string(), "body status has no field \"orbit\"");
        assert_eq!(err.api_code(), None);
    }
}
