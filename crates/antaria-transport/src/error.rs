use std::io;

/// Errors that can occur in the transport layer.
///
/// These cover failures where no HTTP response was obtained at all. A
/// response with a 4xx/5xx status is NOT a transport error: the transport
/// hands it back untouched and the layers above classify it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The server base URL could not be parsed.
    #[error("invalid server url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The HTTP client failed to build, send, or read.
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    /// Sending the request failed. For transports other than HTTP.
    #[error("request failed: {0}")]
    RequestFailed(#[source] io::Error),

    /// Reading the response failed. For transports other than HTTP.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] io::Error),
}

impl TransportError {
    /// Returns `true` if the request gave up waiting for the server.
    pub fn is_timeout(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(e) => e.is_timeout(),
            Self::RequestFailed(e) | Self::ReceiveFailed(e) => {
                e.kind() == io::ErrorKind::TimedOut
            }
            Self::InvalidUrl { .. } => false,
        }
    }

    /// Returns `true` if no connection to the server could be made.
    pub fn is_connect(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            Self::Http(e) => e.is_connect(),
            Self::RequestFailed(e) => matches!(
                e.kind(),
                io::ErrorKind::ConnectionRefused | io::ErrorKind::NotConnected
            ),
            Self::ReceiveFailed(_) | Self::InvalidUrl { .. } => false,
        }
    }
}
