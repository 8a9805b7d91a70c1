//! Transport abstraction layer for Antaria.
//!
//! Provides the [`Transport`] trait: one POST of a JSON body to a module
//! path, answered by a raw [`HttpResponse`]. The transport never looks at
//! the content and never retries; that belongs to the session layer.
//!
//! # Feature Flags
//!
//! - `http` (default): HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::TransportError;
#[cfg(feature = "http")]
pub use http::HttpTransport;

/// A raw HTTP response: status code plus body bytes, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code (e.g. 200, 404).
    pub status: u16,
    /// The response body exactly as received.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from a status code and body.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns `true` for statuses of 400 and above.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// The body as text, with invalid UTF-8 replaced. For diagnostics.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a single request to a remote module endpoint.
///
/// `path` is the module path below the server base URL (`"empire"`,
/// `"/body"`, ...). Implementations issue exactly one network call per
/// invocation.
pub trait Transport: Send + Sync + 'static {
    /// POSTs `body` (a JSON document) to `path` and returns the raw
    /// response, whatever its status.
    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError>;
}
