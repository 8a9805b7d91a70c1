//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header;

use crate::{HttpResponse, Transport, TransportError};

/// An HTTP-based [`Transport`] bound to one game server.
///
/// Every module lives at `{base_url}/{module}`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport for the given server base URL with no request
    /// timeout.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, None)
    }

    /// Creates a transport whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, TransportError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| {
            TransportError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(TransportError::Http)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The server base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the full URL for a module path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Transport for HttpTransport {
    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(path);
        tracing::trace!(%url, bytes = body.len(), "POST");

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(TransportError::Http)?;

        tracing::trace!(%url, status, bytes = body.len(), "response");
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
