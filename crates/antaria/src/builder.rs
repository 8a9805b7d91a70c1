//! Builder for a ready-to-use [`Session`].

use antaria_session::{Credentials, Session, SessionConfig};
use antaria_transport::HttpTransport;

use crate::AntariaError;

/// Entry point for building a session.
///
/// ```rust,no_run
/// # fn run() -> Result<(), antaria::AntariaError> {
/// let session = antaria::Antaria::builder()
///     .server("https://us1.lacunaexpanse.com")
///     .empire("Antaria", "secret")
///     .api_key("my-api-key")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct Antaria;

impl Antaria {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

/// Chained setters for a session's config and credentials.
#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    empire_name: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole config.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Base URL of the game server.
    pub fn server(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    /// Per-request timeout in seconds; `None` waits indefinitely.
    pub fn request_timeout_secs(mut self, secs: Option<u64>) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// Empire name and password to log in with.
    pub fn empire(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.empire_name = Some(name.into());
        self.password = Some(password.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets all three credentials at once.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        let (name, password, key) = credentials.into_parts();
        self.empire_name = Some(name);
        self.password = Some(password);
        self.api_key = Some(key);
        self
    }

    /// Builds the session. Nothing is sent until the first call.
    pub fn build(self) -> Result<Session<HttpTransport>, AntariaError> {
        let missing = |what: &str| AntariaError::Config(format!("{what} is required"));
        let name = self.empire_name.ok_or_else(|| missing("empire name"))?;
        let password = self.password.ok_or_else(|| missing("password"))?;
        let api_key = self.api_key.ok_or_else(|| missing("api key"))?;

        let session = Session::connect(&self.config, Credentials::new(name, password, api_key))?;
        tracing::debug!(server = %self.config.server_url, "session built");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_everything_set() {
        let session = Antaria::builder()
            .server("http://127.0.0.1:9")
            .request_timeout_secs(Some(5))
            .empire("Antaria", "secret")
            .api_key("key")
            .build()
            .unwrap();

        assert!(!session.is_logged_in());
        assert_eq!(session.credentials().empire_name(), "Antaria");
        assert_eq!(session.uri_for("body"), "http://127.0.0.1:9/body");
    }

    #[test]
    fn test_build_without_api_key_is_config_error() {
        let err = Antaria::builder()
            .empire("Antaria", "secret")
            .build()
            .unwrap_err();
        assert!(matches!(err, AntariaError::Config(ref m) if m.contains("api key")));
    }

    #[test]
    fn test_build_with_bad_url_is_transport_error() {
        let err = Antaria::builder()
            .server("ftp://example.com")
            .credentials(Credentials::new("a", "b", "c"))
            .build()
            .unwrap_err();
        assert!(matches!(err, AntariaError::Session(_) | AntariaError::Transport(_)));
    }

    #[test]
    fn test_config_replaces_defaults() {
        let builder = SessionBuilder::new().config(SessionConfig {
            server_url: "http://localhost:1".into(),
            request_timeout_secs: None,
        });
        assert_eq!(builder.config.server_url, "http://localhost:1");
        assert_eq!(builder.config.request_timeout_secs, None);
    }
}
