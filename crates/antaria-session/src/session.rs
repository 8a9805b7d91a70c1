//! The session: one authenticated connection to a game server.
//!
//! A [`Session`] owns the session token, the request-id counter, and the
//! [`StatusCache`]. Every remote operation goes through [`Session::call`].
//!
//! # Lifecycle
//!
//! ```text
//!   Anonymous ──(login ok)──→ Authenticated
//!       ↑                          │
//!       └────────(logout)──────────┘
//! ```
//!
//! `call` logs in lazily, so a fresh session can be used right away. When
//! the server reports an expired session (code 1006) the call logs in
//! again and is retried exactly once.

use std::fmt;
use std::time::Duration;

use antaria_protocol::{decode_reply, CallId, Codec, JsonCodec, RpcRequest};
use antaria_transport::{HttpTransport, Transport};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Credentials, EntityId, SessionError, StatusCache};

/// The module that handles login and logout.
pub const LOGIN_MODULE: &str = "empire";

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Connection settings for a [`Session`] over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Base URL of the game server. Modules live at `{server_url}/{module}`.
    ///
    /// Default: `https://us1.lacunaexpanse.com`.
    pub server_url: String,

    /// Per-request timeout in seconds. `None` waits indefinitely.
    ///
    /// Default: `None`.
    pub request_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: "https://us1.lacunaexpanse.com".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl SessionConfig {
    /// The request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Whether the session currently holds a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No token. The next `call` logs in first.
    Anonymous,

    /// Logged in; `token` is prepended to every call's params.
    Authenticated { token: String },
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One logical connection to the game server.
///
/// All operations take `&mut self`: a session has at most one call in
/// flight. To share a session between tasks, wrap it in a
/// [`SharedSession`](crate::SharedSession).
pub struct Session<T: Transport> {
    transport: T,
    codec: JsonCodec,
    credentials: Credentials,
    state: SessionState,
    /// Sequence number of the next request; part of every call id.
    next_seq: u64,
    status: StatusCache,
    last_result: Option<Value>,
}

impl<T: Transport> fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("logged_in", &self.is_logged_in())
            .field("credentials", &self.credentials)
            .field("requests_sent", &self.next_seq)
            .field("status_modules", &self.status.len())
            .finish_non_exhaustive()
    }
}

impl Session<HttpTransport> {
    /// Creates an anonymous session talking HTTP to `config.server_url`.
    ///
    /// No network traffic happens until the first call.
    pub fn connect(
        config: &SessionConfig,
        credentials: Credentials,
    ) -> Result<Self, SessionError> {
        let transport = HttpTransport::with_timeout(
            &config.server_url,
            config.request_timeout(),
        )?;
        Ok(Self::new(transport, credentials))
    }

    /// The full URL a module is called at.
    pub fn uri_for(&self, module: &str) -> String {
        self.transport.url_for(module)
    }
}

impl<T: Transport> Session<T> {
    /// Creates an anonymous session over the given transport.
    pub fn new(transport: T, credentials: Credentials) -> Self {
        Self {
            transport,
            codec: JsonCodec,
            credentials,
            state: SessionState::Anonymous,
            next_seq: 0,
            status: StatusCache::new(),
            last_result: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Current lifecycle state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns `true` once a login has produced a token.
    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::Authenticated { .. })
    }

    /// The current session token, if logged in.
    pub fn session_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token } => Some(token),
            SessionState::Anonymous => None,
        }
    }

    /// The credentials this session logs in with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Everything the server has told this session about module status.
    pub fn status(&self) -> &StatusCache {
        &self.status
    }

    /// The result payload of the last successful request.
    pub fn last_result(&self) -> Option<&Value> {
        self.last_result.as_ref()
    }

    /// Number of requests sent so far (including logins and retries).
    pub fn requests_sent(&self) -> u64 {
        self.next_seq
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -- Lifecycle ----------------------------------------------------------

    /// Logs in with the session's credentials.
    ///
    /// Any previous token is dropped first. Returns whether the server
    /// handed out a new one.
    ///
    /// # Errors
    /// Whatever the login request fails with. A session-expired error here
    /// is NOT retried.
    pub async fn login(&mut self) -> Result<bool, SessionError> {
        self.state = SessionState::Anonymous;
        let params = self.credentials.login_params();
        self.dispatch(LOGIN_MODULE, "login", params).await?;

        let empire = self.credentials.empire_name();
        if self.is_logged_in() {
            tracing::info!(empire, "logged in");
            Ok(true)
        } else {
            tracing::warn!(empire, "login reply carried no session token");
            Ok(false)
        }
    }

    /// Logs out.
    ///
    /// The token is cleared whatever the logout request returns; the
    /// request's own failure, if any, is still reported. Logging out an
    /// anonymous session sends nothing.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        let SessionState::Authenticated { token } = &self.state else {
            return Ok(());
        };
        let params = vec![Value::String(token.clone())];

        let outcome = self.dispatch(LOGIN_MODULE, "logout", params).await;
        self.state = SessionState::Anonymous;

        match outcome {
            Ok(_) => {
                tracing::info!(empire = self.credentials.empire_name(), "logged out");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout request failed, token dropped anyway");
                Err(e)
            }
        }
    }

    /// Calls `method` on `module`.
    ///
    /// The params actually sent are `[token, identifier?, params...]`.
    /// Logs in first if needed. If the server says the session expired,
    /// logs in again and retries once; a second expiry is returned as an
    /// error.
    ///
    /// Returns the call's `result` payload. Any `session_id` or `status`
    /// it carries has already been absorbed into the session.
    pub async fn call(
        &mut self,
        module: &str,
        method: &str,
        identifier: Option<&EntityId>,
        params: Vec<Value>,
    ) -> Result<Value, SessionError> {
        let mut retried = false;

        loop {
            if !self.is_logged_in() {
                self.ensure_login().await?;
            }

            let mut full = Vec::with_capacity(params.len() + 2);
            if let Some(token) = self.session_token() {
                full.push(Value::String(token.to_string()));
            }
            if let Some(id) = identifier {
                full.push(id.to_param());
            }
            full.extend(params.iter().cloned());

            match self.dispatch(module, method, full).await {
                Err(e) if e.is_session_expired() && !retried => {
                    tracing::warn!(module, method, "session expired, logging in again");
                    retried = true;
                    self.state = SessionState::Anonymous;
                }
                outcome => return outcome,
            }
        }
    }

    async fn ensure_login(&mut self) -> Result<(), SessionError> {
        if self.login().await? {
            Ok(())
        } else {
            Err(SessionError::NoSessionToken(
                self.credentials.empire_name().to_string(),
            ))
        }
    }

    /// Sends one request with exactly `params` and absorbs the reply.
    async fn dispatch(
        &mut self,
        module: &str,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, SessionError> {
        let id = CallId::new(module, method, self.next_seq);
        self.next_seq += 1;

        let request = RpcRequest::new(id.clone(), method, params);
        let body = self.codec.encode(&request)?;

        tracing::debug!(call_id = %id, module, method, "sending request");
        let response = self.transport.post(module, body).await?;

        let result = decode_reply(&self.codec, response.status, &response.body)
            .map_err(|failure| {
                tracing::debug!(
                    call_id = %id,
                    status = response.status,
                    error = %failure,
                    "request failed"
                );
                SessionError::from(failure)
            })?;

        self.absorb(&result);
        self.last_result = Some(result.clone());
        Ok(result)
    }

    /// Picks up a new token and status fragments from a result payload.
    /// Scalar payloads carry neither.
    fn absorb(&mut self, result: &Value) {
        let Some(payload) = result.as_object() else {
            return;
        };

        if let Some(token) = payload.get("session_id").and_then(Value::as_str) {
            if self.session_token() != Some(token) {
                tracing::debug!("session token updated");
                self.state = SessionState::Authenticated {
                    token: token.to_string(),
                };
            }
        }

        if let Some(snapshot) = payload.get("status").and_then(Value::as_object) {
            self.status.merge(snapshot);
        }
    }
}
