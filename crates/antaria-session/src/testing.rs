//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use antaria_transport::{HttpResponse, Transport, TransportError};
use serde_json::Value;

/// One request the scripted transport received.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub path: String,
    pub body: Value,
}

impl Recorded {
    pub fn method(&self) -> &str {
        self.body["method"].as_str().unwrap_or_default()
    }

    pub fn params(&self) -> &[Value] {
        self.body["params"].as_array().map(Vec::as_slice).unwrap_or_default()
    }
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse, String>>,
    requests: Vec<Recorded>,
}

/// Replays queued replies in order and records every request.
///
/// Cloning shares the script, so a test can keep one handle for
/// assertions after moving the other into a session.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply with the given status and JSON body.
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
        self
    }

    /// Queues a reply with a raw (possibly non-JSON) body.
    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Ok(HttpResponse::new(status, body)));
        self
    }

    /// Queues a network failure.
    pub fn fail(&self, reason: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.script.lock().unwrap().requests.clone()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().replies.len()
    }
}

impl Transport for ScriptedTransport {
    async fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.requests.push(Recorded {
            path: path.to_string(),
            body: serde_json::from_slice(&body).unwrap_or(Value::Null),
        });
        match script.replies.pop_front() {
            Some(Ok(resp)) => Ok(resp),
            Some(Err(reason)) => Err(TransportError::RequestFailed(
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, reason),
            )),
            None => Err(TransportError::RequestFailed(std::io::Error::other(
                "no scripted reply left",
            ))),
        }
    }
}
