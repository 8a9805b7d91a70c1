//! A session shared between tasks.
//!
//! [`Session`] takes `&mut self` for every call, so it can't be used from
//! two tasks at once. [`SharedSession`] puts it behind a `tokio::sync::Mutex`
//! and hands out cheap clones; calls from different clones queue up and run
//! one at a time.

use std::sync::Arc;

use antaria_transport::Transport;
use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::{EntityId, Session, SessionError};

/// A cloneable handle to one [`Session`], serializing access to it.
pub struct SharedSession<T: Transport> {
    inner: Arc<Mutex<Session<T>>>,
}

impl<T: Transport> Clone for SharedSession<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport> SharedSession<T> {
    /// Wraps a session.
    pub fn new(session: Session<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Locks the session for a sequence of operations (e.g. several entity
    /// reads that should see the same cache).
    pub async fn lock(&self) -> MutexGuard<'_, Session<T>> {
        self.inner.lock().await
    }

    /// [`Session::call`], waiting for any call in flight to finish first.
    pub async fn call(
        &self,
        module: &str,
        method: &str,
        identifier: Option<&EntityId>,
        params: Vec<Value>,
    ) -> Result<Value, SessionError> {
        self.inner
            .lock()
            .await
            .call(module, method, identifier, params)
            .await
    }

    /// [`Session::login`].
    pub async fn login(&self) -> Result<bool, SessionError> {
        self.inner.lock().await.login().await
    }

    /// [`Session::logout`].
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.inner.lock().await.logout().await
    }

    /// [`Session::is_logged_in`].
    pub async fn is_logged_in(&self) -> bool {
        self.inner.lock().await.is_logged_in()
    }
}
