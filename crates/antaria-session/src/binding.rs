//! Module binding: how entities resolve fields.
//!
//! Every entity (empire, body, building) is bound to one remote module and,
//! optionally, one entity id within it. That binding is a
//! [`ModuleHandle`]. Reading a field is a two-step affair:
//!
//! 1. look in the [`StatusCache`]: trusted only if the cached fragment's
//!    `id` matches the handle's id;
//! 2. otherwise call an explicit [`ModuleMethod`] on the module and use
//!    its result.
//!
//! All a handle needs from its environment is the [`ModuleCaller`]
//! capability: "has a status cache, can issue a module call". [`Session`]
//! is the real implementation; tests use fakes.

use antaria_transport::Transport;
use serde_json::Value;

use crate::{EntityId, Fragment, Session, SessionError, StatusCache};

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

/// Something that owns a status cache and can call a remote module.
pub trait ModuleCaller {
    /// The cache entities read from.
    fn status_cache(&self) -> &StatusCache;

    /// Calls `method` at module path `path`; see [`Session::call`].
    async fn call_module(
        &mut self,
        path: &str,
        method: &str,
        identifier: Option<&EntityId>,
        params: Vec<Value>,
    ) -> Result<Value, SessionError>;
}

impl<T: Transport> ModuleCaller for Session<T> {
    fn status_cache(&self) -> &StatusCache {
        self.status()
    }

    async fn call_module(
        &mut self,
        path: &str,
        method: &str,
        identifier: Option<&EntityId>,
        params: Vec<Value>,
    ) -> Result<Value, SessionError> {
        self.call(path, method, identifier, params).await
    }
}

/// One remote operation of a module.
///
/// Entities enumerate their operations as an enum implementing this
/// trait, so every call an entity can make is visible in its type.
pub trait ModuleMethod {
    /// The JSON-RPC method name.
    fn name(&self) -> &str;

    /// Params after the session token and entity id.
    fn params(&self) -> Vec<Value> {
        Vec::new()
    }
}

/// A method given by name, for operations no entity enum covers.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedMethod {
    name: String,
    params: Vec<Value>,
}

impl NamedMethod {
    /// A method with no extra params.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a param.
    pub fn param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
}

impl ModuleMethod for NamedMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Vec<Value> {
        self.params.clone()
    }
}

// ---------------------------------------------------------------------------
// ModuleHandle
// ---------------------------------------------------------------------------

/// Binds an entity to a remote module.
///
/// - `name` keys the status cache (`"empire"`, `"body"`, `"building"`).
/// - `path` is where calls go. Usually the same as `name`; buildings are
///   cached under `"building"` but called at their own URL
///   (`"/orestorage"`).
/// - `id` selects one entity within the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    name: String,
    path: String,
    id: Option<EntityId>,
}

impl ModuleHandle {
    /// A handle for `name`, called at path `name`, with no entity id.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            id: None,
        }
    }

    /// Sets the entity id.
    pub fn with_id(mut self, id: impl Into<EntityId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the call path, when it differs from the module name.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// The cache key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The module path calls are sent to.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The bound entity id, if any.
    pub fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    // -- Step 1: the cache ------------------------------------------------

    /// The cached fragment for this module, if it belongs to this entity.
    pub fn cached<'c>(&self, cache: &'c StatusCache) -> Option<&'c Fragment> {
        cache.fragment_for(&self.name, self.id.as_ref())
    }

    /// A single cached field, if the fragment belongs to this entity.
    pub fn cached_field<'c>(
        &self,
        cache: &'c StatusCache,
        field: &str,
    ) -> Option<&'c Value> {
        self.cached(cache)?.get(field)
    }

    // -- Step 2: the module -----------------------------------------------

    /// Calls `method` on this module for this entity.
    pub async fn invoke<C, M>(
        &self,
        caller: &mut C,
        method: &M,
    ) -> Result<Value, SessionError>
    where
        C: ModuleCaller,
        M: ModuleMethod + ?Sized,
    {
        caller
            .call_module(&self.path, method.name(), self.id.as_ref(), method.params())
            .await
    }

    /// Resolves `field`: from the cache if possible, else the result of
    /// `fallback`.
    pub async fn resolve<C, M>(
        &self,
        caller: &mut C,
        field: &str,
        fallback: &M,
    ) -> Result<Value, SessionError>
    where
        C: ModuleCaller,
        M: ModuleMethod + ?Sized,
    {
        if let Some(value) = self.cached_field(caller.status_cache(), field) {
            return Ok(value.clone());
        }
        tracing::debug!(
            module = %self.name,
            field,
            method = fallback.name(),
            "status miss, calling module"
        );
        self.invoke(caller, fallback).await
    }

    /// This entity's status fragment: cached if trustworthy, else fetched
    /// with `refresh`.
    pub async fn status<C, M>(
        &self,
        caller: &mut C,
        refresh: &M,
    ) -> Result<Fragment, SessionError>
    where
        C: ModuleCaller,
        M: ModuleMethod + ?Sized,
    {
        if let Some(fragment) = self.cached(caller.status_cache()) {
            return Ok(fragment.clone());
        }
        self.refresh(caller, refresh).await
    }

    /// Like [`status`](Self::status), but a cached fragment only counts if
    /// it holds `field`. A trusted fragment without the field is refreshed
    /// once; the refreshed fragment is returned whether or not it has it.
    pub async fn status_with<C, M>(
        &self,
        caller: &mut C,
        field: &str,
        refresh: &M,
    ) -> Result<Fragment, SessionError>
    where
        C: ModuleCaller,
        M: ModuleMethod + ?Sized,
    {
        if let Some(fragment) = self.cached(caller.status_cache()) {
            if fragment.contains_key(field) {
                return Ok(fragment.clone());
            }
            tracing::debug!(
                module = %self.name,
                field,
                method = refresh.name(),
                "cached status lacks field, refreshing"
            );
        }
        self.refresh(caller, refresh).await
    }

    /// Fetches this entity's status fragment with `method`, ignoring the
    /// cache.
    ///
    /// After the call, the freshly merged cache entry is used if it now
    /// belongs to this entity. Otherwise the fragment is taken from the
    /// result itself: `result[name]` if that is an object, else the whole
    /// result object.
    pub async fn refresh<C, M>(
        &self,
        caller: &mut C,
        method: &M,
    ) -> Result<Fragment, SessionError>
    where
        C: ModuleCaller,
        M: ModuleMethod + ?Sized,
    {
        let result = self.invoke(caller, method).await?;
        if let Some(fragment) = self.cached(caller.status_cache()) {
            return Ok(fragment.clone());
        }

        let fragment = match result {
            Value::Object(mut map) => match map.remove(&self.name) {
                Some(Value::Object(inner)) => inner,
                Some(other) => {
                    map.insert(self.name.clone(), other);
                    map
                }
                None => map,
            },
            _ => Fragment::new(),
        };
        Ok(fragment)
    }
}
