//! Session management for the Antaria game client.
//!
//! This crate owns everything between "I want field X of entity Y" and the
//! wire:
//!
//! 1. **Authentication**: the login/logout state machine ([`Session`],
//!    [`SessionState`], [`Credentials`])
//! 2. **Calling**: [`Session::call`], the one entry point every higher
//!    layer uses: lazy login, token prepending, one-shot recovery from an
//!    expired session
//! 3. **Status cache**: [`StatusCache`], the per-session record of the
//!    last status fragment seen for each module
//! 4. **Module binding**: [`ModuleHandle`] and the [`ModuleCaller`]
//!    capability, which resolve a field from the cache or fall back to a
//!    typed remote call ([`ModuleMethod`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Entities (above)  ← Empire, Body, Building resolve fields through ModuleHandle
//!     ↕
//! Session Layer (this crate)  ← token, retry, status cache
//!     ↕
//! Protocol + Transport (below)  ← envelopes, classification, HTTP POST
//! ```

#![allow(async_fn_in_trait)]

mod auth;
mod binding;
mod error;
mod session;
mod shared;
mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::Credentials;
pub use binding::{ModuleCaller, ModuleHandle, ModuleMethod, NamedMethod};
pub use error::SessionError;
pub use session::{Session, SessionConfig, SessionState, LOGIN_MODULE};
pub use shared::SharedSession;
pub use status::{EntityId, Fragment, StatusCache};
