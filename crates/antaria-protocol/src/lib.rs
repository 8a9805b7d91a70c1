//! Wire protocol for Antaria.
//!
//! This crate defines how the client talks to the game server's modules:
//!
//! - **Types** ([`RpcRequest`], [`RpcResponse`], [`CallId`]): the JSON-RPC
//!   2.0 envelopes that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how envelopes are
//!   converted to/from bytes.
//! - **Classification** ([`decode_reply`], [`classify_failure`]): turning
//!   a raw `(status, body)` pair into a result payload or a typed failure.
//! - **Errors** ([`ProtocolError`], [`ApiError`]).
//!
//! # Architecture
//!
//! ```text
//! Transport (status, bytes) → Protocol (result | failure) → Session (token, cache)
//! ```
//!
//! The protocol layer knows nothing about sessions or retries. It only
//! says what a response means.

mod classify;
mod codec;
mod error;
mod types;

pub use classify::{classify_failure, decode_reply, RpcFailure};
pub use codec::{Codec, JsonCodec};
pub use error::{ApiError, ProtocolError};
pub use types::{
    CallId, ErrorObject, RpcRequest, RpcResponse, JSONRPC_VERSION,
    SESSION_EXPIRED,
};
