//! Wire protocol for lobbykit.
//!
//! This crate defines the named events that clients and the server
//! exchange:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`LobbyCode`]): the
//!   event structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those events are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! The protocol layer sits between transport (raw bytes) and the lobby
//! registry. It doesn't know about connections or lobbies; it only
//! knows how to name and serialize events.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{ClientEvent, LobbyCode, ServerEvent};
