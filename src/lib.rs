//! # wsconnect
//!
//! A blocking WebSocket client handshake for Rust.
//!
//! `wsconnect` opens a TCP or BoringSSL TLS stream to a `ws://` / `wss://`
//! URI, performs the RFC 6455 opening handshake and hands back the upgraded
//! stream. Frame encoding is out of scope; the stream is yours once
//! [`WebSocketClient::connect`](ws::WebSocketClient::connect) returns.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use wsconnect::ws::{ConnectionOptions, WebSocketClient};
//!
//! fn main() -> Result<(), wsconnect::base::neterror::NetError> {
//!     let options = ConnectionOptions::new("wss://example.com/feed")
//!         .timeout(Duration::from_secs(10))
//!         .header("Sec-WebSocket-Protocol", "chat");
//!     let mut client = WebSocketClient::new(options)?;
//!     client.connect()?;
//!     // ... exchange frames over client.stream_mut() ...
//!     client.disconnect()
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and I/O error context
//! - [`http`] - Ordered header list for the upgrade request
//! - [`socket`] - TCP/TLS connect job, stream handle, TLS configuration
//! - [`ws`] - URI parsing, key generation, handshake and connection lifecycle
//!
//! ## Blocking model
//!
//! Every operation runs on the calling thread and is bounded by the
//! configured timeout. A client owns its stream exclusively; share it across
//! threads behind a mutex.

pub mod base;
pub mod http;
pub mod socket;
pub mod ws;
