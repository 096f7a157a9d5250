//! WebSocket client opening handshake (RFC 6455 §4).
//!
//! Establishes the connection only; framing is left to the caller, who gets
//! the upgraded stream through [`WebSocketClient::stream_mut`].
//!
//! # Example
//! ```ignore
//! use wsconnect::ws::{ConnectionOptions, WebSocketClient};
//!
//! let mut client = WebSocketClient::new(ConnectionOptions::new("wss://echo.websocket.org"))?;
//! client.connect()?;
//! let stream = client.stream_mut().unwrap();
//! ```

mod connection;
pub mod handshake;
mod nonce;
mod options;
pub mod request;
mod uri;

pub use connection::{ConnectionState, WebSocketClient};
pub use handshake::MAX_RESPONSE_HEAD;
pub use nonce::{accept_key, HandshakeNonce, WS_GUID};
pub use options::{ConnectionOptions, DEFAULT_TIMEOUT};
pub use request::{build_upgrade_request, USER_AGENT};
pub use uri::ParsedConnection;
