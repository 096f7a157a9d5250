//! Connection lifecycle: connect, disconnect, reconnect on target change.
//!
//! Blocking and single-owner. Every call runs on the caller's thread and is
//! bounded by the configured timeout; wrap the client in a mutex to share it.

use super::handshake::perform_handshake;
use super::nonce::HandshakeNonce;
use super::options::ConnectionOptions;
use super::uri::ParsedConnection;
use crate::base::neterror::NetError;
use crate::socket::connectjob::ConnectJob;
use crate::socket::stream::SocketType;
use std::io;
use std::net::SocketAddr;

/// Externally visible connection state. There is no observable
/// "connecting" state: `connect()` either completes or leaves `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
}

/// WebSocket client connection.
///
/// Owns the transport stream exclusively. The stream only becomes visible
/// after the handshake validated, and is closed on `disconnect()`, on a
/// target change and on drop.
#[derive(Debug)]
pub struct WebSocketClient {
    options: ConnectionOptions,
    socket: Option<SocketType>,
}

impl WebSocketClient {
    /// Create a disconnected client. Fails fast on invalid configuration.
    pub fn new(options: ConnectionOptions) -> Result<Self, NetError> {
        options.validate()?;
        Ok(Self {
            options,
            socket: None,
        })
    }

    /// Run the opening handshake against the configured URI.
    ///
    /// Each attempt parses the URI afresh, opens a new stream and uses a new
    /// key. On any failure the half-open stream is dropped and the client
    /// stays `Disconnected`.
    pub fn connect(&mut self) -> Result<(), NetError> {
        if self.socket.is_some() {
            return Err(NetError::AlreadyConnected);
        }

        self.options.validate()?;
        let target = ParsedConnection::parse(self.options.uri())?;
        let mut socket = ConnectJob::connect(
            &target,
            self.options.get_tls_config(),
            self.options.get_timeout(),
        )?;

        let key = HandshakeNonce::generate();
        perform_handshake(&mut socket, &target, &key, &self.options)?;

        self.socket = Some(socket);
        tracing::info!(uri = %self.options.uri(), "Connected");
        Ok(())
    }

    /// Close the stream if there is one. Calling it while disconnected is a no-op.
    ///
    /// Close errors are logged and swallowed: the stream is released either way.
    pub fn disconnect(&mut self) -> Result<(), NetError> {
        let Some(socket) = self.socket.take() else {
            return Ok(());
        };
        if let Err(e) = socket.close() {
            tracing::debug!(error = %e, "error while closing stream");
        }
        tracing::info!(uri = %self.options.uri(), "Disconnected");
        Ok(())
    }

    /// Point the client at a new URI.
    ///
    /// A URI equal to the current one does nothing. Otherwise, when connected,
    /// the current connection is closed and a new one opened to `uri`.
    pub fn set_uri(&mut self, uri: &str) -> Result<(), NetError> {
        if uri == self.options.uri() {
            return Ok(());
        }
        let options = self.options.with_uri(uri);
        self.set_options(options)
    }

    /// Replace the whole configuration.
    ///
    /// Validated before anything is torn down. When connected and the new
    /// configuration differs, reconnects with it.
    pub fn set_options(&mut self, options: ConnectionOptions) -> Result<(), NetError> {
        if options == self.options {
            return Ok(());
        }
        options.validate()?;

        let was_connected = self.is_connected();
        self.disconnect()?;
        self.options = options;
        if was_connected {
            self.connect()?;
        }
        Ok(())
    }

    pub fn state(&self) -> ConnectionState {
        if self.socket.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    pub fn uri(&self) -> &str {
        self.options.uri()
    }

    pub fn options(&self) -> &ConnectionOptions {
        &self.options
    }

    /// The established stream, for the frame layer to read and write.
    pub fn stream_mut(&mut self) -> Option<&mut SocketType> {
        self.socket.as_mut()
    }

    pub fn peer_addr(&self) -> Option<io::Result<SocketAddr>> {
        self.socket.as_ref().map(SocketType::peer_addr)
    }

    pub fn local_addr(&self) -> Option<io::Result<SocketAddr>> {
        self.socket.as_ref().map(SocketType::local_addr)
    }
}

impl Drop for WebSocketClient {
    fn drop(&mut self) {
        let _ = self.disconnect();
    }
}
