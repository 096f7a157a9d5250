//! Transport handle for an established connection.
//!
//! `SocketType` is either a plain TCP stream or a BoringSSL stream over TCP.
//! Both expose blocking `Read`/`Write`; the read timeout set by the connect
//! job lives on the TCP socket, so it applies to every read, TLS included.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use boring::ssl::SslStream;

/// Transport used for a connection, selected by the URI scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportScheme {
    /// `ws://`
    Tcp,
    /// `wss://`
    Tls,
}

impl fmt::Display for TransportScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportScheme::Tcp => f.write_str("tcp"),
            TransportScheme::Tls => f.write_str("tls"),
        }
    }
}

/// Represents a connected socket (TCP or SSL).
/// Mimics net::StreamSocket.
pub enum SocketType {
    Tcp(TcpStream),
    Ssl(Box<SslStream<TcpStream>>),
}

impl fmt::Debug for SocketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SocketType::Tcp(s) => f.debug_tuple("Tcp").field(s).finish(),
            SocketType::Ssl(s) => f.debug_tuple("Ssl").field(s.get_ref()).finish(),
        }
    }
}

impl SocketType {
    pub fn scheme(&self) -> TransportScheme {
        match self {
            SocketType::Tcp(_) => TransportScheme::Tcp,
            SocketType::Ssl(_) => TransportScheme::Tls,
        }
    }

    /// The underlying TCP socket.
    pub fn tcp(&self) -> &TcpStream {
        match self {
            SocketType::Tcp(s) => s,
            SocketType::Ssl(s) => s.get_ref(),
        }
    }

    pub fn peer_addr(&self) -> io::Result<SocketAddr> {
        self.tcp().peer_addr()
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.tcp().local_addr()
    }

    /// Close the connection.
    ///
    /// Sends TLS close_notify first when encrypted, then shuts the TCP socket
    /// down in both directions. A peer that already went away is not an error.
    pub fn close(mut self) -> io::Result<()> {
        if let SocketType::Ssl(s) = &mut self {
            if let Err(e) = s.shutdown() {
                tracing::debug!(error = %e, "TLS close_notify failed");
            }
        }
        match self.tcp().shutdown(Shutdown::Both) {
            Err(e) if e.kind() != io::ErrorKind::NotConnected => Err(e),
            _ => Ok(()),
        }
    }
}

impl Read for SocketType {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SocketType::Tcp(s) => s.read(buf),
            SocketType::Ssl(s) => s.read(buf),
        }
    }
}

impl Write for SocketType {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SocketType::Tcp(s) => s.write(buf),
            SocketType::Ssl(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SocketType::Tcp(s) => s.flush(),
            SocketType::Ssl(s) => s.flush(),
        }
    }
}
