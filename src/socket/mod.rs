//! Socket and connection management.
//!
//! Provides the transport under a WebSocket connection, mirroring Chromium's `net/socket/`:
//! - [`connectjob`]: DNS → TCP → TLS connection flow with timeouts
//! - [`stream`]: plain or TLS stream handle
//! - [`tls`]: TLS configuration with BoringSSL

pub mod connectjob;
pub mod stream;
pub mod tls;
