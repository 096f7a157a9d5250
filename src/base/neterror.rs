use thiserror::Error;

/// Failure class of a [`NetError`].
///
/// Lets callers branch on what went wrong without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad configuration, detected before any network I/O.
    InvalidArgument,
    /// The transport stream could not be opened or broke mid-handshake.
    Connect,
    /// The server answered, but not with a valid WebSocket upgrade.
    Protocol,
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Configuration Errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("Already connected")]
    AlreadyConnected,

    // Connection Errors
    #[error("Could not resolve {domain}: {message}")]
    NameNotResolvedFor { domain: String, message: String },
    #[error("Connection to {host}:{port} failed: {message}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        code: Option<i32>,
        message: String,
    },
    #[error("Connection to {host}:{port} timed out")]
    ConnectionTimedOut { host: String, port: u16 },
    #[error("SSL handshake with {host}:{port} failed: {message}")]
    SslHandshakeFailed {
        host: String,
        port: u16,
        message: String,
    },

    // WebSocket Handshake Errors
    #[error("Server sent invalid upgrade response: {response:?}")]
    InvalidUpgradeResponse { response: String },
    #[error("Server sent bad upgrade response: expected {expected}, received {received}")]
    BadUpgradeResponse { expected: String, received: String },
    #[error("Response headers exceed {limit} bytes")]
    ResponseHeadersTooBig { limit: usize },
}

impl NetError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NetError::InvalidArgument(_)
            | NetError::InvalidUri { .. }
            | NetError::AlreadyConnected => ErrorKind::InvalidArgument,
            NetError::NameNotResolvedFor { .. }
            | NetError::ConnectionFailedTo { .. }
            | NetError::ConnectionTimedOut { .. }
            | NetError::SslHandshakeFailed { .. } => ErrorKind::Connect,
            NetError::InvalidUpgradeResponse { .. }
            | NetError::BadUpgradeResponse { .. }
            | NetError::ResponseHeadersTooBig { .. } => ErrorKind::Protocol,
        }
    }

    /// Chromium `net_error_list.h` code for this error.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::InvalidArgument(_) => -4,
            NetError::AlreadyConnected => -23,
            NetError::ConnectionFailedTo { .. } => -104,
            NetError::NameNotResolvedFor { .. } => -105,
            NetError::SslHandshakeFailed { .. } => -107,
            NetError::ConnectionTimedOut { .. } => -118,
            NetError::InvalidUpgradeResponse { .. } | NetError::BadUpgradeResponse { .. } => -145,
            NetError::InvalidUri { .. } => -300,
            NetError::ResponseHeadersTooBig { .. } => -325,
        }
    }

    pub(crate) fn connection_failed_to(host: &str, port: u16, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                NetError::ConnectionTimedOut {
                    host: host.to_string(),
                    port,
                }
            }
            _ => NetError::ConnectionFailedTo {
                host: host.to_string(),
                port,
                code: err.raw_os_error(),
                message: err.to_string(),
            },
        }
    }

    pub(crate) fn dns_failed(domain: &str, err: std::io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            message: err.to_string(),
        }
    }
}
