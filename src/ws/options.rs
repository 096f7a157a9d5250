//! Connection configuration.

use super::uri::ParsedConnection;
use crate::base::neterror::NetError;
use crate::http::orderedheaders::HeaderList;
use crate::socket::tls::TlsConfig;
use http::HeaderValue;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Connect and read timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration of one client: target, timeout, extra headers, TLS.
///
/// Treated as immutable while a connection is up. Changing the target goes
/// through [`ConnectionOptions::with_uri`], which yields a new value that the
/// client swaps in after tearing the old connection down.
///
/// # Example
/// ```ignore
/// let options = ConnectionOptions::new("wss://example.com/feed")
///     .timeout(Duration::from_secs(10))
///     .origin("https://example.com")
///     .header("Sec-WebSocket-Protocol", "chat");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionOptions {
    uri: String,
    timeout: Duration,
    origin: Option<String>,
    headers: HeaderList,
    tls: Option<TlsConfig>,
}

/// Wire shape of a JSON configuration document.
#[derive(Deserialize)]
struct RawOptions {
    uri: Option<String>,
    timeout: Option<f64>,
    origin: Option<String>,
    #[serde(default)]
    headers: serde_json::Map<String, Value>,
    context: Option<Value>,
}

impl ConnectionOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            timeout: DEFAULT_TIMEOUT,
            origin: None,
            headers: HeaderList::new(),
            tls: None,
        }
    }

    /// Parse a JSON configuration.
    ///
    /// Recognized keys: `uri` (required), `timeout` (seconds), `origin`,
    /// `headers` (object of string values, order kept) and `context`
    /// (a [`TlsConfig`] object). Other keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, NetError> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| NetError::InvalidArgument(format!("malformed configuration: {}", e)))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, NetError> {
        let raw: RawOptions = serde_json::from_value(value)
            .map_err(|e| NetError::InvalidArgument(format!("malformed configuration: {}", e)))?;

        let uri = raw
            .uri
            .filter(|u| !u.is_empty())
            .ok_or_else(|| NetError::InvalidArgument("missing uri".to_string()))?;
        let mut options = Self::new(uri);

        if let Some(secs) = raw.timeout {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(NetError::InvalidArgument(format!(
                    "timeout must be a positive number of seconds, got {}",
                    secs
                )));
            }
            options.timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
                NetError::InvalidArgument(format!("invalid timeout {}: {}", secs, e))
            })?;
        }
        options.origin = raw.origin;

        for (name, value) in raw.headers {
            let Value::String(value) = value else {
                return Err(NetError::InvalidArgument(format!(
                    "header {:?} must have a string value",
                    name
                )));
            };
            options.headers.insert(name, value);
        }

        if let Some(context) = raw.context {
            options.tls = Some(TlsConfig::from_value(context)?);
        }

        options.validate()?;
        Ok(options)
    }

    /// Connect and read timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send an `Origin` header.
    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Add a header to the upgrade request.
    ///
    /// Merged after the defaults: a name that matches a default header
    /// (case-insensitive) replaces its value.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replace all extra headers.
    pub fn headers(mut self, headers: HeaderList) -> Self {
        self.headers = headers;
        self
    }

    /// TLS settings for `wss://` targets.
    pub fn tls_config(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Same configuration, different target.
    pub fn with_uri(&self, uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..self.clone()
        }
    }

    /// Check everything that can be checked without touching the network.
    pub fn validate(&self) -> Result<(), NetError> {
        if self.uri.is_empty() {
            return Err(NetError::InvalidArgument("missing uri".to_string()));
        }
        ParsedConnection::parse(&self.uri)?;
        if self.timeout.is_zero() {
            return Err(NetError::InvalidArgument(
                "timeout must be greater than zero".to_string(),
            ));
        }
        self.headers.validate()?;
        if let Some(origin) = &self.origin {
            HeaderValue::from_str(origin)
                .map_err(|_| NetError::InvalidArgument(format!("invalid origin {:?}", origin)))?;
        }
        Ok(())
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get_origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn get_headers(&self) -> &HeaderList {
        &self.headers
    }

    pub fn get_tls_config(&self) -> Option<&TlsConfig> {
        self.tls.as_ref()
    }
}
