//! WebSocket URI decomposition.

use crate::base::neterror::NetError;
use crate::socket::stream::TransportScheme;
use base64::{engine::general_purpose, Engine as _};
use url::{Host, Url};
use zeroize::Zeroizing;

/// Transport parameters derived from a `ws://` or `wss://` URI.
///
/// Recomputed on every connect attempt; never cached across reconnects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConnection {
    pub transport: TransportScheme,
    /// Host to connect to. IPv6 literals are stored without brackets.
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: Zeroizing<String>,
    /// Path plus `?query` and `#fragment`, as sent in the request line.
    pub request_path: String,
    is_ipv6: bool,
}

impl ParsedConnection {
    pub fn parse(uri: &str) -> Result<Self, NetError> {
        let invalid = |reason: &str| NetError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(uri).map_err(|e| invalid(&e.to_string()))?;

        let (transport, default_port) = match url.scheme() {
            "ws" => (TransportScheme::Tcp, 80),
            "wss" => (TransportScheme::Tls, 443),
            _ => return Err(invalid("scheme must be ws or wss")),
        };

        let (host, is_ipv6) = match url.host() {
            Some(Host::Domain(d)) => (d.to_string(), false),
            Some(Host::Ipv4(ip)) => (ip.to_string(), false),
            Some(Host::Ipv6(ip)) => (ip.to_string(), true),
            None => return Err(invalid("missing host")),
        };
        if host.is_empty() {
            return Err(invalid("missing host"));
        }

        let mut request_path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        if let Some(query) = url.query().filter(|q| !q.is_empty()) {
            request_path.push('?');
            request_path.push_str(query);
        }
        if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
            request_path.push('#');
            request_path.push_str(fragment);
        }

        Ok(Self {
            transport,
            host,
            port: url.port().unwrap_or(default_port),
            username: url.username().to_string(),
            password: Zeroizing::new(url.password().unwrap_or_default().to_string()),
            request_path,
            is_ipv6,
        })
    }

    pub fn is_secure(&self) -> bool {
        self.transport == TransportScheme::Tls
    }

    /// Value of the `Host` header: always `host:port`, IPv6 in brackets.
    pub fn host_header(&self) -> String {
        if self.is_ipv6 {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty() || !self.password.is_empty()
    }

    /// `Authorization` header value built from the URI userinfo.
    pub fn basic_auth(&self) -> Option<String> {
        if !self.has_credentials() {
            return None;
        }
        let creds = Zeroizing::new(format!("{}:{}", self.username, self.password.as_str()));
        let encoded = general_purpose::STANDARD.encode(creds.as_bytes());
        Some(format!("Basic {}", encoded))
    }
}
