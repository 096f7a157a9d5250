use crate::base::neterror::NetError;
use boring::ssl::{SslConnectorBuilder, SslFiletype, SslVerifyMode, SslVersion};
use serde::Deserialize;
use std::path::PathBuf;

/// TLS protocol version bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TlsVersion {
    #[serde(rename = "tls1.2")]
    Tls12,
    #[serde(rename = "tls1.3")]
    Tls13,
}

impl TlsVersion {
    fn as_ssl_version(self) -> SslVersion {
        match self {
            TlsVersion::Tls12 => SslVersion::TLS1_2,
            TlsVersion::Tls13 => SslVersion::TLS1_3,
        }
    }
}

/// Caller-owned transport configuration for `wss://` connections.
///
/// Deserializes from the `context` object of a JSON configuration; unknown
/// fields are rejected so a typo never silently falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TlsConfig {
    /// Verify the server certificate chain and hostname.
    pub verify_peer: bool,
    pub min_version: Option<TlsVersion>,
    pub max_version: Option<TlsVersion>,
    /// OpenSSL cipher list string. `None` keeps BoringSSL's defaults.
    pub cipher_list: Option<String>,
    pub alpn_protos: Vec<String>,
    /// PEM bundle of extra trust anchors.
    pub ca_file: Option<PathBuf>,
    /// Name used for SNI and certificate verification instead of the URI host.
    pub server_name: Option<String>,
    /// PEM client certificate and key for mutual TLS.
    pub client_cert: Option<PathBuf>,
    pub client_key: Option<PathBuf>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify_peer: true,
            min_version: Some(TlsVersion::Tls12),
            max_version: None,
            cipher_list: None,
            // The upgrade is an HTTP/1.1 exchange
            alpn_protos: vec!["http/1.1".to_string()],
            ca_file: None,
            server_name: None,
            client_cert: None,
            client_key: None,
        }
    }
}

impl TlsConfig {
    /// Configuration that skips certificate verification. For local testing only.
    pub fn insecure() -> Self {
        Self {
            verify_peer: false,
            ..Self::default()
        }
    }

    /// Parse a transport configuration from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, NetError> {
        serde_json::from_value(value).map_err(|e| {
            NetError::InvalidArgument(format!("invalid transport configuration: {}", e))
        })
    }

    /// Apply this configuration to an SSL connector builder.
    pub fn apply_to_builder(&self, builder: &mut SslConnectorBuilder) -> Result<(), NetError> {
        let invalid = |what: &str| NetError::InvalidArgument(format!("invalid TLS {}", what));

        if let Some(min) = self.min_version {
            builder
                .set_min_proto_version(Some(min.as_ssl_version()))
                .map_err(|_| invalid("min_version"))?;
        }
        if let Some(max) = self.max_version {
            builder
                .set_max_proto_version(Some(max.as_ssl_version()))
                .map_err(|_| invalid("max_version"))?;
        }

        if let Some(ciphers) = &self.cipher_list {
            builder.set_cipher_list(ciphers).map_err(|_| invalid("cipher_list"))?;
        }

        if !self.alpn_protos.is_empty() {
            let mut alpn_wire = Vec::new();
            for proto in &self.alpn_protos {
                if proto.is_empty() || proto.len() > 255 {
                    return Err(invalid("alpn_protos"));
                }
                alpn_wire.push(proto.len() as u8);
                alpn_wire.extend_from_slice(proto.as_bytes());
            }
            builder.set_alpn_protos(&alpn_wire).map_err(|_| invalid("alpn_protos"))?;
        }

        if let Some(ca_file) = &self.ca_file {
            builder.set_ca_file(ca_file).map_err(|_| invalid("ca_file"))?;
        }

        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => {
                builder
                    .set_certificate_chain_file(cert)
                    .map_err(|_| invalid("client_cert"))?;
                builder
                    .set_private_key_file(key, SslFiletype::PEM)
                    .map_err(|_| invalid("client_key"))?;
            }
            (None, None) => {}
            _ => return Err(invalid("client_cert/client_key pair")),
        }

        if self.verify_peer {
            builder.set_verify(SslVerifyMode::PEER);
        } else {
            builder.set_verify(SslVerifyMode::NONE);
        }

        Ok(())
    }

    /// Name to present in SNI and verify against: the override, else the URI host.
    pub fn server_name<'a>(&'a self, host: &'a str) -> &'a str {
        self.server_name.as_deref().unwrap_or(host)
    }

    /// Check if SNI (Server Name Indication) should be set for this host.
    /// Per RFC 6066, SNI MUST NOT be set for raw IP addresses.
    pub fn should_set_sni(host: &str) -> bool {
        host.parse::<std::net::IpAddr>().is_err()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boring::ssl::{SslConnector, SslMethod};
    use serde_json::json;

    #[test]
    fn test_default_config_applies() {
        let config = TlsConfig::default();
        assert!(config.verify_peer);
        assert_eq!(config.alpn_protos, vec!["http/1.1".to_string()]);

        let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
        assert!(config.apply_to_builder(&mut builder).is_ok());
    }

    #[test]
    fn test_insecure_config_applies() {
        let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
        assert!(TlsConfig::insecure().apply_to_builder(&mut builder).is_ok());
    }

    #[test]
    fn test_oversized_alpn_rejected() {
        let config = TlsConfig {
            alpn_protos: vec!["x".repeat(256)],
            ..TlsConfig::default()
        };
        let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
        assert!(matches!(
            config.apply_to_builder(&mut builder),
            Err(NetError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_unpaired_client_cert_rejected() {
        let config = TlsConfig {
            client_cert: Some(PathBuf::from("client.pem")),
            ..TlsConfig::default()
        };
        let mut builder = SslConnector::builder(SslMethod::tls()).unwrap();
        assert!(config.apply_to_builder(&mut builder).is_err());
    }

    #[test]
    fn test_from_value() {
        let config = TlsConfig::from_value(json!({
            "verify_peer": false,
            "min_version": "tls1.3",
            "server_name": "internal.example"
        }))
        .unwrap();
        assert!(!config.verify_peer);
        assert_eq!(config.min_version, Some(TlsVersion::Tls13));
        assert_eq!(config.server_name("10.0.0.1"), "internal.example");
        // Unset fields keep defaults
        assert_eq!(config.alpn_protos, vec!["http/1.1".to_string()]);
    }

    #[test]
    fn test_from_value_rejects_unknown_fields() {
        let err = TlsConfig::from_value(json!({ "verify": false })).unwrap_err();
        assert!(matches!(err, NetError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(TlsConfig::from_value(json!("tls")).is_err());
        assert!(TlsConfig::from_value(json!(42)).is_err());
    }

    #[test]
    fn test_should_set_sni() {
        assert!(TlsConfig::should_set_sni("example.com"));
        assert!(!TlsConfig::should_set_sni("127.0.0.1"));
        assert!(!TlsConfig::should_set_sni("::1"));
    }
}
