use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::stream::{SocketType, TransportScheme};
use crate::socket::tls::TlsConfig;
use crate::ws::ParsedConnection;
use boring::ssl::{SslConnector, SslMethod};
use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    /// Open a stream to `target`, bounded by `timeout`.
    ///
    /// The timeout bounds the whole TCP connect phase: resolved addresses are
    /// tried in order against one shared deadline, each attempt getting what
    /// is left of it. It then stays armed as the read/write timeout of the
    /// returned stream. `tls` is only consulted for `wss` targets; `None`
    /// means [`TlsConfig::default`].
    pub fn connect(
        target: &ParsedConnection,
        tls: Option<&TlsConfig>,
        timeout: Duration,
    ) -> Result<SocketType, NetError> {
        let host = target.host.as_str();
        let port = target.port;

        // 1. DNS Resolution
        tracing::debug!(host = %host, port, "resolving");
        let addrs: Vec<_> = (host, port).to_socket_addrs().dns_context(host)?.collect();
        if addrs.is_empty() {
            return Err(NetError::NameNotResolvedFor {
                domain: host.to_string(),
                message: "no addresses found".to_string(),
            });
        }

        // 2. TCP Connect, first address that answers wins
        let deadline = Instant::now().checked_add(timeout);
        let mut last_err = None;
        let mut stream = None;
        for addr in addrs {
            let budget = match deadline {
                Some(deadline) => remaining_budget(deadline, Instant::now()),
                // Too far out to represent; nothing to enforce
                None => Some(timeout),
            };
            let Some(remaining) = budget else {
                tracing::debug!(%addr, "connect deadline reached, skipping remaining addresses");
                last_err = Some(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "connect deadline reached",
                ));
                break;
            };
            match TcpStream::connect_timeout(&addr, remaining) {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(e) => {
                    tracing::debug!(%addr, error = %e, "TCP connect attempt failed");
                    last_err = Some(e);
                }
            }
        }
        let stream = match stream {
            Some(s) => s,
            None => {
                let err = last_err.unwrap_or_else(|| {
                    io::Error::new(io::ErrorKind::NotConnected, "no address accepted")
                });
                return Err(err).connection_context(host, port);
            }
        };

        stream.set_read_timeout(Some(timeout)).connection_context(host, port)?;
        stream.set_write_timeout(Some(timeout)).connection_context(host, port)?;
        stream.set_nodelay(true).connection_context(host, port)?;
        tracing::debug!(host = %host, port, "TCP connected");

        // 3. SSL Handshake (if wss)
        match target.transport {
            TransportScheme::Tcp => Ok(SocketType::Tcp(stream)),
            TransportScheme::Tls => {
                let config = tls.cloned().unwrap_or_default();
                Self::ssl_handshake(stream, host, port, &config)
            }
        }
    }

    fn ssl_handshake(
        stream: TcpStream,
        host: &str,
        port: u16,
        config: &TlsConfig,
    ) -> Result<SocketType, NetError> {
        let ssl_failed = |message: String| NetError::SslHandshakeFailed {
            host: host.to_string(),
            port,
            message,
        };

        let mut builder =
            SslConnector::builder(SslMethod::tls()).map_err(|e| ssl_failed(e.to_string()))?;
        config.apply_to_builder(&mut builder)?;
        let connector = builder.build();

        let server_name = config.server_name(host);
        let mut ssl_config = connector.configure().map_err(|e| ssl_failed(e.to_string()))?;
        ssl_config.set_use_server_name_indication(TlsConfig::should_set_sni(server_name));
        ssl_config.set_verify_hostname(config.verify_peer);

        let tls_stream = ssl_config.connect(server_name, stream).map_err(|e| {
            tracing::debug!(host = %host, port, error = %e, "SSL handshake failed");
            ssl_failed(e.to_string())
        })?;
        tracing::debug!(host = %host, port, "SSL handshake complete");

        Ok(SocketType::Ssl(Box::new(tls_stream)))
    }
}

/// Time left before `deadline`, or `None` once it has passed.
fn remaining_budget(deadline: Instant, now: Instant) -> Option<Duration> {
    let remaining = deadline.saturating_duration_since(now);
    (!remaining.is_zero()).then_some(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_connect_plain_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let target = ParsedConnection::parse(&format!("ws://{}/", addr)).unwrap();

        let socket = ConnectJob::connect(&target, None, Duration::from_secs(2)).unwrap();
        assert_eq!(socket.scheme(), TransportScheme::Tcp);
        assert_eq!(socket.peer_addr().unwrap(), addr);
        assert_eq!(
            socket.tcp().read_timeout().unwrap(),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_connect_refused_carries_host_and_port() {
        // Bind then drop to get a port nobody listens on
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let target = ParsedConnection::parse(&format!("ws://127.0.0.1:{}/", port)).unwrap();

        let err = ConnectJob::connect(&target, None, Duration::from_secs(2)).unwrap_err();
        match err {
            NetError::ConnectionFailedTo { host, port: p, .. } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            other => panic!("Expected ConnectionFailedTo, got {:?}", other),
        }
    }

    #[test]
    fn test_remaining_budget_shrinks_to_none() {
        let start = Instant::now();
        let deadline = start + Duration::from_secs(2);

        assert_eq!(remaining_budget(deadline, start), Some(Duration::from_secs(2)));
        assert_eq!(
            remaining_budget(deadline, start + Duration::from_millis(1500)),
            Some(Duration::from_millis(500))
        );
        assert_eq!(remaining_budget(deadline, deadline), None);
        assert_eq!(remaining_budget(deadline, deadline + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_unresolvable_host() {
        let target = ParsedConnection::parse("ws://does-not-exist.invalid/").unwrap();
        let err = ConnectJob::connect(&target, None, Duration::from_secs(2)).unwrap_err();
        assert!(matches!(err, NetError::NameNotResolvedFor { .. }));
    }
}
