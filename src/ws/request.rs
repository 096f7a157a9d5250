//! Upgrade request assembly.

use super::nonce::HandshakeNonce;
use super::options::ConnectionOptions;
use super::uri::ParsedConnection;
use crate::http::orderedheaders::HeaderList;

/// Sent in `User-Agent` unless the caller overrides it.
pub const USER_AGENT: &str = concat!("wsconnect/", env!("CARGO_PKG_VERSION"));

/// Build the ordered header list for the upgrade request.
///
/// Defaults come first; caller headers are merged last and replace a default
/// of the same name (case-insensitive) in place, or append otherwise.
pub fn upgrade_headers(
    target: &ParsedConnection,
    key: &HandshakeNonce,
    options: &ConnectionOptions,
) -> HeaderList {
    let mut headers = HeaderList::new();
    headers.insert("Host", target.host_header());
    headers.insert("User-Agent", USER_AGENT);
    headers.insert("Connection", "upgrade");
    headers.insert("Upgrade", "websocket");
    headers.insert("Sec-WebSocket-Key", key.as_str());
    headers.insert("Sec-WebSocket-Version", "13");

    if let Some(auth) = target.basic_auth() {
        headers.insert("Authorization", auth);
    }
    if let Some(origin) = options.get_origin() {
        headers.insert("Origin", origin);
    }

    headers.extend_from(options.get_headers());
    headers
}

/// Build the literal upgrade request, terminated by an empty line.
pub fn build_upgrade_request(
    target: &ParsedConnection,
    key: &HandshakeNonce,
    options: &ConnectionOptions,
) -> String {
    let headers = upgrade_headers(target, key, options);

    let mut request = format!("GET {} HTTP/1.1\r\n", target.request_path);
    for (name, value) in headers.iter() {
        request.push_str(name);
        request.push_str(": ");
        request.push_str(value);
        request.push_str("\r\n");
    }
    request.push_str("\r\n");
    request
}
