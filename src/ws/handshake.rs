//! Opening handshake exchange and response validation (RFC 6455 §4.1).

use super::nonce::HandshakeNonce;
use super::options::ConnectionOptions;
use super::request::build_upgrade_request;
use super::uri::ParsedConnection;
use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use std::io::{self, Read, Write};

/// Upper bound on the response header block, terminator included.
///
/// Not mandated by RFC 6455. A 101 response carries a handful of short
/// headers, so a server that has not finished its header block within this
/// many bytes is treated as misbehaving.
pub const MAX_RESPONSE_HEAD: usize = 1024;

const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Send the upgrade request over `stream` and validate the server's answer.
pub fn perform_handshake<S: Read + Write>(
    stream: &mut S,
    target: &ParsedConnection,
    key: &HandshakeNonce,
    options: &ConnectionOptions,
) -> Result<(), NetError> {
    let request = build_upgrade_request(target, key, options);
    stream
        .write_all(request.as_bytes())
        .and_then(|_| stream.flush())
        .connection_context(&target.host, target.port)?;
    tracing::debug!(host = %target.host, path = %target.request_path, "upgrade request sent");

    let head = read_response_head(stream, target)?;
    validate_response(&head, key)?;
    tracing::debug!(host = %target.host, "upgrade response validated");
    Ok(())
}

/// Read the response up to and including the blank line ending the headers.
///
/// Reads one byte at a time: the server may send its first frame right after
/// the header block, and those bytes belong to the frame layer.
pub fn read_response_head<R: Read>(
    reader: &mut R,
    target: &ParsedConnection,
) -> Result<String, NetError> {
    let mut head = Vec::with_capacity(256);
    let mut byte = [0u8; 1];

    while !head.ends_with(HEAD_TERMINATOR) {
        if head.len() >= MAX_RESPONSE_HEAD {
            return Err(NetError::ResponseHeadersTooBig {
                limit: MAX_RESPONSE_HEAD,
            });
        }
        match reader.read(&mut byte) {
            Ok(0) => {
                return Err(NetError::InvalidUpgradeResponse {
                    response: String::from_utf8_lossy(&head).into_owned(),
                })
            }
            Ok(_) => head.push(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).connection_context(&target.host, target.port),
        }
    }

    Ok(String::from_utf8_lossy(&head).into_owned())
}

/// Value of the first `Sec-WebSocket-Accept` header, trimmed.
pub fn accept_header_value(head: &str) -> Option<&str> {
    head.lines().skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("Sec-WebSocket-Accept")
            .then(|| value.trim())
    })
}

/// Check the response head carries the accept digest for `key`.
pub fn validate_response(head: &str, key: &HandshakeNonce) -> Result<(), NetError> {
    let received = accept_header_value(head).ok_or_else(|| NetError::InvalidUpgradeResponse {
        response: head.to_string(),
    })?;

    let expected = key.expected_accept();
    if received != expected {
        return Err(NetError::BadUpgradeResponse {
            expected,
            received: received.to_string(),
        });
    }
    Ok(())
}
