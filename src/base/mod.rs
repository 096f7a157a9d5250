//! Base types and error handling.
//!
//! - [`NetError`](neterror::NetError): every failure the handshake can produce
//! - [`ErrorKind`](neterror::ErrorKind): the coarse class of a failure
//! - [`IoResultExt`](context::IoResultExt): attaches host/port context to I/O errors

pub mod context;
pub mod neterror;
