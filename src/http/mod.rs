//! HTTP/1.1 header handling for the upgrade request.
//!
//! - [`orderedheaders`]: ordered, case-preserving header list

pub mod orderedheaders;
