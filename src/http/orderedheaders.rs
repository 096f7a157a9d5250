use crate::base::neterror::NetError;
use http::header::{HeaderName, HeaderValue};

/// Case-preserving header list for HTTP/1.1.
///
/// Keeps insertion order and the caller's original casing. Inserting a name
/// that is already present (case-insensitive) replaces its value in place,
/// so a later writer wins without moving the header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    /// Headers as (original_name, value) pairs
    headers: Vec<(String, String)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
        }
    }

    /// Insert header with preserved casing.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        if let Some((_, v)) = self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            *v = value;
        } else {
            self.headers.push((name, value));
        }
    }

    /// Merge `other` on top of this list, in `other`'s order.
    pub fn extend_from(&mut self, other: &HeaderList) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    /// Get header value (case-insensitive lookup).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Get all headers as-is with original casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Check every name is an HTTP token and every value is a legal field
    /// value. Rejects CR/LF so a header can never split the request.
    pub fn validate(&self) -> Result<(), NetError> {
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NetError::InvalidArgument(format!("invalid header name {:?}", name)))?;
            HeaderValue::from_str(value).map_err(|_| {
                NetError::InvalidArgument(format!("invalid value for header {:?}", name))
            })?;
        }
        Ok(())
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut list = HeaderList::new();
        for (name, value) in iter {
            list.insert(name, value);
        }
        list
    }
}
