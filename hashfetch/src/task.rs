//! Units of work and their outcomes.

use std::fmt;

/// One unit of work: a single resource identifier, as given by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    identifier: String,
}

impl Task {
    /// Create a new `Task` for `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// The raw, non-normalized identifier.
    #[inline]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// A successfully computed `(url, digest)` pair.
///
/// `url` is the normalized identifier the digest was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlDigest {
    pub url: String,
    pub digest: String,
}

impl fmt::Display for UrlDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.url, self.digest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let result = UrlDigest {
            url: "http://example.com".into(),
            digest: "84238dfc8092e5d9c0dac8ef93371a07".into(),
        };

        assert_eq!(result.to_string(), "http://example.com 84238dfc8092e5d9c0dac8ef93371a07");
    }
}
