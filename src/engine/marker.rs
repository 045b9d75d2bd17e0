//! Correlation markers for logical operations.

use std::fmt;

/// A per-logical-operation correlation identifier.
///
/// Attached to every log line, retry, and sub-call of one operation so the
/// whole call tree can be traced across attempts.
///
/// # Example
///
/// ```rust
/// use bigcommerce_access::engine::Marker;
///
/// let marker = Marker::new();
/// assert_eq!(marker.as_str().len(), 32);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Marker(String);

impl Marker {
    /// Generates a fresh random marker.
    #[must_use]
    pub fn new() -> Self {
        Self(format!("{:032x}", rand::random::<u128>()))
    }

    /// The marker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers_are_unique() {
        assert_ne!(Marker::new(), Marker::new());
    }

    #[test]
    fn test_marker_is_hex() {
        let marker = Marker::new();
        assert!(marker.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
