//! Error types for state storage.

use serde::{Deserialize, Serialize};

/// Errors from storage operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreError {
    /// Writing the value would exceed the store's capacity
    QuotaExceeded {
        /// Bytes the write needed
        requested: usize,
        /// Bytes the store allows
        limit: usize,
    },

    /// Underlying I/O failure
    Io(String),

    /// Key is not usable by this store
    InvalidKey(String),
}

impl StoreError {
    /// Create an I/O error with message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Create an invalid key error with message.
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded { requested, limit } => {
                write!(f, "quota exceeded: {} bytes requested, limit {}", requested, limit)
            }
            Self::Io(msg) => write!(f, "i/o error: {}", msg),
            Self::InvalidKey(key) => write!(f, "invalid key: {}", key),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::QuotaExceeded {
            requested: 10,
            limit: 4,
        };
        assert_eq!(err.to_string(), "quota exceeded: 10 bytes requested, limit 4");

        assert_eq!(StoreError::io("disk gone").to_string(), "i/o error: disk gone");
        assert_eq!(StoreError::invalid_key("a/b").to_string(), "invalid key: a/b");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(msg) if msg == "boom"));
    }
}
