//! Error types for lrucache

use std::fmt;

/// Result type alias for cache operations that can miss
pub type Result<T, K> = std::result::Result<T, Error<K>>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error<K> {
    /// Key is not resident in the cache
    NotFound(K),

    /// Capacity must be at least 1
    InvalidCapacity(usize),
}

impl<K> Error<K> {
    /// The key that caused a `NotFound` error
    pub fn key(&self) -> Option<&K> {
        match self {
            Error::NotFound(key) => Some(key),
            Error::InvalidCapacity(_) => None,
        }
    }

    /// Returns `true` for a cache miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl<K: fmt::Debug> fmt::Display for Error<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound(key) => write!(f, "no such key in cache: {:?}", key),
            Error::InvalidCapacity(capacity) => {
                write!(f, "invalid capacity: {} (must be at least 1)", capacity)
            }
        }
    }
}

impl<K: fmt::Debug> std::error::Error for Error<K> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err: Error<i32> = Error::NotFound(7);
        assert_eq!(err.to_string(), "no such key in cache: 7");
        assert_eq!(err.key(), Some(&7));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_invalid_capacity_display() {
        let err: Error<String> = Error::InvalidCapacity(0);
        assert!(err.to_string().contains("capacity"));
        assert_eq!(err.key(), None);
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_string_key_is_quoted() {
        let err = Error::NotFound("session".to_string());
        assert_eq!(err.to_string(), "no such key in cache: \"session\"");
    }

    #[test]
    fn test_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<Error<u64>>();
    }
}
