//! Error types for survey storage.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// A missing survey or result set is not an error; lookups return `Ok(None)`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data in the database.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The largest numeric survey id has no successor.
    #[error("no survey id follows {0}")]
    IdsExhausted(u64),

    /// Schema migration failed.
    #[error("migration failed: {0}")]
    Migration(String),

    /// A writer panicked while holding a collection lock.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidData("results for 7 are not an array".into());
        assert_eq!(
            err.to_string(),
            "invalid data: results for 7 are not an array"
        );
    }

    #[test]
    fn test_ids_exhausted_display() {
        let err = StoreError::IdsExhausted(u64::MAX);
        assert_eq!(err.to_string(), "no survey id follows 18446744073709551615");
    }

    #[test]
    fn test_poison_conversion() {
        let lock = std::sync::Mutex::new(());
        let _ = std::panic::catch_unwind(|| {
            let _guard = lock.lock().unwrap();
            panic!("poison");
        });
        let err: StoreError = lock.lock().unwrap_err().into();
        assert!(matches!(err, StoreError::LockPoisoned));
    }
}
