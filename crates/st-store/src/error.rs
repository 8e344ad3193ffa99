//! Error types for durable storage.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a store or a binding.
///
/// Payloads are plain strings so the latest error can be cloned out of a
/// binding's error slot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded writing '{key}' (limit {quota} bytes)")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Capacity of the store in bytes.
        quota: usize,
    },

    /// The value could not be serialized.
    #[error("failed to serialize value for '{key}': {message}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Serializer message.
        message: String,
    },

    /// The stored or notified text is not a valid value of the expected shape.
    #[error("failed to parse value for '{key}': {message}")]
    Deserialize {
        /// Key being read.
        key: String,
        /// Parser message.
        message: String,
    },

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}
