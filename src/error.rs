use thiserror::Error;

/// Errors reported by [`ChainedHashMap`](crate::ChainedHashMap)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// The map does not support this operation. Removal is never available.
    #[error("unsupported operation: {operation}")]
    UnsupportedOperation {
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// A table must hold at least one bucket
    #[error("initial capacity must be positive, got {0}")]
    InvalidCapacity(usize),

    /// The maximum load factor must be finite and greater than zero
    #[error("max load factor must be a positive finite number, got {0}")]
    InvalidLoadFactor(f64),
}

/// Result alias used by the map's fallible operations
pub type Result<T> = std::result::Result<T, MapError>;
