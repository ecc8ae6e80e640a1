//! Error types for the chunked dispatcher

use thiserror::Error;

/// Boxed error returned by a line transform
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// Worker pool could not be created
    #[error("failed to build worker pool: {0}")]
    PoolError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The per-line transform failed; the whole run is aborted
    #[error("transform failed on line {line}: {source}")]
    TransformFailed {
        /// 1-based input line number
        line: usize,
        /// The error reported by the transform
        #[source]
        source: BoxError,
    },

    /// Result records did not line up with the dispatched sub-chunks
    #[error("result for sub-chunk {found} arrived where sub-chunk {expected} was expected")]
    OutOfOrder {
        /// Dispatch index that should have come next
        expected: usize,
        /// Dispatch index that was found instead
        found: usize,
    },
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_error_display_carries_line() {
        let err = EngineError::TransformFailed {
            line: 42,
            source: "bad field".into(),
        };
        assert_eq!(err.to_string(), "transform failed on line 42: bad field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "not utf-8");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::IoError(_)));
        assert!(err.to_string().contains("not utf-8"));
    }
}
