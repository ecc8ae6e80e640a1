//! Configuration types for the engine

use crate::{
    error::{EngineError, Result},
    executor::ExecutionMode,
};

/// Default number of lines handed to each worker per cycle
pub const DEFAULT_LINES_PER_WORKER: usize = 10_000;

/// Dispatch configuration
///
/// A cycle buffers `workers * lines_per_worker` lines, so the product bounds
/// how many lines are in memory at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Number of workers in the pool
    pub workers: usize,
    /// Maximum lines in one sub-chunk
    pub lines_per_worker: usize,
    /// Prefix for worker thread names
    pub thread_name_prefix: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            lines_per_worker: DEFAULT_LINES_PER_WORKER,
            thread_name_prefix: "phylokit-worker".to_string(),
        }
    }
}

impl DispatchConfig {
    /// Create a configuration with the given pool shape
    pub fn new(workers: usize, lines_per_worker: usize) -> Self {
        Self {
            workers,
            lines_per_worker,
            ..Default::default()
        }
    }

    /// Check the configuration and return the cycle capacity
    pub fn validate(&self) -> Result<usize> {
        if self.workers == 0 {
            return Err(EngineError::ConfigError(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.lines_per_worker == 0 {
            return Err(EngineError::ConfigError(
                "lines per worker must be at least 1".to_string(),
            ));
        }
        self.workers
            .checked_mul(self.lines_per_worker)
            .ok_or_else(|| {
                EngineError::ConfigError(format!(
                    "cycle capacity overflows: {} workers x {} lines",
                    self.workers, self.lines_per_worker
                ))
            })
    }

    /// Execution mode implied by the worker count
    pub fn execution_mode(&self) -> ExecutionMode {
        if self.workers > 1 && cfg!(feature = "parallel") {
            ExecutionMode::Parallel
        } else {
            ExecutionMode::Sequential
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_returns_capacity() {
        assert_eq!(DispatchConfig::new(4, 250).validate().unwrap(), 1000);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let err = DispatchConfig::new(0, 10).validate().unwrap_err();
        assert!(err.to_string().contains("worker count"));
    }

    #[test]
    fn test_zero_lines_rejected() {
        let err = DispatchConfig::new(2, 0).validate().unwrap_err();
        assert!(err.to_string().contains("lines per worker"));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(DispatchConfig::new(usize::MAX, 2).validate().is_err());
    }

    #[test]
    fn test_single_worker_is_sequential() {
        assert_eq!(
            DispatchConfig::new(1, 5).execution_mode(),
            ExecutionMode::Sequential
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_multiple_workers_is_parallel() {
        assert_eq!(
            DispatchConfig::new(3, 5).execution_mode(),
            ExecutionMode::Parallel
        );
    }
}
