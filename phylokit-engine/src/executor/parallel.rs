//! Parallel execution strategy

use crate::{
    assembler::ResultRecord,
    chunker::SubChunk,
    config::DispatchConfig,
    error::{EngineError, Result},
    executor::{transform_sub_chunk, ExecutionMode, Executor},
    transform::LineTransform,
};
use rayon::prelude::*;

/// Parallel executor backed by a dedicated rayon pool
///
/// The pool is sized to the configured worker count and is reused for every
/// cycle of a run.
#[derive(Debug)]
pub struct ParallelExecutor {
    pool: rayon::ThreadPool,
}

impl ParallelExecutor {
    /// Create a new parallel executor
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let prefix = config.thread_name_prefix.clone();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()
            .map_err(|e| EngineError::PoolError(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Number of threads in the pool
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for ParallelExecutor {
    fn execute(
        &self,
        chunks: &[SubChunk],
        transform: &dyn LineTransform,
    ) -> Result<Vec<ResultRecord>> {
        self.pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| transform_sub_chunk(chunk, transform))
                .collect::<Result<Vec<_>>>()
        })
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunker::split_into_sub_chunks;
    use crate::transform::MapLines;

    #[test]
    fn test_pool_has_requested_workers() {
        let executor = ParallelExecutor::new(&DispatchConfig::new(3, 2)).unwrap();
        assert_eq!(executor.workers(), 3);
        assert_eq!(executor.mode(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_runs_on_named_worker_threads() {
        let executor = ParallelExecutor::new(&DispatchConfig::new(2, 1)).unwrap();
        let chunks = split_into_sub_chunks(vec!["a".into(), "b".into()], 1, 1);
        let thread_name = MapLines(|_: &str| {
            std::thread::current()
                .name()
                .unwrap_or_default()
                .to_string()
        });

        let records = executor.execute(&chunks, &thread_name).unwrap();
        for record in records {
            assert!(record.lines[0].starts_with("phylokit-worker-"));
        }
    }
}
