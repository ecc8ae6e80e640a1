//! Execution strategies for dispatch cycles

use crate::{
    assembler::ResultRecord,
    chunker::SubChunk,
    config::DispatchConfig,
    error::{EngineError, Result},
    transform::LineTransform,
};

#[cfg(feature = "parallel")]
pub mod parallel;
pub mod sequential;

// Re-export executors
#[cfg(feature = "parallel")]
pub use parallel::ParallelExecutor;
pub use sequential::SequentialExecutor;

/// Execution mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Sub-chunks run one after another on the calling thread
    Sequential,
    /// Sub-chunks run concurrently on a dedicated worker pool
    Parallel,
}

/// Trait for execution strategies
///
/// An executor runs every sub-chunk of one cycle and returns when all of them
/// are done. The returned records may be in any order; each carries the
/// dispatch index of its sub-chunk.
pub trait Executor: Send + Sync {
    /// Transform all sub-chunks of a cycle
    fn execute(
        &self,
        chunks: &[SubChunk],
        transform: &dyn LineTransform,
    ) -> Result<Vec<ResultRecord>>;

    /// Get the execution mode
    fn mode(&self) -> ExecutionMode;
}

/// Build the executor matching `config`
pub fn build_executor(config: &DispatchConfig) -> Result<Box<dyn Executor>> {
    match config.execution_mode() {
        ExecutionMode::Sequential => Ok(Box::new(SequentialExecutor)),
        #[cfg(feature = "parallel")]
        ExecutionMode::Parallel => Ok(Box::new(ParallelExecutor::new(config)?)),
        #[cfg(not(feature = "parallel"))]
        ExecutionMode::Parallel => Ok(Box::new(SequentialExecutor)),
    }
}

/// Apply `transform` to every line of one sub-chunk
pub fn transform_sub_chunk(
    chunk: &SubChunk,
    transform: &dyn LineTransform,
) -> Result<ResultRecord> {
    let mut lines = Vec::with_capacity(chunk.lines.len());
    for (offset, line) in chunk.lines.iter().enumerate() {
        transform
            .apply(line, &mut lines)
            .map_err(|source| EngineError::TransformFailed {
                line: chunk.first_line + offset,
                source,
            })?;
    }
    Ok(ResultRecord {
        index: chunk.index,
        lines,
    })
}
