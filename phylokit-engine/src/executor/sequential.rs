//! Sequential execution strategy

use crate::{
    assembler::ResultRecord,
    chunker::SubChunk,
    error::Result,
    executor::{transform_sub_chunk, ExecutionMode, Executor},
    transform::LineTransform,
};

/// Sequential single-threaded executor
#[derive(Debug, Clone)]
pub struct SequentialExecutor;

impl Executor for SequentialExecutor {
    fn execute(
        &self,
        chunks: &[SubChunk],
        transform: &dyn LineTransform,
    ) -> Result<Vec<ResultRecord>> {
        chunks
            .iter()
            .map(|chunk| transform_sub_chunk(chunk, transform))
            .collect()
    }

    fn mode(&self) -> ExecutionMode {
        ExecutionMode::Sequential
    }
}
