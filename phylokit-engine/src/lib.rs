//! Bounded, order-preserving parallel line processing
//!
//! This crate reads text line by line, buffers a fixed number of lines,
//! splits the buffer into sub-chunks, transforms the sub-chunks on a worker
//! pool and writes the results back in input order.
//!
//! ```
//! use phylokit_engine::{ChunkedDispatcher, DispatchConfig, MapLines};
//!
//! let dispatcher = ChunkedDispatcher::new(DispatchConfig::new(2, 2)).unwrap();
//! let out = dispatcher
//!     .process_lines(["a", "b", "c"], &MapLines(|s: &str| s.to_uppercase()))
//!     .unwrap();
//! assert_eq!(out, vec!["A", "B", "C"]);
//! ```

#![warn(missing_docs)]

pub mod assembler;
pub mod chunker;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod input;
pub mod transform;

// Re-export key types
pub use assembler::{ResultAssembler, ResultRecord};
pub use chunker::{LineBuffer, SubChunk};
pub use config::{DispatchConfig, DEFAULT_LINES_PER_WORKER};
pub use dispatcher::{ChunkedDispatcher, CycleReport, DispatchSummary};
pub use error::{BoxError, EngineError, Result};
pub use executor::{ExecutionMode, Executor};
pub use input::Input;
pub use transform::{FlatMapLines, LineTransform, MapLines, Passthrough};
