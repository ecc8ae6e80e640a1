//! phylokit CLI library
//!
//! Command-line front end for generating IQ-Tree/SLURM job files and for
//! running text files through the chunked parallel dispatcher of
//! `phylokit-engine`.

pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod input;
pub mod jobspec;
pub mod output;
pub mod progress;
pub mod transforms;

pub use error::{CliError, CliResult};
