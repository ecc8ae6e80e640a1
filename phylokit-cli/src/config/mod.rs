//! Configuration module
//!
//! Values here are defaults only. Command-line flags (and their environment
//! variables) take precedence over anything read from the file.

use crate::transforms::BuiltinTransform;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// IQ-Tree invocation defaults
    #[serde(default)]
    pub iqtree: IqtreeConfig,

    /// SLURM directive defaults
    #[serde(default)]
    pub slurm: SlurmConfig,

    /// Line processing defaults
    #[serde(default)]
    pub processing: ProcessingConfig,
}

/// IQ-Tree-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct IqtreeConfig {
    /// Path to the IQ-Tree executable
    pub path: String,

    /// Bootstrap replicates
    pub bootstrap: i64,

    /// Alignment file extension filter
    pub extension: String,
}

impl Default for IqtreeConfig {
    fn default() -> Self {
        Self {
            path: "iqtree".to_string(),
            bootstrap: 1000,
            extension: ".fa".to_string(),
        }
    }
}

/// SLURM-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SlurmConfig {
    /// Partition to submit to
    pub partition: Option<String>,

    /// Notification email
    pub email: Option<String>,

    /// `--nodes`
    pub nodes: i64,

    /// `--ntasks`
    pub tasks: i64,

    /// `--cpus-per-task`
    pub cpus: i64,

    /// `--mem` (0 requests all memory on the node)
    pub mem: i64,
}

impl Default for SlurmConfig {
    fn default() -> Self {
        Self {
            partition: None,
            email: None,
            nodes: 1,
            tasks: 1,
            cpus: 1,
            mem: 0,
        }
    }
}

/// Line processing configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Number of worker threads (0 = one per CPU)
    pub workers: usize,

    /// Lines handed to each worker per cycle
    pub lines_per_worker: usize,

    /// Transform applied when none is given on the command line
    pub transform: BuiltinTransform,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            lines_per_worker: phylokit_engine::DEFAULT_LINES_PER_WORKER,
            transform: BuiltinTransform::Passthrough,
        }
    }
}

impl ProcessingConfig {
    /// Worker count with `0` resolved to the number of CPUs
    pub fn resolved_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get().max(1)
        } else {
            self.workers
        }
    }
}

impl CliConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse configuration")
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                Self::load(path)
            }
            None => Ok(Self::default()),
        }
    }
}
