//! Resolution and validation of generator settings

use crate::error::ValidationError;
use crate::jobspec::SlurmResources;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Minimum number of ultrafast bootstrap replicates IQ-Tree accepts
pub const MIN_BOOTSTRAP: i64 = 1000;

/// Length of generated job names
pub const RANDOM_NAME_LEN: usize = 6;

/// Raw generator options after merging command line and config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// `-i`
    pub input: Option<PathBuf>,
    /// `-o`
    pub output: Option<PathBuf>,
    /// `-n`
    pub name: Option<String>,
    /// Take the job name from the output directory
    pub outname: bool,
    /// Allow an existing output directory
    pub overwrite: bool,
    /// `-b`
    pub bootstrap: i64,
    /// IQ-Tree executable
    pub tool_path: String,
    /// Alignment file extension
    pub extension: String,
    /// SLURM partition
    pub partition: Option<String>,
    /// SLURM nodes
    pub nodes: i64,
    /// SLURM tasks
    pub tasks: i64,
    /// SLURM CPUs per task
    pub cpus: i64,
    /// SLURM memory
    pub mem: i64,
    /// Notification email
    pub email: Option<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            name: None,
            outname: false,
            overwrite: false,
            bootstrap: MIN_BOOTSTRAP,
            tool_path: "iqtree".to_string(),
            extension: ".fa".to_string(),
            partition: None,
            nodes: 1,
            tasks: 1,
            cpus: 1,
            mem: 0,
            email: None,
        }
    }
}

/// Where the job name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameSource {
    /// Given with `-n`
    Explicit,
    /// Last component of the output directory (`--outname`)
    OutputDir,
    /// Generated
    Random,
}

/// Validated, immutable generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorSettings {
    /// Absolute input directory
    pub input_dir: PathBuf,
    /// Absolute output directory
    pub output_dir: PathBuf,
    /// Job name used for file names and `--job-name`
    pub job_name: String,
    /// How the job name was chosen
    pub name_source: NameSource,
    /// Whether an existing output directory is reused
    pub overwrite: bool,
    /// Bootstrap replicates
    pub bootstrap: u64,
    /// IQ-Tree executable
    pub tool_path: String,
    /// Alignment file extension
    pub extension: String,
    /// SLURM partition
    pub partition: String,
    /// SLURM nodes
    pub nodes: u32,
    /// SLURM tasks, also the number of concurrent locus runs
    pub tasks: u32,
    /// SLURM CPUs per task
    pub cpus: u32,
    /// SLURM memory
    pub mem: u64,
    /// Notification email
    pub email: String,
}

impl GeneratorSettings {
    /// Check every precondition in order and build the settings
    ///
    /// Only reads the filesystem; nothing is created or modified. `rng` is
    /// used only when a job name has to be generated.
    pub fn resolve(
        options: &GeneratorOptions,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, ValidationError> {
        let input_dir = options
            .input
            .as_deref()
            .filter(|p| p.is_dir())
            .map(absolute)
            .ok_or(ValidationError::InputDir)?;

        let output_dir = options
            .output
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .map(absolute)
            .ok_or(ValidationError::OutputDirMissing)?;

        let (job_name, name_source) = resolve_job_name(options, &output_dir, rng);

        if output_dir.exists() && !options.overwrite {
            return Err(ValidationError::OutputDirExists);
        }

        if options.bootstrap < MIN_BOOTSTRAP {
            return Err(ValidationError::Bootstrap);
        }
        let bootstrap = options.bootstrap as u64;

        let partition = non_empty(&options.partition).ok_or(ValidationError::Partition)?;
        let nodes = positive(options.nodes).ok_or(ValidationError::Nodes)?;
        let tasks = positive(options.tasks).ok_or(ValidationError::Tasks)?;
        let cpus = positive(options.cpus).ok_or(ValidationError::Cpus)?;
        let mem = u64::try_from(options.mem).map_err(|_| ValidationError::Mem)?;
        let email = non_empty(&options.email).ok_or(ValidationError::Email)?;

        Ok(Self {
            input_dir,
            output_dir,
            job_name,
            name_source,
            overwrite: options.overwrite,
            bootstrap,
            tool_path: options.tool_path.clone(),
            extension: options.extension.clone(),
            partition,
            nodes,
            tasks,
            cpus,
            mem,
            email,
        })
    }

    /// Resources for the per-locus fan-out job
    pub fn loci_resources(&self) -> SlurmResources {
        SlurmResources {
            partition: self.partition.clone(),
            nodes: self.nodes,
            ntasks: self.tasks,
            cpus_per_task: self.cpus,
            mem: self.mem,
            mail_user: self.email.clone(),
        }
    }

    /// Resources for the concatenation/concordance job
    ///
    /// One task that gets as many CPUs as the fan-out job had tasks.
    pub fn aggregate_resources(&self) -> SlurmResources {
        SlurmResources {
            ntasks: 1,
            cpus_per_task: self.tasks,
            ..self.loci_resources()
        }
    }
}

fn resolve_job_name(
    options: &GeneratorOptions,
    output_dir: &Path,
    rng: &mut fastrand::Rng,
) -> (String, NameSource) {
    if options.outname {
        if let Some(base) = output_dir.file_name() {
            return (base.to_string_lossy().into_owned(), NameSource::OutputDir);
        }
    }
    match non_empty(&options.name) {
        Some(name) => (name, NameSource::Explicit),
        None => (random_job_name(rng, RANDOM_NAME_LEN), NameSource::Random),
    }
}

/// Random ASCII-letter name
pub fn random_job_name(rng: &mut fastrand::Rng, len: usize) -> String {
    (0..len).map(|_| rng.alphabetic()).collect()
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v >= 1)
}
