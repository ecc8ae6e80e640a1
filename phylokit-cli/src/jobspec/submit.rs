//! Submission adapters that consume job specifications

use super::JobSpec;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Consumes rendered job specifications
pub trait Submitter {
    /// Hand one job to the scheduler side
    fn submit(&mut self, spec: &JobSpec) -> Result<()>;
}

/// Writes each job's script to its `script_path`
///
/// The scripts are left for the user to pass to `sbatch`.
#[derive(Debug, Default)]
pub struct ScriptWriter {
    written: Vec<PathBuf>,
}

impl ScriptWriter {
    /// Create a new script writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Submitter for ScriptWriter {
    fn submit(&mut self, spec: &JobSpec) -> Result<()> {
        let path = &spec.script_path;
        fs::write(path, spec.render())
            .with_context(|| format!("Failed to write job script: {}", path.display()))?;
        make_executable(path)?;
        log::info!("Wrote job script {}", path.display());
        self.written.push(path.clone());
        Ok(())
    }
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)
        .with_context(|| format!("Failed to get metadata for: {}", path.display()))?
        .permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)
        .with_context(|| format!("Failed to set permissions on: {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &std::path::Path) -> Result<()> {
    Ok(())
}

/// Keeps rendered scripts in memory instead of writing them
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    /// `(script path, script text)` in submission order
    pub scripts: Vec<(PathBuf, String)>,
}

impl RecordingSubmitter {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }
}

impl Submitter for RecordingSubmitter {
    fn submit(&mut self, spec: &JobSpec) -> Result<()> {
        self.scripts.push((spec.script_path.clone(), spec.render()));
        Ok(())
    }
}
