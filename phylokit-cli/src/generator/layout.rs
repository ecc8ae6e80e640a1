//! Directory and file layout of a generated job

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Every path a generated job reads or writes, derived from the output
/// directory and the job name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobLayout {
    /// Root output directory
    pub output_dir: PathBuf,
    /// Batch file, command file and submission scripts
    pub job_dir: PathBuf,
    /// One subdirectory per locus
    pub loci_dir: PathBuf,
    /// Gathered per-locus trees, input to the concordance run
    pub loci_treefile: PathBuf,
    /// Concatenated (partitioned) analysis
    pub concat_dir: PathBuf,
    /// Concordance factor analysis
    pub concord_dir: PathBuf,
    /// Per-locus IQ-Tree terminal logs
    pub log_dir: PathBuf,
    /// One IQ-Tree command per line
    pub loci_cmds_file: PathBuf,
    /// Fan-out job script
    pub loci_submit_file: PathBuf,
    /// Aggregation job script
    pub concat_submit_file: PathBuf,
    /// Machine-readable run description
    pub manifest_file: PathBuf,
}

impl JobLayout {
    /// Derive the layout for `job_name` under `output_dir`
    pub fn new(output_dir: &Path, job_name: &str) -> Self {
        let job_dir = output_dir.join("job-files");
        Self {
            output_dir: output_dir.to_path_buf(),
            loci_dir: output_dir.join("loci"),
            loci_treefile: output_dir.join("loci.treefile"),
            concat_dir: output_dir.join("concat"),
            concord_dir: output_dir.join("concord"),
            log_dir: output_dir.join("logs"),
            loci_cmds_file: job_dir.join(format!("{job_name}_loci_cmds.sh")),
            loci_submit_file: job_dir.join(format!("{job_name}_loci_submit.sh")),
            concat_submit_file: job_dir.join(format!("{job_name}_concat_submit.sh")),
            manifest_file: job_dir.join(format!("{job_name}_manifest.json")),
            job_dir,
        }
    }

    /// Directories the job needs, parents first
    pub fn directories(&self) -> [&Path; 6] {
        [
            &self.output_dir,
            &self.job_dir,
            &self.loci_dir,
            &self.concat_dir,
            &self.concord_dir,
            &self.log_dir,
        ]
    }

    /// Create any missing directories
    ///
    /// Existing directories and their contents are left alone.
    pub fn create_directories(&self) -> Result<()> {
        for dir in self.directories() {
            create_dir(dir)?;
        }
        Ok(())
    }
}

/// Create `dir` and its parents unless it already exists
pub fn create_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        log::debug!("Directory exists: {}", dir.display());
        return Ok(());
    }
    log::info!("Creating directory: {}", dir.display());
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_follow_job_name() {
        let layout = JobLayout::new(Path::new("/scratch/run"), "demo");
        assert_eq!(layout.job_dir, Path::new("/scratch/run/job-files"));
        assert_eq!(
            layout.loci_cmds_file,
            Path::new("/scratch/run/job-files/demo_loci_cmds.sh")
        );
        assert_eq!(
            layout.concat_submit_file,
            Path::new("/scratch/run/job-files/demo_concat_submit.sh")
        );
        assert_eq!(
            layout.manifest_file,
            Path::new("/scratch/run/job-files/demo_manifest.json")
        );
        assert_eq!(layout.log_dir, Path::new("/scratch/run/logs"));
        assert_eq!(layout.loci_treefile, Path::new("/scratch/run/loci.treefile"));
    }

    #[test]
    fn test_create_directories_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("run");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("notes.txt"), "keep").unwrap();

        let layout = JobLayout::new(&out, "demo");
        layout.create_directories().unwrap();

        for dir in layout.directories() {
            assert!(dir.is_dir(), "{} missing", dir.display());
        }
        assert_eq!(fs::read_to_string(out.join("notes.txt")).unwrap(), "keep");
    }
}
