//! IQ-Tree/SLURM job generation
//!
//! Settings are resolved and validated first ([`GeneratorSettings::resolve`]),
//! then turned into a [`GenerationPlan`] that holds every path, command and
//! job specification. Nothing touches the filesystem until
//! [`GenerationPlan::write`] is called.

pub mod commands;
pub mod layout;
pub mod report;
pub mod settings;

pub use commands::{concat_command, concord_command, LocusJob};
pub use layout::JobLayout;
pub use report::{render_batch_file, RunInfo};
pub use settings::{GeneratorOptions, GeneratorSettings, NameSource};

use crate::input::AlignmentListing;
use crate::jobspec::{JobBody, JobSpec, Submitter};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;

/// Everything a generator run will produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Validated settings
    pub settings: GeneratorSettings,
    /// Output paths
    pub layout: JobLayout,
    /// One run per matched alignment, in file name order
    pub loci: Vec<LocusJob>,
    /// Input directory entries that did not match the extension
    pub skipped: usize,
    /// Fan-out job over the batch command file
    pub loci_job: JobSpec,
    /// Concatenation followed by concordance
    pub aggregate_job: JobSpec,
}

#[derive(Serialize)]
struct Manifest<'a> {
    run: &'a RunInfo,
    settings: &'a GeneratorSettings,
    layout: &'a JobLayout,
    loci: &'a [LocusJob],
    skipped: usize,
    jobs: [&'a JobSpec; 2],
}

impl GenerationPlan {
    /// Plan the job for the alignments in `listing`
    pub fn build(settings: GeneratorSettings, listing: &AlignmentListing) -> Self {
        let layout = JobLayout::new(&settings.output_dir, &settings.job_name);
        let loci = listing
            .matched
            .iter()
            .map(|path| LocusJob::new(&settings, &layout, path))
            .collect();

        let loci_job = JobSpec {
            name: settings.job_name.clone(),
            script_path: layout.loci_submit_file.clone(),
            resources: settings.loci_resources(),
            body: JobBody::Parallel {
                jobs: settings.tasks,
                command_file: layout.loci_cmds_file.clone(),
            },
        };

        let aggregate_job = JobSpec {
            name: settings.job_name.clone(),
            script_path: layout.concat_submit_file.clone(),
            resources: settings.aggregate_resources(),
            body: JobBody::Sequential {
                commands: vec![
                    concat_command(&settings, &layout),
                    concord_command(&settings, &layout),
                ],
            },
        };

        Self {
            settings,
            layout,
            loci,
            skipped: listing.skipped,
            loci_job,
            aggregate_job,
        }
    }

    /// Batch command file contents
    pub fn batch_file(&self, info: &RunInfo) -> String {
        render_batch_file(self, info)
    }

    /// Manifest contents as pretty-printed JSON
    pub fn manifest(&self, info: &RunInfo) -> Result<String> {
        let manifest = Manifest {
            run: info,
            settings: &self.settings,
            layout: &self.layout,
            loci: &self.loci,
            skipped: self.skipped,
            jobs: [&self.loci_job, &self.aggregate_job],
        };
        serde_json::to_string_pretty(&manifest).context("Failed to serialize job manifest")
    }

    /// Create directories and write the batch file, both job scripts and
    /// the manifest
    pub fn write(&self, info: &RunInfo, submitter: &mut dyn Submitter) -> Result<()> {
        self.layout.create_directories()?;
        for locus in &self.loci {
            layout::create_dir(&locus.output_dir)?;
        }

        let batch = &self.layout.loci_cmds_file;
        fs::write(batch, self.batch_file(info))
            .with_context(|| format!("Failed to write batch file: {}", batch.display()))?;
        log::info!("Wrote {} commands to {}", self.loci.len(), batch.display());

        submitter.submit(&self.loci_job)?;
        submitter.submit(&self.aggregate_job)?;

        let manifest = &self.layout.manifest_file;
        fs::write(manifest, self.manifest(info)?)
            .with_context(|| format!("Failed to write manifest: {}", manifest.display()))?;
        Ok(())
    }

    /// Render the job scripts through `submitter` without touching the
    /// filesystem, returning the batch file contents
    pub fn preview(&self, info: &RunInfo, submitter: &mut dyn Submitter) -> Result<String> {
        submitter.submit(&self.loci_job)?;
        submitter.submit(&self.aggregate_job)?;
        Ok(self.batch_file(info))
    }
}
