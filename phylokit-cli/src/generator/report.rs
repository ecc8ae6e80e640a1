//! Batch command file rendering

use super::settings::NameSource;
use super::GenerationPlan;
use serde::Serialize;
use std::fmt::Write;

/// Width labels are padded to in the batch file header
pub const LABEL_WIDTH: usize = 26;

/// When and how the generator was run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInfo {
    /// phylokit version
    pub version: String,
    /// Command line as typed
    pub invocation: String,
    /// Local time, `MM/DD/YYYY HH:MM:SS`
    pub timestamp: String,
}

impl RunInfo {
    /// Capture the current process's version, arguments and time
    pub fn capture() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            invocation: std::env::args_os()
                .map(|arg| arg.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join(" "),
            timestamp: chrono::Local::now()
                .format("%m/%d/%Y %H:%M:%S")
                .to_string(),
        }
    }
}

/// `label` right-padded with spaces to `width` characters
pub fn padded(label: &str, width: usize) -> String {
    format!("{label:<width$}")
}

fn field(out: &mut String, label: &str, value: impl std::fmt::Display) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}{value}", padded(label, LABEL_WIDTH));
}

/// Render the batch command file: run-info header, one command per locus,
/// then a commented footer with the aggregation commands
pub fn render_batch_file(plan: &GenerationPlan, info: &RunInfo) -> String {
    let settings = &plan.settings;
    let layout = &plan.layout;
    let mut out = String::from("#!/bin/bash\n# phylokit IQ-Tree command generator\n");

    field(&mut out, "# PHYLOKIT VERSION:", &info.version);
    field(&mut out, "# Invocation:", &info.invocation);
    field(&mut out, "# Runtime:", &info.timestamp);
    out.push_str("# ----------------\n");

    out.push_str("# IO OPTIONS\n");
    field(&mut out, "# Input directory:", settings.input_dir.display());
    field(&mut out, "# File extension:", &settings.extension);
    field(&mut out, "# IQ-Tree path:", &settings.tool_path);
    field(&mut out, "# Bootstrap replicates:", settings.bootstrap);
    if settings.name_source == NameSource::OutputDir {
        field(
            &mut out,
            "# --outname:",
            "Using end of output directory path as job name.",
        );
    }
    if settings.name_source == NameSource::Random {
        out.push_str("# -n not specified --> Generating random string for job name\n");
    }
    field(&mut out, "# Job name:", &settings.job_name);
    field(&mut out, "# Output directory:", settings.output_dir.display());
    if settings.overwrite {
        field(
            &mut out,
            "# --overwrite set:",
            "Overwriting previous files in output directory.",
        );
    }
    field(&mut out, "# Loci tree directory:", layout.loci_dir.display());
    field(&mut out, "# Concatenation directory:", layout.concat_dir.display());
    field(&mut out, "# Concordance directory:", layout.concord_dir.display());
    field(&mut out, "# Logfile directory:", layout.log_dir.display());
    field(&mut out, "# Job file:", layout.loci_cmds_file.display());
    out.push_str("# ----------\n");

    let resources = &plan.loci_job.resources;
    out.push_str("# SLURM OPTIONS\n");
    field(&mut out, "# Loci submit file:", layout.loci_submit_file.display());
    field(&mut out, "# Concat submit file:", layout.concat_submit_file.display());
    field(&mut out, "# SLURM partition:", &resources.partition);
    field(&mut out, "# SLURM nodes:", resources.nodes);
    field(&mut out, "# SLURM ntasks:", resources.ntasks);
    field(&mut out, "# SLURM cpus-per-task:", resources.cpus_per_task);
    field(&mut out, "# SLURM mem:", resources.mem);
    out.push_str("# ----------\n");
    out.push_str("# BEGIN CMDS\n");

    for locus in &plan.loci {
        out.push_str(&locus.command);
        out.push('\n');
    }

    out.push_str("# ----------\n");
    field(&mut out, "# Files skipped:", plan.skipped);
    let _ = writeln!(
        out,
        "# Writing concat commands to {}",
        layout.concat_submit_file.display()
    );
    for command in plan.aggregate_job.commands() {
        let _ = writeln!(out, "# {command}");
    }
    out
}
