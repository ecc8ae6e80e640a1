//! Job specifications for the SLURM batch scheduler
//!
//! A [`JobSpec`] describes what to run and which resources to request. It is
//! rendered to a submission script without touching the filesystem; writing
//! (or otherwise consuming) the script is left to a [`Submitter`].

pub mod submit;

pub use submit::{RecordingSubmitter, ScriptWriter, Submitter};

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Resources requested through `#SBATCH` directives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlurmResources {
    /// `--partition`
    pub partition: String,
    /// `--nodes`
    pub nodes: u32,
    /// `--ntasks`
    pub ntasks: u32,
    /// `--cpus-per-task`
    pub cpus_per_task: u32,
    /// `--mem`
    pub mem: u64,
    /// `--mail-user`
    pub mail_user: String,
}

/// What a job runs once it starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobBody {
    /// Run every line of `command_file` through GNU parallel
    Parallel {
        /// Concurrent commands
        jobs: u32,
        /// File with one command per line
        command_file: PathBuf,
    },
    /// Run the commands one after another
    Sequential {
        /// Commands in execution order
        commands: Vec<String>,
    },
}

/// A complete job: name, resources, body and where its script goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    /// `--job-name`, also used for the log file pattern
    pub name: String,
    /// Destination of the rendered script
    pub script_path: PathBuf,
    /// Requested resources
    pub resources: SlurmResources,
    /// Commands to run
    pub body: JobBody,
}

impl JobSpec {
    /// Shell commands that follow the directive block
    pub fn commands(&self) -> Vec<String> {
        match &self.body {
            JobBody::Parallel { jobs, command_file } => {
                vec![format!("parallel -j {jobs} < {}", shell_path(command_file))]
            }
            JobBody::Sequential { commands } => commands.clone(),
        }
    }

    /// Render the submission script
    pub fn render(&self) -> String {
        let r = &self.resources;
        let mut script = format!(
            r#"#!/bin/bash
#SBATCH --job-name={name}
#SBATCH --output={name}-%j.out
#SBATCH --mail-type=ALL
#SBATCH --mail-user={email}
#SBATCH --partition={partition}
#SBATCH --nodes={nodes}
#SBATCH --ntasks={tasks}
#SBATCH --cpus-per-task={cpus}
#SBATCH --mem={mem}

"#,
            name = self.name,
            email = r.mail_user,
            partition = r.partition,
            nodes = r.nodes,
            tasks = r.ntasks,
            cpus = r.cpus_per_task,
            mem = r.mem,
        );
        for command in self.commands() {
            script.push_str(&command);
            script.push('\n');
        }
        script
    }
}

/// Path as a shell word, single-quoted only when it needs to be
pub fn shell_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    let plain = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+=:,@%".contains(c));
    if plain {
        text.into_owned()
    } else {
        format!("'{}'", text.replace('\'', r"'\''"))
    }
}
