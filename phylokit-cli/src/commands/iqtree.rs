//! IQ-Tree command generator

use crate::config::CliConfig;
use crate::error::CliError;
use crate::generator::{GenerationPlan, GeneratorOptions, GeneratorSettings, RunInfo};
use crate::input::list_alignments;
use crate::jobspec::{RecordingSubmitter, ScriptWriter};
use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the iqtree command
#[derive(Debug, Default, Args)]
pub struct IqtreeArgs {
    /// Directory containing one alignment file per locus
    #[arg(short, long, value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output directory for trees, logs and job files
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Ultrafast bootstrap replicates (at least 1000) [default: 1000]
    #[arg(short, long, allow_negative_numbers = true)]
    pub bootstrap: Option<i64>,

    /// Job name (random when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path to the IQ-Tree executable [default: iqtree]
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<String>,

    /// Only use input files ending with this [default: .fa]
    #[arg(short, long = "ext", value_name = "EXT")]
    pub extension: Option<String>,

    /// Use the last component of the output directory as the job name
    #[arg(long)]
    pub outname: bool,

    /// Reuse an existing output directory
    #[arg(long)]
    pub overwrite: bool,

    /// SLURM partition
    #[arg(long, visible_alias = "part", env = "PHYLOKIT_PARTITION")]
    pub partition: Option<String>,

    /// SLURM nodes [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub nodes: Option<i64>,

    /// SLURM tasks, also the number of loci run at once [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub tasks: Option<i64>,

    /// SLURM CPUs per task [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub cpus: Option<i64>,

    /// SLURM memory, 0 for all memory on the node [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    pub mem: Option<i64>,

    /// Email address for SLURM notifications
    #[arg(long, env = "PHYLOKIT_EMAIL")]
    pub email: Option<String>,

    /// Print the batch file and job scripts instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl IqtreeArgs {
    /// Merge with config file defaults; flags win
    pub fn options(&self, config: &CliConfig) -> GeneratorOptions {
        let iqtree = &config.iqtree;
        let slurm = &config.slurm;
        GeneratorOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            name: self.name.clone(),
            outname: self.outname,
            overwrite: self.overwrite,
            bootstrap: self.bootstrap.unwrap_or(iqtree.bootstrap),
            tool_path: self.path.clone().unwrap_or_else(|| iqtree.path.clone()),
            extension: self
                .extension
                .clone()
                .unwrap_or_else(|| iqtree.extension.clone()),
            partition: self.partition.clone().or_else(|| slurm.partition.clone()),
            nodes: self.nodes.unwrap_or(slurm.nodes),
            tasks: self.tasks.unwrap_or(slurm.tasks),
            cpus: self.cpus.unwrap_or(slurm.cpus),
            mem: self.mem.unwrap_or(slurm.mem),
            email: self.email.clone().or_else(|| slurm.email.clone()),
        }
    }

    /// Execute the iqtree command
    pub fn execute(&self, config: &CliConfig) -> Result<()> {
        let options = self.options(config);
        log::debug!("Generator options: {:?}", options);

        let mut rng = fastrand::Rng::new();
        let settings = GeneratorSettings::resolve(&options, &mut rng).map_err(CliError::from)?;
        require_utf8(&settings.input_dir)?;
        require_utf8(&settings.output_dir)?;

        let listing = list_alignments(&settings.input_dir, &settings.extension)?;
        if listing.matched.is_empty() {
            log::warn!(
                "No files ending in {} found in {}",
                settings.extension,
                settings.input_dir.display()
            );
        }

        let plan = GenerationPlan::build(settings, &listing);
        let info = RunInfo::capture();

        if self.dry_run {
            let mut recorder = RecordingSubmitter::new();
            let batch = plan.preview(&info, &mut recorder)?;
            println!("==> {}", plan.layout.loci_cmds_file.display());
            print!("{batch}");
            for (path, script) in &recorder.scripts {
                println!();
                println!("==> {}", path.display());
                print!("{script}");
            }
            return Ok(());
        }

        let mut writer = ScriptWriter::new();
        plan.write(&info, &mut writer)?;

        println!("✓ Generated IQ-Tree job '{}'", plan.settings.job_name);
        println!("  Loci:         {}", plan.loci.len());
        println!("  Skipped:      {}", plan.skipped);
        println!("  Batch file:   {}", plan.layout.loci_cmds_file.display());
        println!("  Manifest:     {}", plan.layout.manifest_file.display());
        println!();
        println!("Next steps:");
        println!("1. Submit the per-locus job:");
        println!("   sbatch {}", plan.layout.loci_submit_file.display());
        println!(
            "2. Gather the locus trees into {}",
            plan.layout.loci_treefile.display()
        );
        println!("3. Submit the concatenation and concordance job:");
        println!("   sbatch {}", plan.layout.concat_submit_file.display());

        Ok(())
    }
}

/// Job scripts and the manifest embed paths as text
fn require_utf8(path: &Path) -> Result<()> {
    if path.to_str().is_none() {
        bail!(
            "Paths must be valid UTF-8 to be written into job scripts: {}",
            path.display()
        );
    }
    Ok(())
}
