//! Generate config command implementation

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = "phylokit.toml")]
    pub output: PathBuf,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            bail!(
                "{} already exists; use --force to replace it",
                self.output.display()
            );
        }

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Set your cluster partition and email under [slurm]");
        println!("2. Use it when generating jobs:");
        println!(
            "   phylokit -c {} iqtree -i alignments/ -o run/",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content
    pub fn template() -> &'static str {
        r#"# phylokit configuration
#
# Every value here is a default. Command-line flags take precedence, and
# PHYLOKIT_PARTITION / PHYLOKIT_EMAIL take precedence over this file.

[iqtree]
# IQ-Tree executable
path = "iqtree"
# Ultrafast bootstrap replicates (at least 1000)
bootstrap = 1000
# Only input files ending with this are used as loci
extension = ".fa"

[slurm]
# partition = "short"
# email = "you@example.org"
nodes = 1
# Also the number of loci run at once
tasks = 1
cpus = 1
# 0 requests all memory on the node
mem = 0

[processing]
# 0 uses one worker per CPU
workers = 0
lines_per_worker = 10000
# passthrough, trim, upper, lower, drop-blank or split-tabs
transform = "passthrough"
"#
    }
}
