//! CLI command implementations

use crate::config::CliConfig;
use crate::error::CliResult;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod generate_config;
pub mod iqtree;
pub mod process;

/// IQ-Tree job generation and chunked parallel line processing
#[derive(Debug, Parser)]
#[command(name = "phylokit", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file with default settings
    #[arg(short, long, global = true, value_name = "FILE", env = "PHYLOKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate IQ-Tree per-locus, concatenation and concordance SLURM jobs
    Iqtree(iqtree::IqtreeArgs),

    /// Transform text files line by line on a worker pool
    Process(process::ProcessArgs),

    /// Write a configuration file template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Cli {
    /// Run the selected command
    pub fn execute(&self) -> CliResult<()> {
        if let Commands::GenerateConfig(args) = &self.command {
            return args.execute();
        }

        let config = CliConfig::load_or_default(self.config.as_deref())?;
        match &self.command {
            Commands::Iqtree(args) => args.execute(&config),
            Commands::Process(args) => args.execute(&config, self.quiet),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }

    /// Log level selected by `-v` flags
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if !self.quiet {
            env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(self.log_level()),
            )
            .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::parse_from(["phylokit", "-vv", "process", "-i", "a.txt"]);
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::parse_from(["phylokit", "process", "-i", "a.txt"]);
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_iqtree_accepts_negative_numbers() {
        let cli = Cli::parse_from(["phylokit", "iqtree", "--tasks", "-3", "--part", "short"]);
        match cli.command {
            Commands::Iqtree(args) => {
                assert_eq!(args.tasks, Some(-3));
                assert_eq!(args.partition.as_deref(), Some("short"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_process_transform_value() {
        let cli = Cli::parse_from([
            "phylokit", "process", "-i", "a.txt", "-t", "split-tabs", "-w", "2",
        ]);
        match cli.command {
            Commands::Process(args) => {
                assert_eq!(
                    args.transform,
                    Some(crate::transforms::BuiltinTransform::SplitTabs)
                );
                assert_eq!(args.workers, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
