//! Process command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::resolve_patterns;
use crate::output::open_output;
use crate::progress::ProgressReporter;
use crate::transforms::BuiltinTransform;
use anyhow::Result;
use clap::Args;
use phylokit_engine::{ChunkedDispatcher, DispatchConfig, DispatchSummary, Input};
use std::io;
use std::path::PathBuf;

/// Arguments for the process command
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Input files or patterns (supports glob); `-` reads stdin
    #[arg(short, long, value_name = "FILE/PATTERN", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Per-line transform [default: passthrough]
    #[arg(short, long, value_enum)]
    pub transform: Option<BuiltinTransform>,

    /// Worker threads [default: number of CPUs]
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Lines handed to each worker per cycle [default: 10000]
    #[arg(short, long, value_name = "LINES")]
    pub lines_per_worker: Option<usize>,
}

/// Where `process` reads lines from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input, selected with `-`
    Stdin,
    /// A file matched by an input pattern
    File(PathBuf),
}

impl Source {
    /// Name shown in progress output and errors
    pub fn name(&self) -> String {
        match self {
            Source::Stdin => "<stdin>".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }

    fn open(&self) -> Input {
        match self {
            Source::Stdin => Input::from_reader(io::stdin()),
            Source::File(path) => Input::from_file(path),
        }
    }
}

impl ProcessArgs {
    /// Resolve `-i` values; stdin is read before any file
    pub fn sources(&self) -> Result<Vec<Source>> {
        let (stdin, patterns): (Vec<&String>, Vec<&String>) =
            self.input.iter().partition(|p| p.as_str() == "-");

        let mut sources = Vec::new();
        if !stdin.is_empty() {
            sources.push(Source::Stdin);
        }
        if !patterns.is_empty() {
            let patterns: Vec<String> = patterns.into_iter().cloned().collect();
            sources.extend(resolve_patterns(&patterns)?.into_iter().map(Source::File));
        }
        Ok(sources)
    }

    /// Dispatcher settings after applying config file defaults
    pub fn dispatch_config(&self, config: &CliConfig) -> DispatchConfig {
        let processing = &config.processing;
        DispatchConfig::new(
            self.workers.unwrap_or_else(|| processing.resolved_workers()),
            self.lines_per_worker
                .unwrap_or(processing.lines_per_worker),
        )
    }

    /// Execute the process command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> Result<()> {
        log::info!("Starting line processing");
        log::debug!("Arguments: {:?}", self);

        let sources = self.sources()?;
        let transform = self.transform.unwrap_or(config.processing.transform);
        let dispatcher = ChunkedDispatcher::new(self.dispatch_config(config))
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        log::info!(
            "Using {} worker(s) x {} lines, transform {:?}",
            dispatcher.config().workers,
            dispatcher.config().lines_per_worker,
            transform
        );

        let mut output = open_output(self.output.as_deref())?;
        let mut progress = ProgressReporter::new(quiet);
        progress.init_lines();

        let mut total = DispatchSummary::default();
        for source in &sources {
            let name = source.name();
            progress.file_started(&name);
            let summary = dispatcher
                .run_observed(
                    source.open(),
                    &mut output,
                    &transform,
                    &mut |report| progress.cycle_completed(report),
                )
                .map_err(|e| CliError::ProcessingError(format!("{name}: {e}")))?;

            log::info!(
                "{name}: {} lines in, {} lines out",
                summary.lines_read,
                summary.lines_written
            );
            total.lines_read += summary.lines_read;
            total.lines_written += summary.lines_written;
            total.cycles += summary.cycles;
            total.sub_chunks += summary.sub_chunks;
        }

        progress.finish(sources.len());
        log::info!(
            "Processed {} lines into {} lines over {} cycles",
            total.lines_read,
            total.lines_written,
            total.cycles
        );
        Ok(())
    }
}
