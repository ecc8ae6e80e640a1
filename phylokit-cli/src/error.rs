//! Error handling for the CLI application

use std::fmt;

/// A failed precondition of the IQ-Tree command generator
///
/// Each variant has a stable number that is shown to the user and used as
/// the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Input directory not given or not a directory
    InputDir,
    /// Output directory not given
    OutputDirMissing,
    /// Output directory exists and `--overwrite` was not set
    OutputDirExists,
    /// Fewer than 1000 bootstrap replicates requested
    Bootstrap,
    /// No SLURM partition
    Partition,
    /// Node count below 1
    Nodes,
    /// Task count below 1
    Tasks,
    /// CPUs per task below 1
    Cpus,
    /// Negative memory request
    Mem,
    /// No notification email
    Email,
}

impl ValidationError {
    /// All variants in checking order
    pub const ALL: [ValidationError; 10] = [
        ValidationError::InputDir,
        ValidationError::OutputDirMissing,
        ValidationError::OutputDirExists,
        ValidationError::Bootstrap,
        ValidationError::Partition,
        ValidationError::Nodes,
        ValidationError::Tasks,
        ValidationError::Cpus,
        ValidationError::Mem,
        ValidationError::Email,
    ];

    /// Error number, 1 through 10
    pub fn code(&self) -> i32 {
        match self {
            ValidationError::InputDir => 1,
            ValidationError::OutputDirMissing => 2,
            ValidationError::OutputDirExists => 3,
            ValidationError::Bootstrap => 4,
            ValidationError::Partition => 5,
            ValidationError::Nodes => 6,
            ValidationError::Tasks => 7,
            ValidationError::Cpus => 8,
            ValidationError::Mem => 9,
            ValidationError::Email => 10,
        }
    }

    /// Human-readable description of the failed check
    pub fn message(&self) -> &'static str {
        match self {
            ValidationError::InputDir => "An input directory must be defined with -i.",
            ValidationError::OutputDirMissing => "An output directory must be defined with -o.",
            ValidationError::OutputDirExists => {
                "Output directory (-o) already exists! Explicitly specify --overwrite to overwrite it and its contents."
            }
            ValidationError::Bootstrap => "Bootstrap (-b) must be at least 1000.",
            ValidationError::Partition => {
                "--partition must be defined as a valid node partition on your cluster."
            }
            ValidationError::Nodes => "--nodes must be a positive integer.",
            ValidationError::Tasks => "--tasks must be a positive integer.",
            ValidationError::Cpus => "--cpus must be a positive integer.",
            ValidationError::Mem => "--mem must be a non-negative integer.",
            ValidationError::Email => "--email must be provided for SLURM updates.",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Generator precondition failed
    Validation(ValidationError),
    /// File not found or inaccessible
    FileNotFound(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// Configuration error
    ConfigError(String),
    /// Processing error from the engine
    ProcessingError(String),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation(v) => v.code(),
            _ => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Validation(v) => write!(f, "{v}"),
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::Validation(err)
    }
}

/// Exit status for malformed command lines, kept clear of the validation codes
pub const USAGE_EXIT_CODE: u8 = 64;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

/// Exit status for an error returned from a command
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(cli) = err.downcast_ref::<CliError>() {
        return cli.exit_code();
    }
    if let Some(validation) = err.downcast_ref::<ValidationError>() {
        return validation.code();
    }
    1
}
