//! Built-in per-line transforms for the `process` command

use phylokit_engine::{BoxError, LineTransform};
use serde::{Deserialize, Serialize};

/// Transforms selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinTransform {
    /// Copy lines unchanged
    Passthrough,
    /// Strip leading and trailing whitespace
    Trim,
    /// Convert to upper case
    Upper,
    /// Convert to lower case
    Lower,
    /// Drop lines that are empty or whitespace only
    DropBlank,
    /// Emit each tab-separated field on its own line
    SplitTabs,
}

impl LineTransform for BuiltinTransform {
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        match self {
            BuiltinTransform::Passthrough => out.push(line.to_string()),
            BuiltinTransform::Trim => out.push(line.trim().to_string()),
            BuiltinTransform::Upper => out.push(line.to_uppercase()),
            BuiltinTransform::Lower => out.push(line.to_lowercase()),
            BuiltinTransform::DropBlank => {
                if !line.trim().is_empty() {
                    out.push(line.to_string());
                }
            }
            BuiltinTransform::SplitTabs => out.extend(line.split('\t').map(str::to_string)),
        }
        Ok(())
    }
}
