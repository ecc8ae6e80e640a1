//! Discovery of alignment files in an input directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files found in an input directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentListing {
    /// Files whose name ends with the extension, sorted by file name
    pub matched: Vec<PathBuf>,
    /// Directory entries that did not match
    pub skipped: usize,
}

/// List regular files in `dir` whose name ends with `extension`
///
/// Matching is a plain suffix test on the file name, so `.fa` does not match
/// `x.fasta`. Results are sorted by file name.
pub fn list_alignments(dir: &Path, extension: &str) -> Result<AlignmentListing> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {}", dir.display()))?;

    let mut listing = AlignmentListing::default();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read entry in: {}", dir.display()))?;
        let path = entry.path();
        let name = entry.file_name();
        let is_match = name.to_str().is_some_and(|n| n.ends_with(extension));

        if is_match && path.is_file() {
            listing.matched.push(path);
        } else {
            log::debug!("Skipping {}", path.display());
            listing.skipped += 1;
        }
    }

    listing.matched.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(listing)
}

/// File name with its last extension removed
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
