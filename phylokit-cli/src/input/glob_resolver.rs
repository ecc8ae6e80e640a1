//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::path::PathBuf;

/// Expand glob patterns into the regular files they match
///
/// Plain paths are patterns too. The result is sorted with duplicates
/// removed; matching nothing at all is an error.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let matches =
            glob(pattern).map_err(|_| CliError::InvalidPattern(pattern.to_string()))?;
        for entry in matches {
            let path = entry.with_context(|| format!("Failed to read match for {pattern}"))?;
            if path.is_file() {
                files.push(path);
            } else {
                log::debug!("Ignoring non-file match {}", path.display());
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::FileNotFound(patterns.join(", ")).into());
    }
    files.sort();
    files.dedup();
    log::debug!("Resolved {} input file(s)", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_sorted_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        for name in ["b.txt", "a.txt", "c.log"] {
            fs::write(temp.path().join(name), "x").unwrap();
        }
        let dir = temp.path().display();
        let patterns = vec![format!("{dir}/*.txt"), format!("{dir}/a.txt")];

        let files = resolve_patterns(&patterns).unwrap();
        assert_eq!(
            files,
            vec![temp.path().join("a.txt"), temp.path().join("b.txt")]
        );
    }

    #[test]
    fn test_no_match_is_file_not_found() {
        let err = resolve_patterns(&["/nonexistent/*.txt".to_string()]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = resolve_patterns(&["[invalid".to_string()]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid file pattern"));
    }
}
