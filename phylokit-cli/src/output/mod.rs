//! Output destinations

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Open `path` for writing, or stdout when no path is given
///
/// Output is buffered; callers must flush before dropping.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_output_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.txt");
        let mut writer = open_output(Some(&path)).unwrap();
        writer.write_all(b"x\n").unwrap();
        writer.flush().unwrap();
        drop(writer);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x\n");
    }

    #[test]
    fn test_open_output_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = open_output(Some(&temp.path().join("no/such/out.txt"))).err().unwrap();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
