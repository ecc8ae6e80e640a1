//! Result assembly module
//!
//! Joins the output of a cycle's sub-chunks back into input order. Records
//! are placed by the dispatch index they carry, never by the order in which
//! workers finished.

use crate::error::{EngineError, Result};
use std::io::Write;

/// Output of transforming one sub-chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    /// Dispatch index of the source sub-chunk
    pub index: usize,
    /// Output lines in input order
    pub lines: Vec<String>,
}

/// Assembler for combining per-sub-chunk results
#[derive(Debug, Default)]
pub struct ResultAssembler;

impl ResultAssembler {
    /// Create a new result assembler
    pub fn new() -> Self {
        Self
    }

    /// Order records by dispatch index and check that none is missing
    pub fn order(&self, mut records: Vec<ResultRecord>) -> Result<Vec<ResultRecord>> {
        records.sort_unstable_by_key(|r| r.index);
        for (expected, record) in records.iter().enumerate() {
            if record.index != expected {
                return Err(EngineError::OutOfOrder {
                    expected,
                    found: record.index,
                });
            }
        }
        Ok(records)
    }

    /// Concatenate records into a single ordered list of lines
    pub fn assemble(&self, records: Vec<ResultRecord>) -> Result<Vec<String>> {
        let records = self.order(records)?;
        let total = records.iter().map(|r| r.lines.len()).sum();
        let mut lines = Vec::with_capacity(total);
        for record in records {
            lines.extend(record.lines);
        }
        Ok(lines)
    }

    /// Write records to `writer` in dispatch order, one line per output line
    ///
    /// Returns the number of lines written.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        records: Vec<ResultRecord>,
        writer: &mut W,
    ) -> Result<usize> {
        let mut written = 0;
        for record in self.order(records)? {
            for line in &record.lines {
                writer.write_all(line.as_bytes())?;
                writer.write_all(b"\n")?;
            }
            written += record.lines.len();
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, lines: &[&str]) -> ResultRecord {
        ResultRecord {
            index,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_assemble_reorders_by_index() {
        let assembler = ResultAssembler::new();
        let records = vec![record(2, &["e"]), record(0, &["a", "b"]), record(1, &["c", "d"])];

        let lines = assembler.assemble(records).unwrap();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_missing_index_is_an_error() {
        let assembler = ResultAssembler::new();
        let err = assembler
            .assemble(vec![record(0, &["a"]), record(2, &["c"])])
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::OutOfOrder {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn test_empty_records_allowed() {
        let assembler = ResultAssembler::new();
        let lines = assembler
            .assemble(vec![record(0, &[]), record(1, &["x"])])
            .unwrap();
        assert_eq!(lines, vec!["x"]);
    }

    #[test]
    fn test_write_to_terminates_lines() {
        let assembler = ResultAssembler::new();
        let mut out = Vec::new();
        let written = assembler
            .write_to(vec![record(1, &["b"]), record(0, &["a"])], &mut out)
            .unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }
}
