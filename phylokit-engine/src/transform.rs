//! Per-line transforms applied by workers

use crate::error::BoxError;

/// A transformation applied independently to each input line
///
/// A line may produce any number of output lines, including none. Output is
/// pushed onto `out` in the order it should be written. Implementations must
/// not rely on being called for neighbouring lines on the same thread.
pub trait LineTransform: Send + Sync {
    /// Transform one line, appending its output to `out`
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError>;
}

impl<T: LineTransform + ?Sized> LineTransform for &T {
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        (**self).apply(line, out)
    }
}

impl<T: LineTransform + ?Sized> LineTransform for Box<T> {
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        (**self).apply(line, out)
    }
}

/// One-to-one infallible transform built from a closure
#[derive(Debug, Clone, Copy)]
pub struct MapLines<F>(pub F);

impl<F> LineTransform for MapLines<F>
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        out.push((self.0)(line));
        Ok(())
    }
}

/// Fallible transform that may emit zero or more lines, built from a closure
#[derive(Debug, Clone, Copy)]
pub struct FlatMapLines<F>(pub F);

impl<F> LineTransform for FlatMapLines<F>
where
    F: Fn(&str, &mut Vec<String>) -> Result<(), BoxError> + Send + Sync,
{
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        (self.0)(line, out)
    }
}

/// Copies every line unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl LineTransform for Passthrough {
    fn apply(&self, line: &str, out: &mut Vec<String>) -> Result<(), BoxError> {
        out.push(line.to_string());
        Ok(())
    }
}
