//! Input abstraction for line processing
//!
//! Every source is consumed as a buffered stream of lines so that only the
//! current dispatch cycle is ever held in memory.

use crate::error::{EngineError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Read};
use std::path::PathBuf;

/// Unified input abstraction
pub enum Input {
    /// Direct text string
    Text(String),
    /// File path to read from
    File(PathBuf),
    /// Bytes to read as UTF-8 text
    Bytes(Vec<u8>),
    /// Reader stream (stdin, pipes, etc.)
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
        }
    }
}

impl Input {
    /// Create input from a text string
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Open the input as a buffered reader
    pub fn into_reader(self) -> Result<Box<dyn BufRead + Send>> {
        match self {
            Input::Text(text) => Ok(Box::new(Cursor::new(text.into_bytes()))),
            Input::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes))),
            Input::File(path) => {
                let file = File::open(&path).map_err(|e| {
                    EngineError::IoError(std::io::Error::new(
                        e.kind(),
                        format!("failed to open {}: {e}", path.display()),
                    ))
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Input::Reader(reader) => Ok(Box::new(BufReader::new(reader))),
        }
    }

    /// Open the input as an iterator of lines
    ///
    /// Line terminators (`\n` or `\r\n`) are stripped.
    pub fn into_lines(self) -> Result<impl Iterator<Item = std::io::Result<String>>> {
        Ok(self.into_reader()?.lines())
    }
}
