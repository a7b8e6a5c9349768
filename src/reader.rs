//! Line oriented reader, shared by both formats.
use std::io::{BufRead, Error as IoError};

use crate::prelude::ParsingError;

/// [LineReader] provides one line at a time, without its termination,
/// and lets the parsers tell a clean end of input from a truncated one.
pub(crate) struct LineReader<B: BufRead> {
    inner: B,
    buf: String,
    line_number: usize,
}

impl<B: BufRead> LineReader<B> {
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            buf: String::with_capacity(128),
            line_number: 0,
        }
    }

    /// Returns next line, None on end of input
    pub fn next_line(&mut self) -> Result<Option<String>, IoError> {
        self.buf.clear();
        let size = self.inner.read_line(&mut self.buf)?;
        if size == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let line = self.buf.trim_end_matches(['\n', '\r']);
        Ok(Some(line.to_string()))
    }

    /// Returns next line, which must exist:
    /// reaching the end of input here means `context` was truncated.
    pub fn require_line(&mut self, context: &'static str) -> Result<String, ParsingError> {
        self.next_line()?
            .ok_or(ParsingError::TruncatedInput(context))
    }

    /// Returns true once all content has been consumed
    pub fn is_exhausted(&mut self) -> Result<bool, IoError> {
        Ok(self.inner.fill_buf()?.is_empty())
    }

    /// Number of lines consumed so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
