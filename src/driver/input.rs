//! Line input for the driver.
//!
//! Answers come from an optional answer file first. Once the file runs
//! out, reading continues from a fallback stream (normally stdin) unless
//! the bomb is being graded, in which case running out of file input
//! simply ends the run.

use std::io::{BufRead, Read};

use crate::error::InputError;
use crate::parse::{decode_line, is_space};

/// Longest accepted line, counting the terminating newline and NUL of the
/// classic line buffer. A raw line of `MAX_LINE - 1` bytes or more is
/// rejected as too long.
pub const MAX_LINE: usize = 1024;

/// Placeholder recorded in place of an over-long line.
pub const TRUNCATED: &str = "***truncated***";

/// One unit of driver input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A non-blank line with its terminator removed.
    Line(String),
    /// A line at or above the length limit.
    TooLong,
    /// The answer file ran out while grading.
    GradedEof,
}

/// Source of answer lines.
pub trait LineSource {
    /// Reads the next non-blank line.
    ///
    /// `phase` names the phase waiting for input and is only used for
    /// error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PrematureEof`] when every stream is
    /// exhausted, or [`InputError::Io`] if reading fails.
    fn next_line(&mut self, phase: usize) -> Result<InputLine, InputError>;
}

/// Answer-file-then-fallback line reader.
pub struct InputReader {
    primary: Option<Box<dyn BufRead + Send>>,
    fallback: Box<dyn BufRead + Send>,
    grade: bool,
}

impl std::fmt::Debug for InputReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputReader")
            .field("reading_file", &self.primary.is_some())
            .field("grade", &self.grade)
            .finish_non_exhaustive()
    }
}

impl InputReader {
    /// Reads from `fallback` only.
    #[must_use]
    pub fn interactive(fallback: Box<dyn BufRead + Send>) -> Self {
        Self {
            primary: None,
            fallback,
            grade: false,
        }
    }

    /// Reads `primary` first, then `fallback`.
    ///
    /// With `grade` set, the end of `primary` yields [`InputLine::GradedEof`]
    /// instead of switching streams.
    #[must_use]
    pub fn with_file(
        primary: Box<dyn BufRead + Send>,
        fallback: Box<dyn BufRead + Send>,
        grade: bool,
    ) -> Self {
        Self {
            primary: Some(primary),
            fallback,
            grade,
        }
    }

    /// Whether input is still coming from the answer file.
    #[must_use]
    pub const fn reading_file(&self) -> bool {
        self.primary.is_some()
    }
}

/// Reads one raw line of at most `MAX_LINE - 1` bytes, returning `None` at
/// end of stream.
///
/// A line that hits the cap comes back without its newline and the rest
/// of it stays unread; the bomb explodes on it, so nothing reads further.
fn read_raw(reader: &mut dyn BufRead) -> Result<Option<Vec<u8>>, InputError> {
    let cap = u64::try_from(MAX_LINE - 1).unwrap_or(u64::MAX);
    let mut raw = Vec::with_capacity(MAX_LINE);
    if reader.take(cap).read_until(b'\n', &mut raw)? == 0 {
        return Ok(None);
    }
    Ok(Some(raw))
}

fn strip_terminator(raw: &mut Vec<u8>) {
    if raw.last() == Some(&b'\n') {
        raw.pop();
        if raw.last() == Some(&b'\r') {
            raw.pop();
        }
    }
}

impl LineSource for InputReader {
    fn next_line(&mut self, phase: usize) -> Result<InputLine, InputError> {
        loop {
            let raw = match self.primary.as_mut() {
                Some(file) => match read_raw(file.as_mut())? {
                    Some(raw) => raw,
                    None if self.grade => return Ok(InputLine::GradedEof),
                    None => {
                        tracing::debug!("answer file exhausted, reading stdin");
                        self.primary = None;
                        continue;
                    }
                },
                None => read_raw(self.fallback.as_mut())?
                    .ok_or(InputError::PrematureEof { phase })?,
            };

            if raw.len() >= MAX_LINE - 1 {
                return Ok(InputLine::TooLong);
            }

            let mut line = raw;
            strip_terminator(&mut line);
            let line = decode_line(&line);
            if line.chars().all(is_space) {
                continue;
            }
            return Ok(InputLine::Line(line));
        }
    }
}
