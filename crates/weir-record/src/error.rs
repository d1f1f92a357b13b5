//! Error types for recording and reading snapshots.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors from writing or parsing columnar snapshot files.
#[derive(Debug)]
pub enum RecordError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The first line is not the expected header.
    MalformedHeader {
        /// The line that was found instead.
        found: String,
    },
    /// A data row could not be parsed.
    MalformedRow {
        /// 1-based line number in the file.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MalformedHeader { found } => {
                write!(f, "malformed header: expected `{}`, found `{found}`", crate::HEADER)
            }
            Self::MalformedRow { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RecordError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
