use std::error::Error;
use std::fmt;

use thiserror::Error;

/// The error type for [`StackDumpError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackDumpErrorKind {
    /// The first line is neither a `PID` nor a `TID` line.
    UnexpectedFirstLine,

    /// The process id of a `PID` line is missing or not a number.
    InvalidPidField,

    /// The thread id of a `TID` line is missing or not a number.
    InvalidTidField,

    /// The address of a call line is missing or not a hex number.
    InvalidAddressField,

    /// A call line appeared before any `TID` line.
    CallOutsideThread,

    /// Reading the input failed.
    Io,
}

impl fmt::Display for StackDumpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedFirstLine => write!(f, "expected PID or TID line"),
            Self::InvalidPidField => write!(f, "invalid process id"),
            Self::InvalidTidField => write!(f, "invalid thread id"),
            Self::InvalidAddressField => write!(f, "invalid call address"),
            Self::CallOutsideThread => write!(f, "call outside of a thread section"),
            Self::Io => write!(f, "failed to read stack dump"),
        }
    }
}

/// An error returned when parsing a [`StackDump`](crate::StackDump).
#[derive(Debug, Error)]
#[error("{kind} on line {line}")]
pub struct StackDumpError {
    kind: StackDumpErrorKind,
    line: usize,
    #[source]
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl StackDumpError {
    pub(crate) fn new<E>(kind: StackDumpErrorKind, line: usize, source: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        let source = Some(source.into());
        Self { kind, line, source }
    }

    pub(crate) fn from_kind(kind: StackDumpErrorKind, line: usize) -> Self {
        Self {
            kind,
            line,
            source: None,
        }
    }

    /// Returns the corresponding [`StackDumpErrorKind`] for this error.
    pub fn kind(&self) -> StackDumpErrorKind {
        self.kind
    }

    /// The 1-based line number on which the error occurred.
    pub fn line(&self) -> usize {
        self.line
    }
}
